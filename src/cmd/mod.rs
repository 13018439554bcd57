//! Command-line arguments for the `mrmap` binary.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Name of the job these map tasks belong to
    #[arg(long)]
    pub job_name: String,

    /// Glob spec for the input partitions; one map task per match
    #[arg(short, long)]
    pub input: String,

    /// Directory receiving the intermediate files
    #[arg(short, long)]
    pub out_dir: PathBuf,

    /// Number of reduce buckets for this job
    #[arg(short, long)]
    pub n_reduce: u32,

    /// Name of the workload whose map transform to run
    #[arg(short, long)]
    pub workload: String,
}
