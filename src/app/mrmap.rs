use anyhow::Result;
use clap::Parser;
use mrmap::cmd::Args;
use mrmap::task::execute_map_phase;
use mrmap::workload;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs the map phase of a job standalone: one map task per input file
/// matched by the glob, task indices assigned in match order. The reduce
/// phase picks the intermediate files up from the output directory.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let engine = workload::named(&args.workload)?;

    let written = execute_map_phase(
        &args.job_name,
        &args.input,
        &args.out_dir,
        args.n_reduce,
        engine.map_fn,
    )?;
    info!(files = written.len(), "map phase complete");
    Ok(())
}
