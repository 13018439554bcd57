//! Execution of a single map task.

use crate::{bucket_of, codec, naming, KeyValue, MapFn};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Why a map task invocation failed.
///
/// Every variant is fatal for the whole invocation: this core never
/// retries and never reports partial success. The coordinator treats any
/// of these as "task failed, re-schedule" and owns cleanup of whatever
/// files the failed attempt may have left behind.
#[derive(Debug, Error)]
pub enum MapTaskError {
    /// Rejected before any I/O was attempted.
    #[error("invalid map task configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The input partition could not be opened or read.
    #[error("failed to read input {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An intermediate file could not be created, written, or published.
    #[error("failed to write intermediate file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The map transform itself failed.
    #[error("map transform failed: {0}")]
    Map(#[source] anyhow::Error),
}

/// Run one map task to completion.
///
/// Reads all of `in_file`, invokes `map_fn` on it exactly once, and
/// writes each non-empty reduce bucket's share of the output to its
/// intermediate file under `out_dir` (see [`naming::intermediate_file`]).
/// Within each bucket, pairs keep the order the transform emitted them
/// in. Returns the intermediate files written; a transform that emits
/// nothing writes no files at all.
///
/// Output is staged to temporary files and renamed into place only once
/// every bucket has been written, so a task retried after a crash
/// replaces its earlier output instead of appending to it. On error,
/// staging leftovers (suffixed `.tmp`) may remain for the caller to
/// sweep up.
pub fn execute_map_task(
    job_name: &str,
    map_task: u32,
    in_file: &Path,
    out_dir: &Path,
    n_reduce: u32,
    map_fn: MapFn,
) -> Result<Vec<PathBuf>, MapTaskError> {
    if n_reduce == 0 {
        return Err(MapTaskError::InvalidConfig {
            reason: "n_reduce must be at least 1".to_string(),
        });
    }
    if job_name.is_empty() {
        return Err(MapTaskError::InvalidConfig {
            reason: "job name must not be empty".to_string(),
        });
    }

    let contents = fs::read_to_string(in_file).map_err(|source| MapTaskError::InputRead {
        path: in_file.to_path_buf(),
        source,
    })?;
    debug!(job_name, map_task, bytes = contents.len(), "read input partition");

    let filename = in_file.to_string_lossy();
    let output = map_fn(&filename, &contents).map_err(MapTaskError::Map)?;

    // Group pairs per bucket, keeping emission order within each bucket.
    let mut buckets: BTreeMap<u32, Vec<KeyValue>> = BTreeMap::new();
    let mut pairs = 0usize;
    for item in output {
        let kv = item.map_err(MapTaskError::Map)?;
        buckets
            .entry(bucket_of(kv.key.as_bytes(), n_reduce))
            .or_default()
            .push(kv);
        pairs += 1;
    }
    debug!(
        job_name,
        map_task,
        pairs,
        buckets = buckets.len(),
        "partitioned map output"
    );

    // Stage every bucket first, publish only after all of them succeeded.
    let mut staged = Vec::with_capacity(buckets.len());
    for (bucket, bucket_pairs) in &buckets {
        let final_path = naming::intermediate_file(out_dir, job_name, map_task, *bucket);
        let staging_path = staging_file(&final_path);
        write_bucket(&staging_path, bucket_pairs).map_err(|source| MapTaskError::OutputWrite {
            path: staging_path.clone(),
            source,
        })?;
        staged.push((staging_path, final_path));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (staging_path, final_path) in staged {
        fs::rename(&staging_path, &final_path).map_err(|source| MapTaskError::OutputWrite {
            path: final_path.clone(),
            source,
        })?;
        written.push(final_path);
    }

    info!(
        job_name,
        map_task,
        pairs,
        files = written.len(),
        "map task complete"
    );
    Ok(written)
}

/// Run the map phase of a job: one map task per file matched by
/// `input_glob`, task indices assigned in match order.
///
/// Returns every intermediate file written across the phase. A glob
/// pattern error, an unreadable match, or any task failure is fatal for
/// the whole phase; no input partition is ever silently skipped.
pub fn execute_map_phase(
    job_name: &str,
    input_glob: &str,
    out_dir: &Path,
    n_reduce: u32,
    map_fn: MapFn,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let mut map_task = 0u32;
    for entry in glob::glob(input_glob)? {
        let in_file = entry?;
        let files = execute_map_task(job_name, map_task, &in_file, out_dir, n_reduce, map_fn)?;
        info!(
            map_task,
            input = %in_file.display(),
            files = files.len(),
            "map task finished"
        );
        written.extend(files);
        map_task += 1;
    }
    Ok(written)
}

/// The staging path for an intermediate file. Staging files live next to
/// their final names so the publishing rename stays on one filesystem.
fn staging_file(final_path: &Path) -> PathBuf {
    let mut name = final_path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_bucket(path: &Path, pairs: &[KeyValue]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for kv in pairs {
        codec::write_record(&mut writer, kv)?;
    }
    writer.flush()
}
