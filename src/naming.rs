//! Naming of intermediate files, shared between the map and reduce phases.
//!
//! The reduce phase locates a map task's output purely by reconstructing
//! these names, so both sides must use this function and nothing else.

use std::path::{Path, PathBuf};

/// The intermediate file holding the pairs that map task `map_task` of
/// job `job_name` produced for reduce bucket `bucket`.
pub fn intermediate_file(out_dir: &Path, job_name: &str, map_task: u32, bucket: u32) -> PathBuf {
    out_dir.join(format!("mrtmp.{}-{}-{}", job_name, map_task, bucket))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_keyed_by_job_task_and_bucket() {
        assert_eq!(
            intermediate_file(Path::new("out"), "wcount", 3, 7),
            PathBuf::from("out/mrtmp.wcount-3-7")
        );
        assert_eq!(
            intermediate_file(Path::new("/tmp/job"), "grep", 0, 0),
            PathBuf::from("/tmp/job/mrtmp.grep-0-0")
        );
    }

    #[test]
    fn distinct_tasks_never_share_a_file() {
        let out = Path::new("out");
        assert_ne!(
            intermediate_file(out, "job", 0, 1),
            intermediate_file(out, "job", 1, 0)
        );
    }
}
