//! The map side of a MapReduce (lite) system.
//!
//! This crate executes a single map task: it reads one input partition,
//! runs a user-supplied map transform over it, and partitions the
//! transform's output into intermediate files, one per reduce bucket.
//! Scheduling, worker liveness, and the reduce phase itself live in a
//! separate coordinator layer that calls [`task::execute_map_task`] once
//! per task and re-runs the whole task on failure.

use serde::{Deserialize, Serialize};
use std::hash::Hasher;

pub mod cmd;
pub mod codec;
pub mod naming;
pub mod task;
pub mod workload;

/////////////////////////////////////////////////////////////////////////////
// MapReduce application types
/////////////////////////////////////////////////////////////////////////////

/// The output of an application map transform.
///
/// There are 2 layers of [`anyhow::Result`]s here. The outer layer
/// accounts for errors that arise while creating the iterator.
/// The inner layer accounts for errors that occur during iteration.
///
/// This accomodates both batch (all pairs emitted at once) and lazy
/// (pairs only emitted when the iterator is consumed) map transforms.
pub type MapOutput = anyhow::Result<Box<dyn Iterator<Item = anyhow::Result<KeyValue>>>>;

/// A map transform takes the input file's name and its entire contents.
///
/// It returns an iterator that yields key-value pairs. Transforms
/// typically ignore the file name.
pub type MapFn = fn(filename: &str, contents: &str) -> MapOutput;

/// A map workload, looked up by name via [`workload::named`].
#[derive(Copy, Clone)]
pub struct Workload {
    pub map_fn: MapFn,
}

/////////////////////////////////////////////////////////////////////////////
// Key-value pairs
/////////////////////////////////////////////////////////////////////////////

/// A single key-value pair.
///
/// Both fields are opaque text and may contain any characters at all,
/// including newlines, quotes, and record delimiters. Nothing in this
/// crate assumes otherwise.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct KeyValue {
    /// The key.
    pub key: String,
    /// The value.
    pub value: String,
}

impl KeyValue {
    /// Construct a new key-value pair from the given key and value.
    pub fn new(key: String, value: String) -> Self {
        Self { key, value }
    }
}

/// Hashes an intermediate key. The reduce bucket for a key is
/// `ihash(key) % n_reduce`; see [`bucket_of`].
///
/// This is the sole coordination mechanism between the map and reduce
/// phases: any independent reduce implementation must compute the exact
/// same value. FNV-1a over the raw key bytes with the standard offset
/// basis, sign bit masked off so the result is non-negative when read
/// as a signed 32-bit integer.
pub fn ihash(key: &[u8]) -> u32 {
    let mut hasher = fnv::FnvHasher::default();
    hasher.write(key);
    (hasher.finish() & 0x7fffffff) as u32
}

/// Compute the reduce bucket for `key` given `n_reduce` total buckets.
///
/// Pure and stable: the same key and `n_reduce` always yield the same
/// bucket, across processes, retries, and the lifetime of a job.
pub fn bucket_of(key: &[u8], n_reduce: u32) -> u32 {
    debug_assert!(n_reduce > 0);
    ihash(key) % n_reduce
}

#[cfg(test)]
mod tests {
    use super::*;

    // Pinned values are the shared contract with the reduce phase. If one
    // of these changes, every independent reduce implementation breaks.
    #[test]
    fn ihash_golden_vectors() {
        assert_eq!(ihash(b""), 69346085);
        assert_eq!(ihash(b"a"), 100789388);
        assert_eq!(ihash(b"b"), 100790693);
        assert_eq!(ihash(b"hello"), 11189515);
        assert_eq!(ihash(b"the"), 1147262332);
        assert_eq!(ihash("日本".as_bytes()), 651415185);
    }

    #[test]
    fn ihash_is_deterministic() {
        for key in ["", "a", "word", "key with\nnewline", "日本"] {
            assert_eq!(ihash(key.as_bytes()), ihash(key.as_bytes()));
        }
    }

    #[test]
    fn bucket_is_always_in_range() {
        for n_reduce in [1, 2, 7, 11, 64] {
            for key in ["", "a", "b", "hello", "the quick brown fox"] {
                assert!(bucket_of(key.as_bytes(), n_reduce) < n_reduce);
            }
        }
    }

    #[test]
    fn single_bucket_takes_every_key() {
        for key in ["a", "b", "anything"] {
            assert_eq!(bucket_of(key.as_bytes(), 1), 0);
        }
    }
}
