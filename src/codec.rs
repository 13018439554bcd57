//! On-disk encoding of intermediate key-value records.
//!
//! One JSON object per record, newline terminated. JSON escaping keeps
//! records self-delimiting even when keys or values contain newlines,
//! quotes, or any other delimiter-looking text, and the reduce phase can
//! decode a file one record at a time without holding it in memory.

use crate::KeyValue;
use anyhow::Result;
use serde_json::{de::IoRead, Deserializer, StreamDeserializer};
use std::io::{Read, Write};

/// Encode a single record to `writer`.
pub fn write_record<W: Write>(writer: &mut W, kv: &KeyValue) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, kv)?;
    writer.write_all(b"\n")
}

/// A streaming decoder over the records in an intermediate file.
///
/// Yields records in file order, one at a time.
pub struct RecordStream<R: Read> {
    inner: StreamDeserializer<'static, IoRead<R>, KeyValue>,
}

impl<R: Read> RecordStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: Deserializer::from_reader(reader).into_iter::<KeyValue>(),
        }
    }
}

impl<R: Read> Iterator for RecordStream<R> {
    type Item = Result<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|item| item.map_err(Into::into))
    }
}
