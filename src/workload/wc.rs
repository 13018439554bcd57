//! A MapReduce-compatible implementation of word count.
//!

use crate::{KeyValue, MapOutput};

pub fn map(_filename: &str, contents: &str) -> MapOutput {
    let words = contents
        .split(|c: char| !c.is_alphabetic())
        .filter(|s| !s.is_empty())
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>();

    let iter = words
        .into_iter()
        .map(|word| Ok(KeyValue::new(word, "1".to_string())));
    Ok(Box::new(iter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn splits_lowercases_and_counts_once_per_occurrence() {
        let pairs = map("in", "The quick brown fox, the lazy dog.")
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();

        let words = pairs.iter().map(|kv| kv.key.as_str()).collect::<Vec<_>>();
        assert_eq!(words, ["the", "quick", "brown", "fox", "the", "lazy", "dog"]);
        assert!(pairs.iter().all(|kv| kv.value == "1"));
    }

    #[test]
    fn empty_input_emits_nothing() {
        assert_eq!(map("in", "").unwrap().count(), 0);
    }
}
