//! A MapReduce-compatible implementation of vertex degree counting.
//!
//! Input is an edge list, one `u v` pair per line. Each endpoint of an
//! edge is emitted once, so summing per key downstream yields the degree.

use crate::{KeyValue, MapOutput};
use anyhow::anyhow;

pub fn map(_filename: &str, contents: &str) -> MapOutput {
    let edges = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(u), Some(v)) => Ok((u.to_string(), v.to_string())),
                _ => Err(anyhow!("malformed edge line: `{}`", line)),
            }
        })
        .collect::<Vec<_>>();

    let iter = edges.into_iter().flat_map(|edge| match edge {
        Ok((u, v)) => vec![
            Ok(KeyValue::new(u, "1".to_string())),
            Ok(KeyValue::new(v, "1".to_string())),
        ],
        Err(e) => vec![Err(e)],
    });
    Ok(Box::new(iter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn emits_both_endpoints_of_each_edge() {
        let pairs = map("in", "1 2\n2 3\n")
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        let keys = pairs.iter().map(|kv| kv.key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, ["1", "2", "2", "3"]);
    }

    #[test]
    fn malformed_line_surfaces_as_an_item_error() {
        let items = map("in", "1 2\nlonely\n").unwrap().collect::<Vec<_>>();
        assert!(items.iter().any(|item| item.is_err()));
    }
}
