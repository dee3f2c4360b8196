//! Adjacency-list ingestion.
//!
//! One node per line, followed by its neighbors:
//!
//! ```text
//! # comment
//! 1 2 3
//! 2,3
//! 4
//! ```
//!
//! Tokens are separated by whitespace and/or commas. Every neighbor adds one
//! unit-weight edge, so a pair listed from both ends ends up with weight 2.

use super::{NodeId, WeightedGraph};
use crate::error::{Error, Result};
use std::io::BufRead;

impl WeightedGraph {
    /// Parse an adjacency list.
    pub fn from_adjacency_list<R: BufRead>(reader: R) -> Result<Self> {
        let mut graph = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let lineno = idx + 1;
            let mut tokens = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty());
            let Some(first) = tokens.next() else {
                continue;
            };
            let node = parse_id(first, lineno)?;
            graph.add_node(node);
            for token in tokens {
                graph.add_edge(node, parse_id(token, lineno)?, 1.0);
            }
        }
        Ok(graph)
    }
}

fn parse_id(token: &str, line: usize) -> Result<NodeId> {
    token.parse().map_err(|e| Error::Parse {
        line,
        message: format!("invalid node id {token:?}: {e}"),
    })
}
