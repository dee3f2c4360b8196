//! Newman modularity of a partition.
//!
//! ```text
//! Q = Σ_c [ in_c / m  -  γ (tot_c / 2m)² ]
//! ```
//!
//! - m      = total edge weight ([`WeightedGraph::size`])
//! - in_c   = weight of edges with both endpoints in c (self-loops once)
//! - tot_c  = sum of weighted degrees of nodes in c
//! - γ      = resolution

use super::Partition;
use crate::error::{Error, Result};
use crate::graph::{NodeId, WeightedGraph};
use std::collections::BTreeMap;

/// Modularity of `partition` over `graph` at the given resolution.
///
/// Returns 0 for a graph without edge weight. The partition must cover every
/// node touched by an edge.
pub fn modularity(graph: &WeightedGraph, partition: &Partition, resolution: f64) -> Result<f64> {
    let m = graph.size();
    if m == 0.0 {
        return Ok(0.0);
    }

    let community_of = |node: NodeId| {
        partition
            .get(&node)
            .copied()
            .ok_or(Error::MissingPartitionEntry(node))
    };

    let mut internal: BTreeMap<NodeId, f64> = BTreeMap::new();
    let mut total: BTreeMap<NodeId, f64> = BTreeMap::new();

    for node in graph.nodes() {
        let degree = graph.degree(node)?;
        if degree > 0.0 {
            *total.entry(community_of(node)?).or_insert(0.0) += degree;
        }
    }
    for edge in graph.edges() {
        let ca = community_of(edge.a)?;
        if ca == community_of(edge.b)? {
            *internal.entry(ca).or_insert(0.0) += edge.weight;
        }
    }

    let q = total
        .iter()
        .map(|(c, &tot)| {
            let inside = internal.get(c).copied().unwrap_or(0.0);
            inside / m - resolution * (tot / (2.0 * m)).powi(2)
        })
        .sum();
    Ok(q)
}
