//! Phase 2 of Louvain: collapse communities into the next level's graph.

use super::Partition;
use crate::error::Result;
use crate::graph::WeightedGraph;

/// One finished level: the partition found on it and the graph it induces.
#[derive(Debug, Clone)]
pub(crate) struct Aggregated {
    pub(crate) partition: Partition,
    pub(crate) graph: WeightedGraph,
}

/// Build the quotient graph of `graph` under `partition`.
pub(crate) fn aggregate(graph: &WeightedGraph, partition: Partition) -> Result<Aggregated> {
    let quotient = graph.quotient(&partition)?;
    Ok(Aggregated {
        partition,
        graph: quotient,
    })
}
