//! Iterator objects over a [`WeightedGraph`].
//!
//! All of them borrow the graph and are `Clone`, so a sequence can be
//! restarted either by cloning the iterator or by asking the graph again.

use super::{NodeId, WeightedGraph};
use std::iter::FusedIterator;
use std::slice;

/// One undirected edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// First endpoint.
    pub a: NodeId,
    /// Second endpoint (equal to `a` for a self-loop).
    pub b: NodeId,
    /// Accumulated weight.
    pub weight: f64,
}

/// Node ids in insertion order.
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    inner: slice::Iter<'a, NodeId>,
}

impl<'a> Nodes<'a> {
    pub(super) fn new(ids: &'a [NodeId]) -> Self {
        Self { inner: ids.iter() }
    }
}

impl Iterator for Nodes<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Nodes<'_> {}
impl FusedIterator for Nodes<'_> {}

/// Each undirected edge once, with `a <= b`.
///
/// Deduplicated by slot: a pair is visited from its lower slot only.
#[derive(Debug, Clone)]
pub struct Edges<'a> {
    graph: &'a WeightedGraph,
    slot: usize,
    pos: usize,
}

impl<'a> Edges<'a> {
    pub(super) fn new(graph: &'a WeightedGraph) -> Self {
        Self {
            graph,
            slot: 0,
            pos: 0,
        }
    }
}

impl Iterator for Edges<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        loop {
            let list = self.graph.adj.get(self.slot)?;
            if self.pos == 0 {
                // lists are sorted: skip pairs already reported from a lower slot
                let slot = self.slot;
                self.pos = list.partition_point(|&(j, _)| j < slot);
            }
            if let Some(&(j, weight)) = list.get(self.pos) {
                self.pos += 1;
                let (x, y) = (self.graph.ids[self.slot], self.graph.ids[j]);
                return Some(Edge {
                    a: x.min(y),
                    b: x.max(y),
                    weight,
                });
            }
            self.slot += 1;
            self.pos = 0;
        }
    }
}

impl FusedIterator for Edges<'_> {}

/// Edges touching one node.
#[derive(Debug, Clone)]
pub struct IncidentEdges<'a> {
    graph: &'a WeightedGraph,
    slot: usize,
    inner: slice::Iter<'a, (usize, f64)>,
}

impl<'a> IncidentEdges<'a> {
    pub(super) fn new(graph: &'a WeightedGraph, slot: usize) -> Self {
        Self {
            graph,
            slot,
            inner: graph.adj[slot].iter(),
        }
    }
}

impl Iterator for IncidentEdges<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        let &(j, weight) = self.inner.next()?;
        Some(Edge {
            a: self.graph.ids[self.slot],
            b: self.graph.ids[j],
            weight,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for IncidentEdges<'_> {}
impl FusedIterator for IncidentEdges<'_> {}
