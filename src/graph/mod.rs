//! Weighted undirected graph.
//!
//! Nodes are opaque `u64` ids supplied by the caller. Internally every id is
//! assigned a dense slot on first sight, and each slot owns a neighbor list
//! sorted by slot index:
//!
//! ```text
//! ids:   [ 17, 4, 9 ]            slot -> external id
//! index: { 17: 0, 4: 1, 9: 2 }   external id -> slot
//! adj:   0: [(1, 1.0), (2, 0.5)]
//!        1: [(0, 1.0)]
//!        2: [(0, 0.5), (2, 2.0)]  <- self-loop on 9
//! ```
//!
//! ## Bookkeeping
//!
//! - Adjacency is symmetric: `w(a, b) == w(b, a)` after every mutation.
//! - A self-loop is stored once in its own list but counts twice toward the
//!   node's degree (one per loop end), and once toward [`WeightedGraph::size`].
//! - `edge_count` and `size` grow on every [`WeightedGraph::add_edge`] /
//!   [`WeightedGraph::set_edge`] call, whether or not the pair already existed.
//!
//! For graphs built only through `add_edge`:
//!
//! ```text
//! 2 * size == Σ_n degree(n)
//! ```

mod adjacency_list;
mod iter;

pub use iter::{Edge, Edges, IncidentEdges, Nodes};

use crate::community::Partition;
use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// External node identifier.
///
/// Community ids share this type: the communities of one dendrogram level are
/// the nodes of the next.
pub type NodeId = u64;

#[derive(Debug, Clone, Copy)]
enum WriteMode {
    Accumulate,
    Overwrite,
}

/// Mutable weighted undirected graph over a dense node arena.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    /// Slot -> external id, in insertion order.
    ids: Vec<NodeId>,
    /// External id -> slot.
    index: HashMap<NodeId, usize>,
    /// Per-slot neighbor lists, sorted by neighbor slot.
    adj: Vec<Vec<(usize, f64)>>,
    edge_count: usize,
    size: f64,
}

impl WeightedGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `n` nodes.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            ids: Vec::with_capacity(n),
            index: HashMap::with_capacity(n),
            adj: Vec::with_capacity(n),
            edge_count: 0,
            size: 0.0,
        }
    }

    /// Ensure `node` exists. Idempotent.
    pub fn add_node(&mut self, node: NodeId) {
        let _ = self.slot_or_insert(node);
    }

    /// Add `weight` to the edge between `a` and `b`, creating either node if needed.
    ///
    /// `a == b` stores a self-loop, which contributes `2 * weight` to the degree
    /// of `a`. The edge count and total size grow even if the pair existed.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f64) {
        self.write_edge(a, b, weight, WriteMode::Accumulate);
    }

    /// Overwrite the weight between `a` and `b`.
    ///
    /// Same symmetry rules as [`add_edge`](Self::add_edge). The edge count and
    /// size are still incremented by one and `weight`: the previous weight is
    /// not subtracted. Mixing `set_edge` and `add_edge` on one pair therefore
    /// leaves `size` out of step with the degrees.
    pub fn set_edge(&mut self, a: NodeId, b: NodeId, weight: f64) {
        self.write_edge(a, b, weight, WriteMode::Overwrite);
    }

    fn write_edge(&mut self, a: NodeId, b: NodeId, weight: f64, mode: WriteMode) {
        debug_assert!(weight >= 0.0, "edge weight must be non-negative, got {weight}");
        let i = self.slot_or_insert(a);
        let j = self.slot_or_insert(b);
        write_half(&mut self.adj[i], j, weight, mode);
        if i != j {
            write_half(&mut self.adj[j], i, weight, mode);
        }
        self.edge_count += 1;
        self.size += weight;
    }

    /// Weighted degree: incident weights plus one extra copy of any self-loop.
    pub fn degree(&self, node: NodeId) -> Result<f64> {
        let slot = self.slot(node)?;
        Ok(self.degree_at(slot))
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of `add_edge`/`set_edge` calls applied.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Total edge weight, self-loops counted once.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// True if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True if `node` was added.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    /// All node ids, in insertion order. Restartable: call again to iterate anew.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes::new(&self.ids)
    }

    /// Every undirected edge exactly once, endpoints ordered so that `a <= b`.
    ///
    /// Edges come grouped by the endpoint inserted first, in
    /// [`nodes`](Self::nodes) order.
    pub fn edges(&self) -> Edges<'_> {
        Edges::new(self)
    }

    /// Edges touching `node`, with `a == node`. Empty if the node is isolated.
    pub fn incident_edges(&self, node: NodeId) -> Result<IncidentEdges<'_>> {
        let slot = self.slot(node)?;
        Ok(IncidentEdges::new(self, slot))
    }

    /// Neighbors of `node` with their accumulated weights.
    pub fn neighbors(&self, node: NodeId) -> Result<impl Iterator<Item = (NodeId, f64)> + '_> {
        let slot = self.slot(node)?;
        Ok(self.adj[slot].iter().map(move |&(j, w)| (self.ids[j], w)))
    }

    /// Stored weight between `a` and `b`, or `default` if the pair is absent.
    ///
    /// Fails if `a` itself was never added, even though `default` would apply.
    pub fn edge_weight(&self, a: NodeId, b: NodeId, default: f64) -> Result<f64> {
        let i = self.slot(a)?;
        let Some(&j) = self.index.get(&b) else {
            return Ok(default);
        };
        Ok(find_weight(&self.adj[i], j).unwrap_or(default))
    }

    /// Collapse each community of `partition` into a single node.
    ///
    /// The weight between communities `u` and `v` is the sum of the weights
    /// between their members; edges inside a community become a self-loop on it.
    /// Total size is conserved.
    ///
    /// `partition` must cover every node of the graph and reference no others.
    pub fn quotient(&self, partition: &Partition) -> Result<WeightedGraph> {
        if let Some(&stray) = partition.keys().find(|n| !self.contains_node(**n)) {
            return Err(Error::NodeNotFound(stray));
        }
        let community: Vec<NodeId> = self
            .ids
            .iter()
            .map(|id| {
                partition
                    .get(id)
                    .copied()
                    .ok_or(Error::MissingPartitionEntry(*id))
            })
            .collect::<Result<_>>()?;

        let mut quotient = WeightedGraph::new();
        for &c in &community {
            quotient.add_node(c);
        }
        for (i, neighbors) in self.adj.iter().enumerate() {
            for &(j, w) in neighbors.iter().filter(|&&(j, _)| j >= i) {
                quotient.add_edge(community[i], community[j], w);
            }
        }
        Ok(quotient)
    }

    /// Copy of the graph with node ids permuted uniformly at random.
    ///
    /// Both the node insertion order and the edge insertion order are
    /// shuffled, so slot order (and with it any scan over [`nodes`](Self::nodes))
    /// carries no trace of the original order. The returned map sends each
    /// original id to its new id. Edge count and size are carried over unchanged.
    pub fn randomized_nodes<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> (WeightedGraph, HashMap<NodeId, NodeId>) {
        let n = self.node_count();

        let mut targets = self.ids.clone();
        targets.shuffle(rng);
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);

        let mut pairs: Vec<(usize, usize, f64)> = Vec::new();
        for (i, neighbors) in self.adj.iter().enumerate() {
            pairs.extend(
                neighbors
                    .iter()
                    .filter(|&&(j, _)| j >= i)
                    .map(|&(j, w)| (i, j, w)),
            );
        }
        pairs.shuffle(rng);

        let mut shuffled = WeightedGraph::with_capacity(n);
        for &slot in &order {
            shuffled.add_node(targets[slot]);
        }
        for (i, j, w) in pairs {
            shuffled.add_edge(targets[i], targets[j], w);
        }
        shuffled.edge_count = self.edge_count;
        shuffled.size = self.size;

        let relabel = self.ids.iter().copied().zip(targets).collect();
        (shuffled, relabel)
    }

    fn slot_or_insert(&mut self, node: NodeId) -> usize {
        if let Some(&slot) = self.index.get(&node) {
            return slot;
        }
        let slot = self.ids.len();
        self.ids.push(node);
        self.adj.push(Vec::new());
        let _ = self.index.insert(node, slot);
        slot
    }

    pub(crate) fn slot(&self, node: NodeId) -> Result<usize> {
        self.index
            .get(&node)
            .copied()
            .ok_or(Error::NodeNotFound(node))
    }

    pub(crate) fn id_at(&self, slot: usize) -> NodeId {
        self.ids[slot]
    }

    pub(crate) fn neighbors_at(&self, slot: usize) -> &[(usize, f64)] {
        &self.adj[slot]
    }

    pub(crate) fn degree_at(&self, slot: usize) -> f64 {
        self.adj[slot]
            .iter()
            .map(|&(j, w)| if j == slot { 2.0 * w } else { w })
            .sum()
    }

    pub(crate) fn self_loop_at(&self, slot: usize) -> f64 {
        find_weight(&self.adj[slot], slot).unwrap_or(0.0)
    }
}

fn find_weight(list: &[(usize, f64)], j: usize) -> Option<f64> {
    list.binary_search_by_key(&j, |&(k, _)| k)
        .ok()
        .map(|pos| list[pos].1)
}

fn write_half(list: &mut Vec<(usize, f64)>, j: usize, weight: f64, mode: WriteMode) {
    match list.binary_search_by_key(&j, |&(k, _)| k) {
        Ok(pos) => match mode {
            WriteMode::Accumulate => list[pos].1 += weight,
            WriteMode::Overwrite => list[pos].1 = weight,
        },
        Err(pos) => list.insert(pos, (j, weight)),
    }
}

#[cfg(feature = "petgraph")]
impl WeightedGraph {
    /// Build from a petgraph undirected graph. Node index `i` becomes id `i`.
    pub fn from_petgraph<N, E, F>(graph: &petgraph::graph::UnGraph<N, E>, weight: F) -> Self
    where
        F: Fn(&E) -> f64,
    {
        use petgraph::visit::EdgeRef;

        let mut out = Self::with_capacity(graph.node_count());
        for node in graph.node_indices() {
            out.add_node(node.index() as NodeId);
        }
        for edge in graph.edge_references() {
            out.add_edge(
                edge.source().index() as NodeId,
                edge.target().index() as NodeId,
                weight(edge.weight()),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_triangles() -> WeightedGraph {
        let mut g = WeightedGraph::new();
        for (a, b) in [(1, 2), (2, 3), (1, 3), (4, 5), (5, 6), (4, 6)] {
            g.add_edge(a, b, 1.0);
        }
        g
    }

    #[test]
    fn test_add_node_idempotent() {
        let mut g = WeightedGraph::new();
        g.add_node(7);
        g.add_node(7);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.degree(7).unwrap(), 0.0);
        assert_eq!(g.incident_edges(7).unwrap().count(), 0);
    }

    #[test]
    fn test_add_edge_accumulates() {
        let mut g = WeightedGraph::new();
        g.add_edge(1, 2, 1.5);
        g.add_edge(2, 1, 0.5);
        assert_eq!(g.edge_weight(1, 2, 0.0).unwrap(), 2.0);
        assert_eq!(g.edge_weight(2, 1, 0.0).unwrap(), 2.0);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.size(), 2.0);
        assert_eq!(g.edges().count(), 1);
    }

    #[test]
    fn test_self_loop_degree() {
        let mut g = WeightedGraph::new();
        g.add_edge(1, 1, 2.0);
        assert_eq!(g.degree(1).unwrap(), 4.0);
        assert_eq!(g.size(), 2.0);
        let loops: Vec<Edge> = g.edges().collect();
        assert_eq!(loops, vec![Edge { a: 1, b: 1, weight: 2.0 }]);
    }

    #[test]
    fn test_set_edge_overwrites_but_counts() {
        let mut g = WeightedGraph::new();
        g.add_edge(1, 2, 3.0);
        g.set_edge(2, 1, 1.0);
        assert_eq!(g.edge_weight(1, 2, 0.0).unwrap(), 1.0);
        assert_eq!(g.edge_weight(2, 1, 0.0).unwrap(), 1.0);
        // previous weight is not subtracted from the size
        assert_eq!(g.size(), 4.0);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_unknown_node_errors() {
        let g = two_triangles();
        assert!(matches!(g.degree(99), Err(Error::NodeNotFound(99))));
        assert!(matches!(g.incident_edges(99), Err(Error::NodeNotFound(99))));
        assert!(matches!(g.edge_weight(99, 1, 0.0), Err(Error::NodeNotFound(99))));
        // missing pair, or missing second node, falls back to the default
        assert_eq!(g.edge_weight(1, 4, -1.0).unwrap(), -1.0);
        assert_eq!(g.edge_weight(1, 99, -1.0).unwrap(), -1.0);
    }

    #[test]
    fn test_edges_once_each() {
        let g = two_triangles();
        let edges: Vec<Edge> = g.edges().collect();
        assert_eq!(edges.len(), 6);
        let total: f64 = edges.iter().map(|e| e.weight).sum();
        assert_eq!(total, g.size());
        // restartable
        assert_eq!(g.edges().count(), 6);
        assert_eq!(g.nodes().count(), 6);
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_edges_ordered_by_id() {
        let mut g = WeightedGraph::new();
        g.add_edge(5, 1, 1.0);
        g.add_edge(9, 3, 2.0);
        g.add_edge(3, 5, 0.5);
        let mut edges: Vec<(NodeId, NodeId)> = g.edges().map(|e| (e.a, e.b)).collect();
        assert!(edges.iter().all(|&(a, b)| a <= b), "{edges:?}");
        edges.sort_unstable();
        assert_eq!(edges, vec![(1, 5), (3, 5), (3, 9)]);
    }

    #[test]
    fn test_neighbors_and_emptiness() {
        let mut g = WeightedGraph::new();
        assert!(g.is_empty());
        g.add_node(4);
        assert!(!g.is_empty());
        assert_eq!(g.neighbors(4).unwrap().count(), 0);

        g.add_edge(4, 8, 1.0);
        g.add_edge(2, 4, 0.5);
        g.add_edge(4, 8, 1.0);
        g.add_edge(4, 4, 3.0);
        let mut around: Vec<(NodeId, f64)> = g.neighbors(4).unwrap().collect();
        around.sort_by_key(|&(n, _)| n);
        assert_eq!(around, vec![(2, 0.5), (4, 3.0), (8, 2.0)]);
        assert!(matches!(g.neighbors(99), Err(Error::NodeNotFound(99))));
    }

    #[test]
    fn test_incident_edges() {
        let g = two_triangles();
        let mut around: Vec<NodeId> = g.incident_edges(2).unwrap().map(|e| e.b).collect();
        around.sort_unstable();
        assert_eq!(around, vec![1, 3]);
        assert!(g.incident_edges(2).unwrap().all(|e| e.a == 2));
    }

    #[test]
    fn test_quotient_collapses_triangles() {
        let g = two_triangles();
        let partition: Partition = [(1, 10), (2, 10), (3, 10), (4, 20), (5, 20), (6, 20)]
            .into_iter()
            .collect();
        let q = g.quotient(&partition).unwrap();
        assert_eq!(q.node_count(), 2);
        assert_eq!(q.size(), g.size());
        assert_eq!(q.edge_weight(10, 10, 0.0).unwrap(), 3.0);
        assert_eq!(q.edge_weight(10, 20, 0.0).unwrap(), 0.0);
        assert_eq!(q.degree(10).unwrap(), 6.0);
    }

    #[test]
    fn test_quotient_rejects_partial_partition() {
        let g = two_triangles();
        let partition: Partition = [(1, 0), (2, 0), (3, 0), (4, 1), (5, 1)].into_iter().collect();
        assert!(matches!(
            g.quotient(&partition),
            Err(Error::MissingPartitionEntry(6))
        ));

        let mut stray = partition.clone();
        let _ = stray.insert(6, 1);
        let _ = stray.insert(42, 1);
        assert!(matches!(g.quotient(&stray), Err(Error::NodeNotFound(42))));
    }

    #[test]
    fn test_randomized_nodes_is_isomorphic() {
        let mut g = two_triangles();
        g.add_edge(3, 4, 0.25);
        g.add_edge(6, 6, 1.0);
        g.add_node(100);

        let mut rng = StdRng::seed_from_u64(7);
        let (shuffled, relabel) = g.randomized_nodes(&mut rng);

        assert_eq!(shuffled.node_count(), g.node_count());
        assert_eq!(shuffled.size(), g.size());
        assert_eq!(shuffled.edge_count(), g.edge_count());
        for e in g.edges() {
            let w = shuffled
                .edge_weight(relabel[&e.a], relabel[&e.b], 0.0)
                .unwrap();
            assert_eq!(w, e.weight);
        }
        for n in g.nodes() {
            assert_eq!(shuffled.degree(relabel[&n]).unwrap(), g.degree(n).unwrap());
        }
    }
}
