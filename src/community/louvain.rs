//! Louvain algorithm for community detection.
//!
//! Fast modularity optimization through local node moves and graph aggregation.
//!
//! ## The Algorithm (Blondel et al. 2008)
//!
//! Louvain is a multi-level, greedy modularity optimization algorithm:
//!
//! 1. **Phase 1 (Local Moving)**: Start with each node in its own community.
//!    Sweep the nodes in random order, moving each one to the neighboring
//!    community with the highest modularity gain. Repeat sweeps ("passes")
//!    until a pass moves nothing or gains less than `min_modularity_gain`.
//!
//! 2. **Phase 2 (Aggregation)**: Build a meta-graph where communities become
//!    single nodes. Edge weights are sums of edges between communities.
//!    Self-loops represent internal community edges.
//!
//! 3. **Iterate**: Repeat phases 1-2 on the meta-graph until a round of local
//!    moving merges nothing. Every round that did merge becomes one level of
//!    the [`Dendrogram`].
//!
//! ## Gain
//!
//! For node `i` with weighted degree `k_i`, taken out of its community, the
//! gain of joining community `C` is compared in the proportional form
//!
//! ```text
//! gain(i -> C) = k_i,C  -  γ · k_i · Σtot_C / 2m
//! ```
//!
//! where `k_i,C` is the weight from `i` into `C` and `Σtot_C` the total degree
//! of `C` without `i`. Staying put is one of the candidates; ties go to staying,
//! then to the lowest community id.
//!
//! ## Determinism
//!
//! All randomness comes from the generator handed to
//! [`Louvain::dendrogram_with_rng`] (or one seeded from [`Louvain::with_seed`]).
//! Same graph + same seed gives the same partition.
//!
//! ## References
//!
//! Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! Journal of Statistical Mechanics: Theory and Experiment, P10008.

use super::aggregate::aggregate;
use super::modularity::modularity;
use super::partition::{renumber, Partition};
use crate::error::{Error, Result};
use crate::graph::{NodeId, WeightedGraph};
use crate::hierarchy::Dendrogram;
use log::{debug, log_enabled, trace, warn, Level};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::borrow::Cow;
use std::collections::HashMap;

#[cfg(feature = "petgraph")]
use super::traits::CommunityDetection;
#[cfg(feature = "petgraph")]
use petgraph::graph::UnGraph;

/// Louvain community detection algorithm.
#[derive(Debug, Clone)]
pub struct Louvain {
    /// Resolution parameter (gamma).
    resolution: f64,
    /// Maximum local-moving passes per level.
    max_passes: usize,
    /// Optional cap on dendrogram depth.
    max_levels: Option<usize>,
    /// Minimum modularity improvement for another pass.
    min_modularity_gain: f64,
    /// Seed for the scan-order generator.
    seed: u64,
}

impl Louvain {
    /// Create a new Louvain detector with default settings.
    pub fn new() -> Self {
        Self {
            resolution: 1.0,
            max_passes: 1000,
            max_levels: None,
            min_modularity_gain: 1e-7,
            seed: 42,
        }
    }

    /// Set resolution parameter.
    ///
    /// Higher values produce smaller communities.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the pass limit per level.
    ///
    /// A safety net against oscillation near the gain threshold; hitting it is
    /// logged, not reported.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Stop after `levels` dendrogram levels.
    pub fn with_max_levels(mut self, levels: usize) -> Self {
        self.max_levels = Some(levels);
        self
    }

    /// Set the minimum modularity gain a pass must achieve to run another.
    pub fn with_min_modularity_gain(mut self, min_gain: f64) -> Self {
        self.min_modularity_gain = min_gain;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(Error::InvalidParameter {
                name: "resolution",
                message: "must be finite and positive",
            });
        }
        if self.min_modularity_gain.is_nan() || self.min_modularity_gain < 0.0 {
            return Err(Error::InvalidParameter {
                name: "min_modularity_gain",
                message: "must be non-negative",
            });
        }
        if self.max_passes == 0 {
            return Err(Error::InvalidParameter {
                name: "max_passes",
                message: "must be at least 1",
            });
        }
        if self.max_levels == Some(0) {
            return Err(Error::InvalidParameter {
                name: "max_levels",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Community of every node at the coarsest level, ids `0..k`.
    pub fn best_partition(&self, graph: &WeightedGraph) -> Result<Partition> {
        self.dendrogram(graph)?.best_partition()
    }

    /// [`best_partition`](Self::best_partition) drawing from a caller-owned generator.
    pub fn best_partition_with_rng<R: Rng + ?Sized>(
        &self,
        graph: &WeightedGraph,
        rng: &mut R,
    ) -> Result<Partition> {
        self.dendrogram_with_rng(graph, rng)?.best_partition()
    }

    /// Full level hierarchy, seeded from [`with_seed`](Self::with_seed).
    pub fn dendrogram(&self, graph: &WeightedGraph) -> Result<Dendrogram> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.dendrogram_with_rng(graph, &mut rng)
    }

    /// Full level hierarchy drawing from a caller-owned generator.
    ///
    /// A graph on which nothing merges (no edges, or no profitable move) yields
    /// a single level with every node in its own community.
    pub fn dendrogram_with_rng<R: Rng + ?Sized>(
        &self,
        graph: &WeightedGraph,
        rng: &mut R,
    ) -> Result<Dendrogram> {
        self.validate()?;

        let mut dendrogram = Dendrogram::new();
        let mut current: Cow<'_, WeightedGraph> = Cow::Borrowed(graph);

        loop {
            let level = dendrogram.len();
            let n = current.node_count();

            let (shuffled, relabel) = current.randomized_nodes(rng);
            let found = self.local_moving(&shuffled);
            let partition = renumber(&pull_back(&relabel, &found.partition)?);

            if found.communities == n {
                debug!("level {level}: no merges among {n} nodes");
                if dendrogram.is_empty() {
                    dendrogram.push_level(partition)?;
                }
                break;
            }

            if log_enabled!(Level::Debug) {
                let q = modularity(&current, &partition, self.resolution)?;
                debug!(
                    "level {level}: {n} nodes -> {} communities in {} passes, modularity {q:.6}",
                    found.communities, found.passes
                );
            }

            let next = aggregate(&current, partition)?;
            dendrogram.push_level(next.partition)?;

            if self.max_levels.is_some_and(|max| dendrogram.len() >= max) {
                debug!("level cap {} reached", dendrogram.len());
                break;
            }
            if next.graph.node_count() >= n {
                break;
            }
            current = Cow::Owned(next.graph);
        }

        Ok(dendrogram)
    }

    /// Phase 1: local moving on one level's graph.
    ///
    /// Nodes are swept in slot order; callers randomize that order by handing
    /// in a [`WeightedGraph::randomized_nodes`] copy.
    fn local_moving(&self, graph: &WeightedGraph) -> LocalMoves {
        let n = graph.node_count();
        let mut state = CommunityState::singletons(graph);
        if state.size == 0.0 {
            return state.into_moves(graph, 0);
        }

        let two_m = 2.0 * state.size;
        let mut weights: HashMap<usize, f64> = HashMap::new();
        let mut current_q = state.modularity(self.resolution);
        let mut passes = 0;

        loop {
            if passes == self.max_passes {
                warn!(
                    "local moving stopped after {passes} passes on {n} nodes without converging"
                );
                break;
            }
            passes += 1;

            let mut moves = 0usize;
            for node in 0..n {
                let own = state.assignment[node];
                let k = state.degrees[node];

                weights.clear();
                for &(neighbor, w) in graph.neighbors_at(node) {
                    if neighbor != node {
                        *weights.entry(state.assignment[neighbor]).or_insert(0.0) += w;
                    }
                }

                let to_own = weights.get(&own).copied().unwrap_or(0.0);
                state.remove(node, own, to_own);

                let gain = |comm: usize, w: f64| {
                    w - self.resolution * k * state.total_degree[comm] / two_m
                };
                let mut best = own;
                let mut best_gain = gain(own, to_own);
                for (&comm, &w) in &weights {
                    if comm == own {
                        continue;
                    }
                    let g = gain(comm, w);
                    let wins_tie =
                        g == best_gain && best != own && graph.id_at(comm) < graph.id_at(best);
                    if g > best_gain || wins_tie {
                        best = comm;
                        best_gain = g;
                    }
                }

                let to_best = weights.get(&best).copied().unwrap_or(0.0);
                state.insert(node, best, to_best);
                if best != own {
                    moves += 1;
                }
            }

            let new_q = state.modularity(self.resolution);
            trace!("pass {passes}: {moves} moves, modularity {current_q:.6} -> {new_q:.6}");
            if moves == 0 || new_q - current_q < self.min_modularity_gain {
                break;
            }
            current_q = new_q;
        }

        state.into_moves(graph, passes)
    }

    /// Get the resolution parameter.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }
}

impl Default for Louvain {
    fn default() -> Self {
        Self::new()
    }
}

/// Best partition of `graph` with default settings.
pub fn best_partition(graph: &WeightedGraph) -> Result<Partition> {
    Louvain::new().best_partition(graph)
}

/// Outcome of one local-moving run, community ids taken from member node ids.
#[derive(Debug)]
struct LocalMoves {
    partition: Partition,
    communities: usize,
    passes: usize,
}

/// Per-community aggregates for one local-moving run.
///
/// Indexed by graph slot; community `c` starts as the singleton of slot `c`.
struct CommunityState {
    /// Community of each node.
    assignment: Vec<usize>,
    /// Σtot: total weighted degree in each community.
    total_degree: Vec<f64>,
    /// Σin: edge weight inside each community, self-loops once.
    internal: Vec<f64>,
    degrees: Vec<f64>,
    self_loops: Vec<f64>,
    size: f64,
}

impl CommunityState {
    fn singletons(graph: &WeightedGraph) -> Self {
        let n = graph.node_count();
        let degrees: Vec<f64> = (0..n).map(|i| graph.degree_at(i)).collect();
        let self_loops: Vec<f64> = (0..n).map(|i| graph.self_loop_at(i)).collect();
        Self {
            assignment: (0..n).collect(),
            total_degree: degrees.clone(),
            internal: self_loops.clone(),
            degrees,
            self_loops,
            size: graph.size(),
        }
    }

    /// Take `node` out of `comm`; `weight_in` is its edge weight into `comm`.
    fn remove(&mut self, node: usize, comm: usize, weight_in: f64) {
        self.total_degree[comm] -= self.degrees[node];
        self.internal[comm] -= weight_in + self.self_loops[node];
    }

    fn insert(&mut self, node: usize, comm: usize, weight_in: f64) {
        self.assignment[node] = comm;
        self.total_degree[comm] += self.degrees[node];
        self.internal[comm] += weight_in + self.self_loops[node];
    }

    fn modularity(&self, resolution: f64) -> f64 {
        let m = self.size;
        self.internal
            .iter()
            .zip(&self.total_degree)
            .map(|(&inside, &tot)| inside / m - resolution * (tot / (2.0 * m)).powi(2))
            .sum()
    }

    fn into_moves(self, graph: &WeightedGraph, passes: usize) -> LocalMoves {
        let mut used = vec![false; self.assignment.len()];
        let mut communities = 0;
        let partition = self
            .assignment
            .iter()
            .enumerate()
            .map(|(node, &comm)| {
                if !used[comm] {
                    used[comm] = true;
                    communities += 1;
                }
                (graph.id_at(node), graph.id_at(comm))
            })
            .collect();
        LocalMoves {
            partition,
            communities,
            passes,
        }
    }
}

/// Map a partition of a relabeled graph back onto the original ids.
fn pull_back(relabel: &HashMap<NodeId, NodeId>, partition: &Partition) -> Result<Partition> {
    relabel
        .iter()
        .map(|(&original, new)| {
            partition
                .get(new)
                .map(|&comm| (original, comm))
                .ok_or(Error::MissingPartitionEntry(*new))
        })
        .collect()
}

#[cfg(feature = "petgraph")]
impl CommunityDetection for Louvain {
    fn detect<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>> {
        let weighted = WeightedGraph::from_petgraph(graph, |_| 1.0);
        let best = self.best_partition(&weighted)?;
        (0..graph.node_count())
            .map(|i| {
                let id = i as NodeId;
                best.get(&id)
                    .map(|&comm| comm as usize)
                    .ok_or(Error::MissingPartitionEntry(id))
            })
            .collect()
    }

    fn resolution(&self) -> f64 {
        self.resolution
    }
}
