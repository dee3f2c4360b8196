//! Community detection by modularity optimization.
//!
//! Given a graph, find natural groupings where nodes within groups are
//! densely connected, and connections between groups are sparse.
//!
//! ## The Modularity Objective
//!
//! Louvain optimizes **modularity** Q, which compares the actual weight of
//! edges within communities to the expected weight in a random graph with the
//! same degree sequence:
//!
//! ```text
//! Q = (1/2m) × Σ[A_ij - γ(k_i × k_j)/(2m)] × δ(c_i, c_j)
//! ```
//!
//! Where:
//! - m = total edge weight (sum of all edges)
//! - A_ij = edge weight between i and j
//! - k_i = weighted degree of node i
//! - γ = resolution parameter
//! - δ(c_i, c_j) = 1 if i and j are in same community
//!
//! **Intuition**: For each pair in the same community, we add (actual edges) -
//! (expected edges). A good partition has Q > 0, meaning more internal edges
//! than expected by chance.
//!
//! ## The Resolution Parameter γ
//!
//! - **γ = 1**: Standard modularity (default)
//! - **γ > 1**: Smaller communities (higher penalty for merging)
//! - **γ < 1**: Larger communities (lower penalty for merging)
//!
//! Modularity has a **resolution limit**: it can't detect communities smaller
//! than about √(2m). Increasing γ helps find fine-grained structure.
//!
//! ## Pieces
//!
//! - [`Louvain`]: local moving (phase 1) and the level loop
//! - [`modularity()`]: score any [`Partition`] against a graph
//! - aggregation (phase 2) is [`WeightedGraph::quotient`](crate::graph::WeightedGraph::quotient)
//! - [`renumber`], [`communities`], [`community_sizes`]: partition helpers
//!
//! ## Usage
//!
//! ```rust
//! use louvain::community::Louvain;
//! use louvain::graph::WeightedGraph;
//!
//! let mut graph = WeightedGraph::new();
//! for (a, b) in [(1, 2), (2, 3), (1, 3), (4, 5), (5, 6), (4, 6)] {
//!     graph.add_edge(a, b, 1.0);
//! }
//!
//! let partition = Louvain::new().with_seed(7).best_partition(&graph).unwrap();
//! assert_eq!(partition[&1], partition[&3]);
//! assert_ne!(partition[&1], partition[&4]);
//! ```
//!
//! ## References
//!
//! - Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! - Newman & Girvan (2004). "Finding and evaluating community structure in networks."

mod aggregate;
mod louvain;
mod modularity;
mod partition;

#[cfg(feature = "petgraph")]
mod traits;

pub use louvain::{best_partition, Louvain};
pub use modularity::modularity;
pub use partition::{communities, community_count, community_sizes, renumber, Partition};

#[cfg(feature = "petgraph")]
pub use traits::CommunityDetection;
