//! # louvain
//!
//! Community detection on weighted undirected graphs by greedy modularity
//! maximization (the Louvain multilevel method).
//!
//! - [`graph`]: [`WeightedGraph`], the mutable weighted adjacency model
//! - [`community`]: local moving, aggregation, modularity, partitions
//! - [`hierarchy`]: the [`Dendrogram`] of levels and its composition
//!
//! ```rust
//! use louvain::{best_partition, WeightedGraph};
//!
//! let mut graph = WeightedGraph::new();
//! graph.add_edge(1, 2, 1.0);
//! graph.add_edge(2, 3, 1.0);
//! graph.add_edge(3, 1, 1.0);
//!
//! let partition = best_partition(&graph).unwrap();
//! assert_eq!(partition.len(), 3);
//! ```
//!
//! The `petgraph` feature (on by default) adds [`WeightedGraph::from_petgraph`]
//! and the [`CommunityDetection`] trait.

pub mod community;
/// Error types used across `louvain`.
pub mod error;
pub mod graph;
pub mod hierarchy;

pub use community::{best_partition, modularity, Louvain, Partition};
pub use error::{Error, Result};
pub use graph::{Edge, NodeId, WeightedGraph};
pub use hierarchy::Dendrogram;

#[cfg(feature = "petgraph")]
pub use community::CommunityDetection;
