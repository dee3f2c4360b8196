use crate::graph::NodeId;

/// Result alias for `louvain`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by graph queries, aggregation and the Louvain driver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A node was queried that was never added to the graph.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// A partition has no community for a node it was required to cover.
    #[error("partition has no entry for node {0}")]
    MissingPartitionEntry(NodeId),

    /// A dendrogram level past the coarsest one was requested.
    #[error("dendrogram level {level} out of range (depth {depth})")]
    LevelOutOfRange {
        /// Requested level.
        level: usize,
        /// Number of levels in the dendrogram.
        depth: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Malformed adjacency-list input.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Reading adjacency-list input failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
