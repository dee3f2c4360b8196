//! Multi-level structure produced by repeated aggregation.
//!
//! Louvain does not return a single clustering so much as a stack of them:
//! each round of local moving is followed by a contraction, and the next round
//! works on communities instead of nodes. [`Dendrogram`] records that stack.
//!
//! ```text
//! Level    │ Domain                  │ Values
//! ─────────┼─────────────────────────┼──────────────────────
//! 0        │ original node ids       │ level-0 community ids
//! 1        │ level-0 community ids   │ level-1 community ids
//! ...      │                         │
//! L        │ level-(L-1) ids         │ final community ids
//! ```
//!
//! Use [`Dendrogram::partition_at_level`] to read the hierarchy at any depth,
//! and [`Dendrogram::best_partition`] for the coarsest, usually
//! highest-modularity, view.

mod dendrogram;

pub use dendrogram::Dendrogram;
