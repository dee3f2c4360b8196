//! Dendrogram of Louvain levels.
//!
//! Level 0 maps original nodes to their first communities; level `k + 1` maps
//! the communities of level `k` to coarser ones. Levels only merge, never
//! split:
//!
//! ```text
//! level 1:        0               1
//!               /   \             |
//! level 0:     0     1            2
//!             /|\   / \          /|\
//! nodes:     a b c d   e        f g h
//! ```
//!
//! Composing levels `0..=k` gives the partition of the original nodes at that
//! resolution; composing all of them gives the best partition.

use crate::community::Partition;
use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// Ordered sequence of partitions, finest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dendrogram {
    levels: Vec<Partition>,
}

impl Dendrogram {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a coarser level.
    ///
    /// The new level's domain must be exactly the set of community ids of the
    /// current top level.
    pub(crate) fn push_level(&mut self, partition: Partition) -> Result<()> {
        if let Some(top) = self.levels.last() {
            let produced: BTreeSet<_> = top.values().copied().collect();
            if let Some(&missing) = produced.iter().find(|c| !partition.contains_key(*c)) {
                return Err(Error::MissingPartitionEntry(missing));
            }
            if partition.len() != produced.len() {
                return Err(Error::InvalidParameter {
                    name: "partition",
                    message: "level covers ids the previous level never produced",
                });
            }
        }
        self.levels.push(partition);
        Ok(())
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True if no level was recorded.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Raw per-level partitions, finest first.
    pub fn levels(&self) -> &[Partition] {
        &self.levels
    }

    /// Raw partition of one level.
    pub fn level(&self, level: usize) -> Option<&Partition> {
        self.levels.get(level)
    }

    /// Number of original nodes.
    pub fn n_items(&self) -> usize {
        self.levels.first().map_or(0, |p| p.len())
    }

    /// Partition of the original nodes after composing levels `0..=level`.
    pub fn partition_at_level(&self, level: usize) -> Result<Partition> {
        if level >= self.levels.len() {
            return Err(Error::LevelOutOfRange {
                level,
                depth: self.levels.len(),
            });
        }
        let mut composed = self.levels[0].clone();
        for upper in &self.levels[1..=level] {
            for comm in composed.values_mut() {
                *comm = upper
                    .get(comm)
                    .copied()
                    .ok_or(Error::MissingPartitionEntry(*comm))?;
            }
        }
        Ok(composed)
    }

    /// Partition of the original nodes at the coarsest level.
    ///
    /// Empty for an empty dendrogram.
    pub fn best_partition(&self) -> Result<Partition> {
        match self.levels.len() {
            0 => Ok(Partition::new()),
            depth => self.partition_at_level(depth - 1),
        }
    }
}
