//! Node-to-community mappings.

use crate::graph::NodeId;
use std::collections::{BTreeMap, HashMap};

/// Mapping from node id to community id.
///
/// Ordered by node id, so iteration (and [`renumber`]) is deterministic.
/// Community ids need not be dense.
pub type Partition = BTreeMap<NodeId, NodeId>;

/// Renumber communities to consecutive ids starting at 0.
///
/// Ids are handed out in order of first appearance when walking nodes in
/// ascending order.
pub fn renumber(partition: &Partition) -> Partition {
    let mut mapping: HashMap<NodeId, NodeId> = HashMap::new();
    partition
        .iter()
        .map(|(&node, &comm)| {
            let next = mapping.len() as NodeId;
            (node, *mapping.entry(comm).or_insert(next))
        })
        .collect()
}

/// Number of distinct communities.
pub fn community_count(partition: &Partition) -> usize {
    let mut ids: Vec<NodeId> = partition.values().copied().collect();
    ids.sort_unstable();
    ids.dedup();
    ids.len()
}

/// Members of each community, sorted.
pub fn communities(partition: &Partition) -> BTreeMap<NodeId, Vec<NodeId>> {
    let mut out: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    for (&node, &comm) in partition {
        out.entry(comm).or_default().push(node);
    }
    out
}

/// Size of each community.
pub fn community_sizes(partition: &Partition) -> BTreeMap<NodeId, usize> {
    let mut out: BTreeMap<NodeId, usize> = BTreeMap::new();
    for &comm in partition.values() {
        *out.entry(comm).or_insert(0) += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renumber_first_appearance() {
        let p: Partition = [(1, 40), (2, 7), (3, 40), (9, 12)].into_iter().collect();
        let r = renumber(&p);
        assert_eq!(r.values().copied().collect::<Vec<_>>(), vec![0, 1, 0, 2]);
        assert_eq!(community_count(&r), 3);
    }

    #[test]
    fn test_communities_and_sizes() {
        let p: Partition = [(5, 1), (2, 0), (3, 1), (4, 1)].into_iter().collect();
        let groups = communities(&p);
        assert_eq!(groups[&0], vec![2]);
        assert_eq!(groups[&1], vec![3, 4, 5]);
        let sizes = community_sizes(&p);
        assert_eq!(sizes[&1], 3);
        assert_eq!(sizes.values().sum::<usize>(), p.len());
    }
}
