use louvain::community::{community_count, modularity, Louvain};
use louvain::{NodeId, Partition, WeightedGraph};
use proptest::prelude::*;

fn singletons(graph: &WeightedGraph) -> Partition {
    graph.nodes().map(|n| (n, n)).collect()
}

/// Random graph with integer-valued weights (exact float sums) and a few isolated nodes.
fn arb_graph() -> impl Strategy<Value = WeightedGraph> {
    (
        proptest::collection::vec((0u64..24, 0u64..24, 1u32..5), 0..80),
        proptest::collection::vec(24u64..30, 0..3),
    )
        .prop_map(|(edges, isolated)| {
            let mut g = WeightedGraph::new();
            for (a, b, w) in edges {
                g.add_edge(a, b, f64::from(w));
            }
            for n in isolated {
                g.add_node(n);
            }
            g
        })
}

proptest! {
    #[test]
    fn size_is_half_the_degree_sum(graph in arb_graph()) {
        let degrees: f64 = graph.nodes().map(|n| graph.degree(n).unwrap()).sum();
        prop_assert_eq!(2.0 * graph.size(), degrees);
        prop_assert_eq!(graph.edges().map(|e| e.weight).sum::<f64>(), graph.size());
    }

    #[test]
    fn quotient_conserves_weight(graph in arb_graph(), k in 1u64..6) {
        let partition: Partition = graph.nodes().map(|n| (n, n % k)).collect();
        let quotient = graph.quotient(&partition).unwrap();
        prop_assert_eq!(quotient.size(), graph.size());
        prop_assert_eq!(quotient.node_count(), community_count(&partition));
    }

    #[test]
    fn same_seed_same_partition(graph in arb_graph(), seed in any::<u64>()) {
        let louvain = Louvain::new().with_seed(seed);
        let a = louvain.best_partition(&graph).unwrap();
        let b = louvain.best_partition(&graph).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), graph.node_count());
    }

    #[test]
    fn levels_beat_their_trivial_partition(graph in arb_graph(), seed in any::<u64>()) {
        let dendrogram = Louvain::new().with_seed(seed).dendrogram(&graph).unwrap();
        let mut level_graph = graph.clone();
        for partition in dendrogram.levels() {
            let found = modularity(&level_graph, partition, 1.0).unwrap();
            let trivial = modularity(&level_graph, &singletons(&level_graph), 1.0).unwrap();
            prop_assert!(found >= trivial - 1e-9, "{} < {}", found, trivial);
            level_graph = level_graph.quotient(partition).unwrap();
        }

        let best = dendrogram.best_partition().unwrap();
        let q = modularity(&graph, &best, 1.0).unwrap();
        let q0 = modularity(&graph, &singletons(&graph), 1.0).unwrap();
        prop_assert!(q >= q0 - 1e-9);
    }

    #[test]
    fn best_partition_is_a_fixed_point(graph in arb_graph(), seed in any::<u64>()) {
        let louvain = Louvain::new().with_seed(seed);
        let best = louvain.best_partition(&graph).unwrap();
        let collapsed = graph.quotient(&best).unwrap();

        let again = louvain.with_seed(seed.wrapping_add(1)).best_partition(&collapsed).unwrap();
        prop_assert_eq!(community_count(&again), collapsed.node_count());
    }

    #[test]
    fn randomized_nodes_preserves_degrees(graph in arb_graph(), seed in any::<u64>()) {
        use rand::{rngs::StdRng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(seed);
        let (shuffled, relabel) = graph.randomized_nodes(&mut rng);
        prop_assert_eq!(shuffled.node_count(), graph.node_count());
        for n in graph.nodes() {
            let m: NodeId = relabel[&n];
            prop_assert_eq!(shuffled.degree(m).unwrap(), graph.degree(n).unwrap());
        }
    }
}
