use louvain::community::{community_sizes, modularity, Louvain};
use louvain::WeightedGraph;
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Adjacency list in, community sizes out:
    //
    //   cargo run --example adjacency_communities -- graph.txt [seed]
    //
    // Each line of the input names a node followed by its neighbors. Set
    // RUST_LOG=debug to see one line per dendrogram level.
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: adjacency_communities <adjacency-list> [seed]")?;
    let seed: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => 42,
    };

    let graph = WeightedGraph::from_adjacency_list(BufReader::new(File::open(&path)?))?;
    println!(
        "n_nodes={} n_edges={} size={}",
        graph.node_count(),
        graph.edge_count(),
        graph.size()
    );

    let louvain = Louvain::new().with_seed(seed);
    let dendrogram = louvain.dendrogram(&graph)?;
    let partition = dendrogram.best_partition()?;

    println!("levels={}", dendrogram.len());
    println!("modularity={:.6}", modularity(&graph, &partition, louvain.resolution())?);

    let sizes = community_sizes(&partition);
    println!("communities={}", sizes.len());
    for (cid, size) in sizes {
        println!("  community {}: {} nodes", cid, size);
    }

    Ok(())
}
