//! Loads a Pajek file (or generates a random graph) and prints a summary of
//! what the analysis algorithms find in it.
//!
//! Usage:
//!   cargo run --example graph_report -- path/to/graph.net
//!   cargo run --example graph_report -- --vertices 50 --connections 120 --connected
//!   cargo run --example graph_report -- graph.net --from A --to D -vv --timings

use std::process;

use clap::Parser;
use graphkit::{
    generate::{RandomGraphConfig, random_graph},
    pajek::load_pajek,
    prelude::*,
    tracing_support::{dump_method_timings, init_tracing},
};

/// Print a summary of a graph read from a Pajek file or generated at random.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input Pajek file; a random graph is generated when omitted
    input: Option<String>,

    /// Number of nodes in a generated graph
    #[arg(long, default_value_t = 20)]
    vertices: usize,

    /// Number of connections in a generated graph
    #[arg(long, default_value_t = 40)]
    connections: usize,

    /// Make the generated graph connected
    #[arg(long)]
    connected: bool,

    /// Seed for the generator
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Label of the start node for a shortest-path query
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// Label of the end node for a shortest-path query
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print per-method timings at the end
    #[arg(long)]
    timings: bool,
}

fn load(args: &Args) -> Result<Graph, String> {
    match &args.input {
        Some(path) => load_pajek(path).map_err(|e| format!("{path}: {e}")),
        None => random_graph(&RandomGraphConfig {
            vertices: args.vertices,
            connections: args.connections,
            strongly_connected: args.connected,
            seed: args.seed,
            ..RandomGraphConfig::default()
        })
        .map_err(|e| e.to_string()),
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let graph = match load(&args) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    println!("Nodes: {}", graph.size());
    println!("Edges: {}", graph.edge_count());
    println!("Cyclic: {}", graph.is_cyclic());
    println!("Strongly connected: {}", graph.is_strongly_connected());
    #[cfg(feature = "pathfinding")]
    println!("Components: {}", graph.connected_components().len());

    let tree = graph.kruskal();
    println!(
        "Minimum spanning forest: {} edges, weight {}",
        tree.edges().len(),
        tree.weight()
    );

    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        let (Some(a), Some(b)) = (graph.find_by_label(from), graph.find_by_label(to)) else {
            eprintln!("error: no node labelled {from:?} or {to:?}");
            process::exit(1);
        };
        let result = graph.dijkstra(a, b);
        if result.is_reachable() {
            println!(
                "Shortest path {from} -> {to}: {} (distance {})",
                result.path().labels().join(" -> "),
                result.distance()
            );
        } else {
            println!("No path from {from} to {to}");
        }
    }

    if args.timings {
        dump_method_timings();
    }
}
