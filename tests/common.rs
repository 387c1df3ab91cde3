#![allow(dead_code)]

use graphkit::prelude::*;
use quickcheck::{Arbitrary, Gen};

/// Builds a graph with one node per label and a `TwoWay` connection for each
/// `(a, b, weight)` triple, indexing into `labels`.
pub fn build(labels: &[&str], edges: &[(usize, usize, Weight)]) -> (Graph, Vec<Node>) {
    let mut graph = Graph::new();
    let nodes: Vec<Node> = labels.iter().map(|label| Node::new(*label)).collect();
    for node in &nodes {
        graph.add_node(node).unwrap();
    }
    for &(a, b, weight) in edges {
        graph.connect_weighted(&nodes[a], &nodes[b], weight).unwrap();
    }
    (graph, nodes)
}

/// A random graph recipe: a node count and a list of weighted pairs.
/// Self-loops and repeated pairs are dropped when the graph is built.
#[derive(Debug, Clone)]
pub struct ArbGraph {
    pub num_nodes: usize,
    pub edges: Vec<(usize, usize, Weight)>,
}

impl Arbitrary for ArbGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_nodes = 1 + usize::arbitrary(g) % 10;
        let num_edges = usize::arbitrary(g) % 25;
        let edges = (0..num_edges)
            .map(|_| {
                (
                    usize::arbitrary(g) % num_nodes,
                    usize::arbitrary(g) % num_nodes,
                    Weight::from(u8::arbitrary(g) % 10),
                )
            })
            .collect();
        ArbGraph { num_nodes, edges }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let num_nodes = self.num_nodes;
        Box::new(self.edges.shrink().map(move |edges| ArbGraph { num_nodes, edges }))
    }
}

impl ArbGraph {
    pub fn build(&self) -> (Graph, Vec<Node>) {
        let mut graph = Graph::new();
        let nodes: Vec<Node> = (0..self.num_nodes)
            .map(|i| Node::new(format!("n{i}")))
            .collect();
        for node in &nodes {
            graph.add_node(node).unwrap();
        }
        for &(a, b, weight) in &self.edges {
            if a != b && !graph.is_connected(&nodes[a], &nodes[b]) {
                graph.connect_weighted(&nodes[a], &nodes[b], weight).unwrap();
            }
        }
        (graph, nodes)
    }
}
