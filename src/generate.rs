use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    connection::{Connection, Weight},
    graph::Graph,
    node::Node,
    tracing_support::{debug, info_span},
};

/// Default upper bound (exclusive) for random connection weights.
pub const DEFAULT_MAX_WEIGHT: Weight = 32;

/// Parameters for [`random_graph`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomGraphConfig {
    /// Number of nodes.
    pub vertices: usize,
    /// Number of connections in the result.
    pub connections: usize,
    /// Start from a random spanning tree so that every node is reachable.
    pub strongly_connected: bool,
    pub seed: u64,
    /// Weights are drawn from `0..max_weight`.
    pub max_weight: Weight,
}

impl Default for RandomGraphConfig {
    fn default() -> Self {
        Self {
            vertices: 0,
            connections: 0,
            strongly_connected: false,
            seed: 0,
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }
}

/// Rejected generator configurations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("a connected graph of this size needs at least {required} connections, not {requested}")]
    TooFewConnections { requested: usize, required: usize },
    #[error("at most {max} connections fit in a graph of this size, not {requested}")]
    TooManyConnections { requested: usize, max: usize },
    #[error("maximum weight must be positive, not {0}")]
    NonPositiveMaxWeight(Weight),
}

/// Builds a random graph of `TwoWay` connections labelled
/// [`GENERIC_LABEL`](crate::connection::GENERIC_LABEL), between nodes
/// labelled `"Node 1"` to `"Node N"`.
///
/// When `strongly_connected` is set, every pair of nodes is first connected,
/// then everything outside a [`Graph::kruskal`] spanning tree is removed
/// again.  Random connections are then added between unconnected pairs
/// until there are `connections` of them.  The same configuration always
/// produces the same graph.
pub fn random_graph(config: &RandomGraphConfig) -> Result<Graph, GenerateError> {
    let _span = info_span!(
        "random_graph",
        vertices = config.vertices,
        connections = config.connections
    )
    .entered();

    let n = config.vertices;
    let max = n * n.saturating_sub(1) / 2;
    if config.connections > max {
        return Err(GenerateError::TooManyConnections {
            requested: config.connections,
            max,
        });
    }
    let required = n.saturating_sub(1);
    if config.strongly_connected && config.connections < required {
        return Err(GenerateError::TooFewConnections {
            requested: config.connections,
            required,
        });
    }
    if config.max_weight <= 0 {
        return Err(GenerateError::NonPositiveMaxWeight(config.max_weight));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut graph = Graph::new();
    let nodes: Vec<Node> = (1..=n).map(|i| Node::new(format!("Node {i}"))).collect();
    for node in &nodes {
        add(&mut graph, node);
    }

    if config.strongly_connected {
        for i in 0..n {
            for j in (i + 1)..n {
                let weight = rng.gen_range(0..config.max_weight);
                link(&mut graph, &nodes[i], &nodes[j], weight);
            }
        }
        let tree = graph.kruskal();
        let pruned: Vec<(Node, Node)> = graph
            .edges()
            .filter(|(eid, _)| !tree.contains_edge(*eid))
            .filter_map(|(_, conn)| {
                let (a, b) = conn.endpoints()?;
                Some((a.clone(), b.clone()))
            })
            .collect();
        for (a, b) in &pruned {
            unlink(&mut graph, a, b);
        }
        debug!(kept = graph.edge_count(), "pruned to spanning tree");
    }

    while graph.edge_count() < config.connections {
        let a = &nodes[rng.gen_range(0..n)];
        let b = &nodes[rng.gen_range(0..n)];
        if a == b || graph.is_connected(a, b) {
            continue;
        }
        let weight = rng.gen_range(0..config.max_weight);
        link(&mut graph, a, b, weight);
    }

    Ok(graph)
}

fn add(graph: &mut Graph, node: &Node) {
    let added = graph.add_node(node);
    debug_assert!(added.is_ok(), "fresh node rejected: {added:?}");
}

fn link(graph: &mut Graph, a: &Node, b: &Node, weight: Weight) {
    let linked = graph.connect(a, b, Connection::generic(weight));
    debug_assert!(linked.is_ok(), "fresh pair rejected: {linked:?}");
}

fn unlink(graph: &mut Graph, a: &Node, b: &Node) {
    let unlinked = graph.disconnect(a, b);
    debug_assert!(unlinked.is_ok(), "pruned pair was not connected: {unlinked:?}");
}
