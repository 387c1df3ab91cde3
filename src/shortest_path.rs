use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;

use crate::{
    connection::Weight,
    graph::Graph,
    node::Node,
    path::Path,
    tracing_support::{debug, info_span, trace},
};

/// Tentative distance of a node that has not been reached.
const UNREACHED: Weight = Weight::MAX;

/// Options for [`Graph::dijkstra_with`].
#[derive(Clone, Debug, Default)]
pub struct DijkstraOptions {
    /// Relax edges by `1 / weight` in integer arithmetic instead of by
    /// `weight`.  Any weight above 1 costs 0, and a weight of 0 makes the
    /// edge impassable.
    pub inverted: bool,
    /// Nodes excluded from the search.
    pub ignore: HashSet<Node>,
}

impl DijkstraOptions {
    pub fn inverted() -> Self {
        Self {
            inverted: true,
            ..Self::default()
        }
    }

    pub fn ignoring(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self {
            ignore: nodes.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// Result of a single-pair shortest path query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPath {
    path: Path,
    distance: Weight,
    reachable: bool,
}

impl ShortestPath {
    fn unconsidered() -> Self {
        Self {
            path: Path::default(),
            distance: 0,
            reachable: false,
        }
    }

    /// The reconstructed path.  When the target was not reached this is just
    /// the target itself, and when either end was excluded from the search it
    /// is empty.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> Path {
        self.path
    }

    /// Sum of the connection weights along [`Self::path`], saturating at
    /// the bounds of [`Weight`].
    pub fn distance(&self) -> Weight {
        self.distance
    }

    /// Whether the path actually leads from the source to the target.
    pub fn is_reachable(&self) -> bool {
        self.reachable
    }
}

/// Cost of crossing an edge of the given weight.
fn edge_cost(weight: Weight, inverted: bool) -> Weight {
    if inverted {
        1i32.checked_div(weight).unwrap_or(UNREACHED)
    } else {
        weight
    }
}

/// Shortest known distances between every pair of nodes, indexed by node
/// position in [`Graph::nodes`] order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceMatrix {
    nodes: Vec<Node>,
    distances: Vec<Vec<Option<Weight>>>,
}

impl DistanceMatrix {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Distance between the nodes at positions `i` and `j`, or `None` if
    /// there is no path (or either index is out of range).
    pub fn get(&self, i: usize, j: usize) -> Option<Weight> {
        *self.distances.get(i)?.get(j)?
    }

    /// Distance between two nodes, or `None` if there is no path.
    pub fn distance(&self, from: &Node, to: &Node) -> Option<Weight> {
        let i = self.nodes.iter().position(|node| node == from)?;
        let j = self.nodes.iter().position(|node| node == to)?;
        self.get(i, j)
    }

    pub fn rows(&self) -> &[Vec<Option<Weight>>] {
        &self.distances
    }
}

impl Graph {
    /// Shortest path from `from` to `to` with default options.
    pub fn dijkstra(&self, from: &Node, to: &Node) -> ShortestPath {
        self.dijkstra_with(from, to, &DijkstraOptions::default())
    }

    /// Dijkstra's algorithm over the graph minus `options.ignore`.
    ///
    /// Nodes are extracted in order of tentative distance, ties going to the
    /// node that comes first in graph order, and the search stops as soon as
    /// `to` is extracted.  The returned distance is the sum of the real edge
    /// weights along the reconstructed path, which differs from the
    /// tentative distance when `options.inverted` is set.
    pub fn dijkstra_with(&self, from: &Node, to: &Node, options: &DijkstraOptions) -> ShortestPath {
        let _span = info_span!("dijkstra", inverted = options.inverted).entered();
        let considered = |node: &Node| self.contains_node(node) && !options.ignore.contains(node);
        if !considered(from) || !considered(to) {
            return ShortestPath::unconsidered();
        }

        let mut unvisited: IndexSet<Node> = self
            .nodes()
            .filter(|&node| considered(node))
            .cloned()
            .collect();
        let mut distances: HashMap<Node, Weight> = unvisited
            .iter()
            .map(|node| (node.clone(), UNREACHED))
            .collect();
        let mut predecessors: HashMap<Node, Node> = HashMap::new();
        distances.insert(from.clone(), 0);

        loop {
            let mut closest: Option<(usize, Weight)> = None;
            for (index, node) in unvisited.iter().enumerate() {
                let distance = distances[node];
                if closest.is_none_or(|(_, best)| distance < best) {
                    closest = Some((index, distance));
                }
            }
            let Some((index, base)) = closest else {
                break;
            };
            if base == UNREACHED {
                trace!(remaining = unvisited.len(), "remaining nodes unreachable");
                break;
            }
            let Some(current) = unvisited.shift_remove_index(index) else {
                break;
            };
            if current == *to {
                debug!(distance = base, "dijkstra reached target");
                break;
            }

            for (neighbor, eid) in self.adjacency(&current) {
                if !unvisited.contains(neighbor) {
                    continue;
                }
                let cost = edge_cost(self[eid].weight(), options.inverted);
                let candidate = base.saturating_add(cost);
                if candidate < distances[neighbor] {
                    distances.insert(neighbor.clone(), candidate);
                    predecessors.insert(neighbor.clone(), current.clone());
                }
            }
        }

        let mut nodes = vec![to.clone()];
        let mut current = to;
        while let Some(previous) = predecessors.get(current) {
            nodes.push(previous.clone());
            current = previous;
        }
        nodes.reverse();

        let path = Path::from_nodes(nodes);
        ShortestPath {
            distance: path.weight(self).unwrap_or(0),
            reachable: path.first_node() == Some(from),
            path,
        }
    }

    /// All-pairs shortest distances by triple-loop relaxation over every
    /// intermediate node.
    ///
    /// Direct distances are seeded from each connection's `i32` payload when
    /// it has one, and from its weight otherwise.  Pairs with no path are
    /// `None`.  The diagonal starts empty, so it ends up holding the length
    /// of the shortest closed walk through each node.
    pub fn all_pairs_distance(&self) -> DistanceMatrix {
        let _span = info_span!("all_pairs_distance").entered();
        let nodes: Vec<Node> = self.nodes().cloned().collect();
        let n = nodes.len();
        let mut distances = vec![vec![None; n]; n];

        for (i, node) in nodes.iter().enumerate() {
            for (neighbor, eid) in self.adjacency(node) {
                let Some(j) = self.index_of(neighbor) else {
                    continue;
                };
                let connection = &self[eid];
                let seed = connection
                    .value::<i32>()
                    .copied()
                    .unwrap_or(connection.weight());
                distances[i][j] = Some(seed);
            }
        }

        for k in 0..n {
            for i in 0..n {
                let Some(ik) = distances[i][k] else {
                    continue;
                };
                for j in 0..n {
                    let Some(via) = distances[k][j].and_then(|kj| ik.checked_add(kj)) else {
                        continue;
                    };
                    if distances[i][j].is_none_or(|direct| via < direct) {
                        distances[i][j] = Some(via);
                    }
                }
            }
        }

        DistanceMatrix { nodes, distances }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Connection, Direction};

    /// A–B(1), B–C(1), C–D(1), A–D(4).
    fn square() -> (Graph, Vec<Node>) {
        let mut graph = Graph::new();
        let n: Vec<_> = ["A", "B", "C", "D"].into_iter().map(Node::new).collect();
        for node in &n {
            graph.add_node(node).unwrap();
        }
        graph.connect_weighted(&n[0], &n[1], 1).unwrap();
        graph.connect_weighted(&n[1], &n[2], 1).unwrap();
        graph.connect_weighted(&n[2], &n[3], 1).unwrap();
        graph.connect_weighted(&n[0], &n[3], 4).unwrap();
        (graph, n)
    }

    #[test]
    fn test_dijkstra_square() {
        let (graph, n) = square();
        let result = graph.dijkstra(&n[0], &n[3]);
        assert_eq!(result.path().labels(), ["A", "B", "C", "D"]);
        assert_eq!(result.distance(), 3);
        assert!(result.is_reachable());
    }

    #[test]
    fn test_dijkstra_to_self() {
        let (graph, n) = square();
        let result = graph.dijkstra(&n[2], &n[2]);
        assert_eq!(result.path().labels(), ["C"]);
        assert_eq!(result.distance(), 0);
        assert!(result.is_reachable());
    }

    #[test]
    fn test_dijkstra_unreachable() {
        let (mut graph, n) = square();
        let lonely = Node::new("E");
        graph.add_node(&lonely).unwrap();
        let result = graph.dijkstra(&n[0], &lonely);
        assert_eq!(result.path().labels(), ["E"]);
        assert_eq!(result.distance(), 0);
        assert!(!result.is_reachable());
    }

    #[test]
    fn test_dijkstra_ignore() {
        let (graph, n) = square();
        let options = DijkstraOptions::ignoring([n[1].clone()]);
        let result = graph.dijkstra_with(&n[0], &n[2], &options);
        assert_eq!(result.path().labels(), ["A", "D", "C"]);
        assert_eq!(result.distance(), 5);

        let result = graph.dijkstra_with(&n[0], &n[1], &options);
        assert!(result.path().is_empty());
        assert!(!result.is_reachable());
    }

    #[test]
    fn test_dijkstra_inverted_truncates() {
        let (graph, n) = square();
        // 1 / 4 == 0, so the direct edge looks free.
        let result = graph.dijkstra_with(&n[0], &n[3], &DijkstraOptions::inverted());
        assert_eq!(result.path().labels(), ["A", "D"]);
        assert_eq!(result.distance(), 4);
    }

    fn chain(weight: Weight) -> (Graph, Vec<Node>) {
        let mut graph = Graph::new();
        let n: Vec<_> = ["A", "B", "C"].into_iter().map(Node::new).collect();
        for node in &n {
            graph.add_node(node).unwrap();
        }
        graph.connect_weighted(&n[0], &n[1], weight).unwrap();
        graph.connect_weighted(&n[1], &n[2], weight).unwrap();
        (graph, n)
    }

    #[test]
    fn test_dijkstra_distance_saturates() {
        // Both edges look free when inverted, but their real weights overflow.
        let (graph, n) = chain(2_000_000_000);
        let result = graph.dijkstra_with(&n[0], &n[2], &DijkstraOptions::inverted());
        assert_eq!(result.path().labels(), ["A", "B", "C"]);
        assert_eq!(result.distance(), Weight::MAX);
        assert!(result.is_reachable());

        let (graph, n) = chain(-2_000_000_000);
        let result = graph.dijkstra(&n[0], &n[2]);
        assert_eq!(result.path().labels(), ["A", "B", "C"]);
        assert_eq!(result.distance(), Weight::MIN);
    }

    #[test]
    fn test_dijkstra_inverted_zero_weight_is_impassable() {
        let mut graph = Graph::new();
        let a = Node::new("A");
        let b = Node::new("B");
        graph.add_node(&a).unwrap();
        graph.add_node(&b).unwrap();
        graph.connect_weighted(&a, &b, 0).unwrap();
        assert!(graph.dijkstra(&a, &b).is_reachable());
        assert!(!graph.dijkstra_with(&a, &b, &DijkstraOptions::inverted()).is_reachable());
    }

    #[test]
    fn test_dijkstra_ties_follow_node_order() {
        // A–B(1), A–C(1), B–D(1), C–D(1): B comes first, so D is reached via B.
        let mut graph = Graph::new();
        let n: Vec<_> = ["A", "B", "C", "D"].into_iter().map(Node::new).collect();
        for node in &n {
            graph.add_node(node).unwrap();
        }
        graph.connect_weighted(&n[0], &n[1], 1).unwrap();
        graph.connect_weighted(&n[0], &n[2], 1).unwrap();
        graph.connect_weighted(&n[1], &n[3], 1).unwrap();
        graph.connect_weighted(&n[2], &n[3], 1).unwrap();
        assert_eq!(graph.dijkstra(&n[0], &n[3]).path().labels(), ["A", "B", "D"]);
    }

    #[test]
    fn test_dijkstra_ignores_direction() {
        let mut graph = Graph::new();
        let a = Node::new("A");
        let b = Node::new("B");
        graph.add_node(&a).unwrap();
        graph.add_node(&b).unwrap();
        graph
            .connect(&a, &b, Connection::new("", Direction::AToB, 2))
            .unwrap();
        assert_eq!(graph.dijkstra(&b, &a).distance(), 2);
    }

    #[test]
    fn test_all_pairs_distance() {
        let (mut graph, n) = square();
        let lonely = Node::new("E");
        graph.add_node(&lonely).unwrap();
        let matrix = graph.all_pairs_distance();
        assert_eq!(matrix.nodes().len(), 5);
        assert_eq!(matrix.distance(&n[0], &n[3]), Some(3));
        assert_eq!(matrix.distance(&n[3], &n[0]), Some(3));
        assert_eq!(matrix.distance(&n[1], &n[3]), Some(2));
        assert_eq!(matrix.distance(&n[0], &n[0]), Some(2));
        assert_eq!(matrix.distance(&n[0], &lonely), None);
        assert_eq!(matrix.distance(&lonely, &lonely), None);
        assert_eq!(matrix.get(0, 9), None);
    }

    #[test]
    fn test_all_pairs_prefers_payload() {
        let mut graph = Graph::new();
        let a = Node::new("A");
        let b = Node::new("B");
        graph.add_node(&a).unwrap();
        graph.add_node(&b).unwrap();
        graph
            .connect(&a, &b, Connection::with_value("w", Direction::TwoWay, 100, 7i32))
            .unwrap();
        assert_eq!(graph.all_pairs_distance().distance(&a, &b), Some(7));
    }
}
