use std::fmt::Debug;

use crate::{
    connection::{EdgeId, Weight},
    graph::Graph,
    node::Node,
};

/// A walk through a graph, represented as the sequence of nodes visited.
/// Consecutive nodes are connected in the graph the path was found in.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Path {
    nodes: Vec<Node>,
}

impl Path {
    /// Creates a new path starting at the given node.
    pub fn new(start: Node) -> Self {
        Self { nodes: vec![start] }
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
        }
    }

    /// Returns the first node in the path.
    pub fn first_node(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Returns the last node in the path.
    pub fn last_node(&self) -> Option<&Node> {
        self.nodes.last()
    }

    /// Returns an iterator over the nodes in the path.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// Number of nodes on the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.nodes.contains(node)
    }

    /// Labels of the nodes on the path, in order.
    pub fn labels(&self) -> Vec<String> {
        self.nodes.iter().map(Node::label).collect()
    }

    /// Looks up the connections between consecutive nodes.  Returns `None`
    /// if some consecutive pair is not connected in `graph`.
    pub fn edges(&self, graph: &Graph) -> Option<Vec<EdgeId>> {
        self.nodes
            .windows(2)
            .map(|pair| graph.connection_id(&pair[0], &pair[1]))
            .collect()
    }

    /// Sums the weights of the connections between consecutive nodes,
    /// saturating at the bounds of [`Weight`].  Returns `None` if some
    /// consecutive pair is not connected in `graph`.
    pub fn weight(&self, graph: &Graph) -> Option<Weight> {
        self.nodes.windows(2).try_fold(0, |total: Weight, pair| {
            Some(total.saturating_add(graph.connection_weight(&pair[0], &pair[1])?))
        })
    }

    /// Adds a node to the end of the path.
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub(crate) fn pop(&mut self) -> Option<Node> {
        self.nodes.pop()
    }

    /// Extends the path by appending another path that starts where this
    /// one ends.  Panics if the first node of the other path does not match
    /// the current last node of this path.
    pub fn extend_with(&mut self, other: &Path) {
        assert_eq!(
            self.last_node(),
            other.first_node(),
            "paths do not share an endpoint"
        );
        self.nodes.extend(other.nodes.iter().skip(1).cloned());
    }
}

impl Extend<Node> for Path {
    fn extend<T: IntoIterator<Item = Node>>(&mut self, iter: T) {
        self.nodes.extend(iter);
    }
}

impl IntoIterator for Path {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl Debug for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Path").field(&self.labels()).finish()
    }
}
