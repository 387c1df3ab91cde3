use std::any::Any;

use derivative::Derivative;

use crate::{
    node::Node,
    payload::{Payload, PayloadError, slot_get},
};

/// Edge weights are plain integers.
pub type Weight = i32;

/// Label given to connections created from a bare weight.
pub const GENERIC_LABEL: &str = "Generic Connection";

/// Handle of a connection stored in a [`Graph`](crate::Graph).  Both
/// adjacency entries of an edge refer to it through the same `EdgeId`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The declared direction of a connection.  Traversal ignores it; it decides
/// how the edge is serialized and which way [`Graph::forward_neighbors`]
/// crosses it.
///
/// [`Graph::forward_neighbors`]: crate::Graph::forward_neighbors
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Direction {
    #[default]
    TwoWay,
    AToB,
    BToA,
}

impl Direction {
    pub fn is_directed(self) -> bool {
        self != Direction::TwoWay
    }
}

/// A weighted, labelled link between two nodes.
///
/// Connections are created by the caller and handed to
/// [`Graph::connect`](crate::Graph::connect), which fills in the endpoints.
/// Comparisons look at the weight only.
#[derive(Derivative)]
#[derivative(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Connection {
    weight: Weight,
    #[derivative(PartialEq = "ignore", PartialOrd = "ignore", Ord = "ignore")]
    label: String,
    #[derivative(PartialEq = "ignore", PartialOrd = "ignore", Ord = "ignore")]
    direction: Direction,
    #[derivative(PartialEq = "ignore", PartialOrd = "ignore", Ord = "ignore")]
    endpoints: Option<(Node, Node)>,
    #[derivative(
        Debug = "ignore",
        PartialEq = "ignore",
        PartialOrd = "ignore",
        Ord = "ignore"
    )]
    payload: Option<Payload>,
}

impl Connection {
    pub fn new(label: impl Into<String>, direction: Direction, weight: Weight) -> Self {
        Self {
            weight,
            label: label.into(),
            direction,
            endpoints: None,
            payload: None,
        }
    }

    /// Creates a connection carrying a typed value.
    pub fn with_value<T: Any>(
        label: impl Into<String>,
        direction: Direction,
        weight: Weight,
        value: T,
    ) -> Self {
        let mut connection = Self::new(label, direction, weight);
        connection.set_value(value);
        connection
    }

    /// A `TwoWay` connection labelled [`GENERIC_LABEL`].
    pub fn generic(weight: Weight) -> Self {
        Self::new(GENERIC_LABEL, Direction::TwoWay, weight)
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn set_weight(&mut self, weight: Weight) {
        self.weight = weight;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Endpoint A, once the connection has been added to a graph.
    pub fn node_a(&self) -> Option<&Node> {
        self.endpoints.as_ref().map(|(a, _)| a)
    }

    /// Endpoint B, once the connection has been added to a graph.
    pub fn node_b(&self) -> Option<&Node> {
        self.endpoints.as_ref().map(|(_, b)| b)
    }

    pub fn endpoints(&self) -> Option<(&Node, &Node)> {
        self.endpoints.as_ref().map(|(a, b)| (a, b))
    }

    pub fn touches(&self, node: &Node) -> bool {
        self.endpoints
            .as_ref()
            .is_some_and(|(a, b)| a == node || b == node)
    }

    /// Given one endpoint, returns the other.  Returns `None` if `node` is
    /// not an endpoint.
    pub fn other_end(&self, node: &Node) -> Option<&Node> {
        let (a, b) = self.endpoints.as_ref()?;
        if a == node {
            Some(b)
        } else if b == node {
            Some(a)
        } else {
            None
        }
    }

    /// The `(from, to)` pair in declared direction, or `None` for `TwoWay`
    /// connections and connections not yet in a graph.
    pub fn arc(&self) -> Option<(&Node, &Node)> {
        let (a, b) = self.endpoints()?;
        match self.direction {
            Direction::AToB => Some((a, b)),
            Direction::BToA => Some((b, a)),
            Direction::TwoWay => None,
        }
    }

    pub(crate) fn set_endpoints(&mut self, a: Node, b: Node) {
        self.endpoints = Some((a, b));
    }

    pub fn value<T: Any>(&self) -> Result<&T, PayloadError> {
        slot_get::<T>(&self.payload)
    }

    pub fn value_mut<T: Any>(&mut self) -> Result<&mut T, PayloadError> {
        self.payload
            .as_mut()
            .ok_or(PayloadError::Missing)?
            .get_mut::<T>()
    }

    pub fn set_value<T: Any>(&mut self, value: T) {
        self.payload = Some(Payload::new(value));
    }

    pub fn take_payload(&mut self) -> Option<Payload> {
        self.payload.take()
    }
}
