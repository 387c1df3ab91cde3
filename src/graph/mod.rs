use std::{collections::HashSet, fmt::Debug, ops::Index};

use indexmap::IndexMap;

use crate::{
    connection::{Connection, EdgeId, Weight},
    error::GraphError,
    format_debug::{format_adjacency, format_debug},
    node::Node,
};

/// The graph store.
///
/// Each registered node maps to an insertion-ordered table from neighbor to
/// the id of the connecting edge.  Connections live in a single arena; both
/// endpoints' tables hold the same [`EdgeId`], so an edge is one object no
/// matter which side it is reached from, and whatever its
/// [`Direction`](crate::Direction).
///
/// Iteration over nodes, neighbors and edges follows insertion order.
/// Removing a node keeps the relative order of the remaining ones.
///
/// Arena slots freed by [`Self::disconnect`] and [`Self::remove_node`] are
/// reused by later connections, so an [`EdgeId`] kept past the removal of
/// its connection may come to name a different one.
#[derive(Default)]
pub struct Graph {
    adjacency: IndexMap<Node, IndexMap<Node, EdgeId>>,
    edges: Vec<Option<Connection>>,
    free: Vec<EdgeId>,
}

impl Graph {
    /// Creates a new, empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // Nodes

    /// Registers a node with no connections.
    pub fn add_node(&mut self, node: &Node) -> Result<(), GraphError> {
        if self.adjacency.contains_key(node) {
            return Err(GraphError::DuplicateNode(node.label()));
        }
        self.adjacency.insert(node.clone(), IndexMap::new());
        Ok(())
    }

    /// Removes a node and every connection that references it.
    pub fn remove_node(&mut self, node: &Node) -> Result<(), GraphError> {
        let Some(entry) = self.adjacency.shift_remove(node) else {
            return Err(GraphError::MissingNode(node.label()));
        };
        for (neighbor, eid) in entry {
            if let Some(other) = self.adjacency.get_mut(&neighbor) {
                other.shift_remove(node);
            }
            self.release(eid);
        }
        Ok(())
    }

    pub fn contains_node(&self, node: &Node) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Gets an iterator over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.adjacency.keys()
    }

    /// Gets the number of nodes in the graph.
    pub fn size(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Position of a node in [`Self::nodes`] order.
    pub fn index_of(&self, node: &Node) -> Option<usize> {
        self.adjacency.get_index_of(node)
    }

    /// Finds the first node, in iteration order, with the given label.
    pub fn find_by_label(&self, label: &str) -> Option<&Node> {
        self.adjacency.keys().find(|node| node.has_label(label))
    }

    /// Removes all nodes and connections.
    pub fn clear(&mut self) {
        self.adjacency.clear();
        self.edges.clear();
        self.free.clear();
    }

    // Connections

    /// Connects two registered nodes with `connection`, which is stored once
    /// and shared by both adjacency entries.  The connection's endpoints are
    /// set to `(a, b)`.
    pub fn connect(
        &mut self,
        a: &Node,
        b: &Node,
        mut connection: Connection,
    ) -> Result<EdgeId, GraphError> {
        let Some(entry) = self.adjacency.get(a) else {
            return Err(GraphError::MissingNode(a.label()));
        };
        if !self.adjacency.contains_key(b) {
            return Err(GraphError::MissingNode(b.label()));
        }
        if a == b {
            return Err(GraphError::SelfLoop(a.label()));
        }
        if entry.contains_key(b) {
            return Err(GraphError::AlreadyConnected(a.label(), b.label()));
        }

        connection.set_endpoints(a.clone(), b.clone());
        let eid = match self.free.pop() {
            Some(eid) => {
                self.edges[eid.0] = Some(connection);
                eid
            }
            None => {
                self.edges.push(Some(connection));
                EdgeId(self.edges.len() - 1)
            }
        };
        self.adjacency[a].insert(b.clone(), eid);
        self.adjacency[b].insert(a.clone(), eid);
        Ok(eid)
    }

    /// Connects two nodes with a [`Connection::generic`] of the given weight.
    pub fn connect_weighted(
        &mut self,
        a: &Node,
        b: &Node,
        weight: Weight,
    ) -> Result<EdgeId, GraphError> {
        self.connect(a, b, Connection::generic(weight))
    }

    /// Unlinks the connection between two nodes and hands it back unchanged.
    pub fn disconnect(&mut self, a: &Node, b: &Node) -> Result<Connection, GraphError> {
        let not_connected = || GraphError::NotConnected(a.label(), b.label());
        let eid = self.connection_id(a, b).ok_or_else(not_connected)?;
        self.adjacency[a].shift_remove(b);
        self.adjacency[b].shift_remove(a);
        self.release(eid).ok_or_else(not_connected)
    }

    fn release(&mut self, eid: EdgeId) -> Option<Connection> {
        let connection = self.edges[eid.0].take()?;
        self.free.push(eid);
        Some(connection)
    }

    /// Gets the id of the connection between two nodes, in either order.
    pub fn connection_id(&self, a: &Node, b: &Node) -> Option<EdgeId> {
        self.adjacency.get(a)?.get(b).copied()
    }

    /// Gets the connection between two nodes, in either order.
    pub fn connection(&self, a: &Node, b: &Node) -> Option<&Connection> {
        self.connection_id(a, b).and_then(|eid| self.edge(eid))
    }

    pub fn connection_mut(&mut self, a: &Node, b: &Node) -> Option<&mut Connection> {
        let eid = self.connection_id(a, b)?;
        self.edge_mut(eid)
    }

    /// Gets the weight of the connection between two nodes, if there is one.
    pub fn connection_weight(&self, a: &Node, b: &Node) -> Option<Weight> {
        self.connection(a, b).map(Connection::weight)
    }

    pub fn is_connected(&self, a: &Node, b: &Node) -> bool {
        self.connection_id(a, b).is_some()
    }

    /// Gets a connection by id.  Returns `None` for connections that have been
    /// disconnected or dropped along with one of their nodes.
    pub fn edge(&self, eid: EdgeId) -> Option<&Connection> {
        self.edges.get(eid.0)?.as_ref()
    }

    pub fn edge_mut(&mut self, eid: EdgeId) -> Option<&mut Connection> {
        self.edges.get_mut(eid.0)?.as_mut()
    }

    /// Gets an iterator over the neighbors of a node, in the order their
    /// connections were made.  Unknown nodes have no neighbors.
    pub fn neighbors<'g>(&'g self, node: &Node) -> impl Iterator<Item = &'g Node> + use<'g> {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|entry| entry.keys())
    }

    /// Gets an iterator over the ids of the connections incident to a node,
    /// in the same order as [`Self::neighbors`].
    pub fn incident_edges<'g>(&'g self, node: &Node) -> impl Iterator<Item = EdgeId> + use<'g> {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|entry| entry.values().copied())
    }

    /// Gets an iterator over `(neighbor, edge id)` pairs of a node.
    pub fn adjacency<'g>(
        &'g self,
        node: &Node,
    ) -> impl Iterator<Item = (&'g Node, EdgeId)> + use<'g> {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|entry| entry.iter().map(|(neighbor, eid)| (neighbor, *eid)))
    }

    /// Gets the number of connections incident to a node.
    pub fn degree(&self, node: &Node) -> usize {
        self.adjacency.get(node).map_or(0, IndexMap::len)
    }

    /// Gets the neighbors reachable by crossing a directed connection the
    /// way it points: `AToB` connections leaving `node` as endpoint A, and
    /// `BToA` connections leaving it as endpoint B.  `TwoWay` connections are
    /// never crossed.  This is the move generator of
    /// [`Self::alpha_beta`]; every other algorithm ignores direction.
    pub fn forward_neighbors<'g>(
        &'g self,
        node: &Node,
    ) -> impl Iterator<Item = &'g Node> + use<'g> {
        let node = node.clone();
        self.adjacency(&node).filter_map(move |(neighbor, eid)| {
            let (from, _) = self.edge(eid)?.arc()?;
            (*from == node).then_some(neighbor)
        })
    }

    /// Gets the ids of all distinct connections, in first-seen order when
    /// walking the adjacency table node by node.
    pub fn all_edges(&self) -> Vec<EdgeId> {
        let mut seen = HashSet::new();
        self.adjacency
            .values()
            .flat_map(|entry| entry.values().copied())
            .filter(|eid| seen.insert(*eid))
            .collect()
    }

    /// Gets all distinct connections with their ids, in [`Self::all_edges`]
    /// order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Connection)> {
        self.all_edges()
            .into_iter()
            .filter_map(move |eid| Some((eid, self.edge(eid)?)))
    }

    /// Gets the number of distinct connections in the graph.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(IndexMap::len).sum::<usize>() / 2
    }
}

impl Index<EdgeId> for Graph {
    type Output = Connection;

    /// Panics if the connection has been removed from the graph.
    fn index(&self, eid: EdgeId) -> &Connection {
        self.edges[eid.0].as_ref().expect("EdgeId is dangling")
    }
}

impl Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_debug(self, f, "Graph")
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_adjacency(self, f)
    }
}
