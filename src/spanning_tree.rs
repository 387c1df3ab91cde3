use std::collections::HashSet;

use indexmap::IndexSet;

use crate::{
    connection::{EdgeId, Weight},
    graph::Graph,
    node::Node,
    tracing_support::{debug, info_span, trace},
};

/// A spanning tree (or forest) found by [`Graph::kruskal`] or
/// [`Graph::prim`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpanningTree {
    nodes: Vec<Node>,
    edges: Vec<EdgeId>,
    weight: Weight,
}

impl SpanningTree {
    /// The nodes spanned.  For Prim these are in the order they joined the
    /// tree; for Kruskal, every node of the graph in graph order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The accepted connections, in acceptance order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Total weight of the accepted connections.
    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn contains_edge(&self, eid: EdgeId) -> bool {
        self.edges.contains(&eid)
    }
}

impl Graph {
    /// Looks for a path from `current` to `target` that only uses the
    /// `candidates` connections.  Returns the connections of the path found,
    /// which is empty when `current == target`.
    pub fn find_cycle(&self, current: &Node, target: &Node, candidates: &[EdgeId]) -> Option<Vec<EdgeId>> {
        let mut path = Vec::new();
        self.find_cycle_with_path(current, target, candidates, &mut path)
            .then_some(path)
    }

    /// Like [`Self::find_cycle`], but continues an in-progress `path`: the
    /// connections already on it are never used again, and the connections
    /// found are appended to it.  On failure `path` is left as it was.
    ///
    /// Candidates are tried in order, depth first, and a node is never
    /// entered twice.
    pub fn find_cycle_with_path(
        &self,
        current: &Node,
        target: &Node,
        candidates: &[EdgeId],
        path: &mut Vec<EdgeId>,
    ) -> bool {
        if current == target {
            return true;
        }

        let mut visited = HashSet::from([current.clone()]);
        let mut stack: Vec<(Node, usize)> = vec![(current.clone(), 0)];
        while let Some((node, next)) = stack.last_mut() {
            let mut step = None;
            while let Some(&eid) = candidates.get(*next) {
                *next += 1;
                if path.contains(&eid) {
                    continue;
                }
                let Some(other) = self.edge(eid).and_then(|conn| conn.other_end(node)) else {
                    continue;
                };
                if visited.insert(other.clone()) {
                    step = Some((eid, other.clone()));
                    break;
                }
            }

            match step {
                Some((eid, other)) => {
                    path.push(eid);
                    if other == *target {
                        return true;
                    }
                    stack.push((other, 0));
                }
                None => {
                    stack.pop();
                    if !stack.is_empty() {
                        path.pop();
                    }
                }
            }
        }
        false
    }

    /// Kruskal's algorithm.  Connections are taken in ascending weight order
    /// (ties keep [`Self::all_edges`] order) and rejected when the accepted
    /// ones already join their endpoints.  A disconnected graph yields a
    /// spanning forest.
    pub fn kruskal(&self) -> SpanningTree {
        let _span = info_span!("kruskal").entered();
        let mut edges: Vec<_> = self.edges().collect();
        edges.sort_by(|(_, a), (_, b)| a.cmp(b));

        let mut tree = SpanningTree {
            nodes: self.nodes().cloned().collect(),
            ..SpanningTree::default()
        };
        for (eid, connection) in edges {
            let Some((a, b)) = connection.endpoints() else {
                continue;
            };
            if self.find_cycle(a, b, &tree.edges).is_some() {
                trace!(a = %a.label(), b = %b.label(), "kruskal rejected edge");
                continue;
            }
            tree.edges.push(eid);
            tree.weight = tree.weight.saturating_add(connection.weight());
        }
        debug!(edges = tree.edges.len(), weight = tree.weight, "kruskal done");
        tree
    }

    /// Prim's algorithm grown from `root`.  Each step takes the lightest
    /// frontier connection leading out of the tree (ties keep the order the
    /// connections joined the frontier).  Stops early, without error, when
    /// the rest of the graph is unreachable.  An unknown root yields an
    /// empty tree.
    pub fn prim(&self, root: &Node) -> SpanningTree {
        let _span = info_span!("prim").entered();
        if !self.contains_node(root) {
            return SpanningTree::default();
        }

        let mut in_tree: IndexSet<Node> = IndexSet::from([root.clone()]);
        let mut frontier: IndexSet<EdgeId> = self.incident_edges(root).collect();
        let mut tree = SpanningTree::default();

        while in_tree.len() < self.size() {
            let mut best: Option<(EdgeId, &Node, Weight)> = None;
            for &eid in &frontier {
                let connection = &self[eid];
                let Some((a, b)) = connection.endpoints() else {
                    continue;
                };
                let far = match (in_tree.contains(a), in_tree.contains(b)) {
                    (true, false) => b,
                    (false, true) => a,
                    _ => continue,
                };
                if best.is_none_or(|(_, _, weight)| connection.weight() < weight) {
                    best = Some((eid, far, connection.weight()));
                }
            }
            let Some((eid, far, weight)) = best else {
                debug!(spanned = in_tree.len(), "prim frontier exhausted");
                break;
            };
            frontier.extend(self.incident_edges(far));
            in_tree.insert(far.clone());
            tree.edges.push(eid);
            tree.weight = tree.weight.saturating_add(weight);
        }

        tree.nodes = in_tree.into_iter().collect();
        tree
    }
}
