use std::collections::HashSet;

use crate::{
    graph::Graph,
    node::Node,
    tracing_support::{debug, info_span},
};

impl Graph {
    /// Whether the graph contains a cycle: some node can leave along one
    /// connection and come back along another.
    ///
    /// Each node and incident connection is probed in turn; the probe path
    /// starts with that connection, which therefore cannot be used to return.
    pub fn is_cyclic(&self) -> bool {
        let _span = info_span!("is_cyclic").entered();
        let candidates = self.all_edges();
        for node in self.nodes() {
            for (neighbor, eid) in self.adjacency(node) {
                let mut path = vec![eid];
                if self.find_cycle_with_path(neighbor, node, &candidates, &mut path) {
                    debug!(node = %node.label(), length = path.len(), "cycle found");
                    return true;
                }
            }
        }
        false
    }

    /// Whether every node can reach every other node.  Runs
    /// [`Self::dijkstra`] for each ordered pair of distinct nodes.
    pub fn is_strongly_connected(&self) -> bool {
        let _span = info_span!("is_strongly_connected").entered();
        for from in self.nodes() {
            for to in self.nodes() {
                if from != to && !self.dijkstra(from, to).is_reachable() {
                    debug!(from = %from.label(), to = %to.label(), "unreachable pair");
                    return false;
                }
            }
        }
        true
    }

    /// Looks for a cycle whose connections touch every node.
    ///
    /// For each node and incident connection, [`Self::find_cycle`] searches
    /// from the node to the connection's far end using only the node's own
    /// connections.  Such a path never leaves the node's neighborhood, so in
    /// practice this only holds for a graph made of two connected nodes.
    pub fn is_eulerian(&self) -> bool {
        let _span = info_span!("is_eulerian").entered();
        for node in self.nodes() {
            let incident: Vec<_> = self.incident_edges(node).collect();
            for (far, _) in self.adjacency(node) {
                let Some(path) = self.find_cycle(node, far, &incident) else {
                    continue;
                };
                let mut covered = HashSet::new();
                for eid in &path {
                    if let Some((a, b)) = self[*eid].endpoints() {
                        covered.insert(a);
                        covered.insert(b);
                    }
                }
                if self.nodes().all(|other| covered.contains(&other)) {
                    return true;
                }
            }
        }
        false
    }

    /// `1 / Σ distance(node, other)` over every other node, with
    /// unreachable nodes contributing 0.  Returns 0 if the sum is not
    /// positive.
    pub fn closeness_centrality(&self, node: &Node) -> f64 {
        let _span = info_span!("closeness_centrality").entered();
        let total: i64 = self
            .nodes()
            .filter(|&other| other != node)
            .map(|other| i64::from(self.dijkstra(node, other).distance()))
            .sum();
        if total <= 0 { 0.0 } else { 1.0 / total as f64 }
    }

    /// Fraction of the connected pairs `(s, t)`, with `s != t` and neither
    /// equal to `node`, whose [`Self::dijkstra`] path passes through `node`.
    /// Returns 0 if there are no such pairs.
    pub fn betweenness_centrality(&self, node: &Node) -> f64 {
        let _span = info_span!("betweenness_centrality").entered();
        let mut total = 0usize;
        let mut through = 0usize;
        for from in self.nodes().filter(|&from| from != node) {
            for to in self.nodes().filter(|&to| to != node && to != from) {
                let result = self.dijkstra(from, to);
                if !result.is_reachable() {
                    continue;
                }
                total += 1;
                if result.path().contains(node) {
                    through += 1;
                }
            }
        }
        if total == 0 {
            0.0
        } else {
            through as f64 / total as f64
        }
    }

    /// Partitions the nodes into connected components.  Direction is
    /// ignored, as everywhere else.
    #[cfg(feature = "pathfinding")]
    pub fn connected_components(&self) -> Vec<HashSet<Node>> {
        let _span = info_span!("connected_components").entered();
        let starts: Vec<Node> = self.nodes().cloned().collect();
        pathfinding::prelude::connected_components(&starts, |node| {
            self.neighbors(node).cloned().collect::<Vec<_>>()
        })
    }
}
