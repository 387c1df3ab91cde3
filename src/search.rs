use std::collections::{HashMap, HashSet, VecDeque};

use crate::{
    connection::Weight,
    graph::Graph,
    node::Node,
    path::Path,
    tracing_support::{debug, info_span, trace},
};

const DEFAULT_HASH_SET_CAPACITY: usize = 64;

/// One level of a depth-first search in progress.
struct Frame {
    neighbors: Vec<Node>,
    next: usize,
    /// Budget handed to the children of this frame.
    limit: Option<usize>,
}

impl Graph {
    /// Breadth-first search from `from`, returning the nodes in the order
    /// they were dequeued.  The search stops as soon as `to` is dequeued, so
    /// the result ends with `to` when it is reachable and otherwise holds the
    /// whole component of `from`.  Returns an empty vector if `from` is not
    /// in the graph.
    pub fn bfs(&self, from: &Node, to: &Node) -> Vec<Node> {
        let _span = info_span!("bfs").entered();
        let mut order = Vec::new();
        if !self.contains_node(from) {
            return order;
        }

        let mut visited = HashSet::with_capacity(DEFAULT_HASH_SET_CAPACITY);
        let mut queue = VecDeque::new();
        visited.insert(from.clone());
        queue.push_back(from.clone());

        while let Some(current) = queue.pop_front() {
            order.push(current.clone());
            if current == *to {
                debug!(visited = order.len(), "bfs reached target");
                break;
            }
            for neighbor in self.neighbors(&current) {
                if visited.insert(neighbor.clone()) {
                    queue.push_back(neighbor.clone());
                }
            }
        }
        order
    }

    /// Depth-first search for a path from `from` to `to`.  A node is never
    /// entered twice during one search, so the path found is not necessarily
    /// the shortest.
    pub fn dfs(&self, from: &Node, to: &Node) -> Option<Path> {
        let _span = info_span!("dfs").entered();
        self.depth_search(from, to, None)
    }

    /// Like [`Self::dfs`], but a path may hold at most `limit` nodes.
    /// Entering a node with no budget left fails without marking the node
    /// visited.
    pub fn dfs_limited(&self, from: &Node, to: &Node, limit: usize) -> Option<Path> {
        let _span = info_span!("dfs_limited", limit).entered();
        self.depth_search(from, to, Some(limit))
    }

    /// Iterative deepening: runs [`Self::dfs_limited`] with limits `1`,
    /// `2`, ... `max_limit`, each with a fresh visited set, and returns the
    /// first path found.
    pub fn iddfs(&self, from: &Node, to: &Node, max_limit: usize) -> Option<Path> {
        let _span = info_span!("iddfs", max_limit).entered();
        (1..=max_limit).find_map(|limit| {
            trace!(limit, "iddfs level");
            self.depth_search(from, to, Some(limit))
        })
    }

    fn depth_search(&self, from: &Node, to: &Node, limit: Option<usize>) -> Option<Path> {
        if !self.contains_node(from) {
            return None;
        }

        let mut visited = HashSet::with_capacity(DEFAULT_HASH_SET_CAPACITY);
        let mut path = Path::default();
        let mut stack: Vec<Frame> = Vec::new();
        let mut entering = Some((from.clone(), limit));

        loop {
            if let Some((node, limit)) = entering.take() {
                if limit != Some(0) && visited.insert(node.clone()) {
                    path.push(node.clone());
                    if node == *to {
                        debug!(length = path.len(), "depth search reached target");
                        return Some(path);
                    }
                    stack.push(Frame {
                        neighbors: self.neighbors(&node).cloned().collect(),
                        next: 0,
                        limit: limit.map(|limit| limit - 1),
                    });
                }
            }

            let frame = stack.last_mut()?;
            if let Some(neighbor) = frame.neighbors.get(frame.next) {
                entering = Some((neighbor.clone(), frame.limit));
                frame.next += 1;
            } else {
                stack.pop();
                path.pop();
            }
        }
    }

    /// Greedy heuristic walk from `from` toward `to`.
    ///
    /// At each node the walk moves to the neighbor with the smallest
    /// `heuristics[neighbor]`, plus the connecting weight when `use_weights`
    /// is set; ties go to the earliest neighbor.  Neighbors without a
    /// heuristic value are never chosen.  The walk is committed: revisiting a
    /// node, reaching a dead end, or running out of `limit` fails the whole
    /// search instead of trying the next best neighbor.
    pub fn heuristic_search(
        &self,
        from: &Node,
        to: &Node,
        heuristics: &HashMap<Node, Weight>,
        use_weights: bool,
        limit: Option<usize>,
    ) -> Option<Path> {
        let _span = info_span!("heuristic_search").entered();
        if !self.contains_node(from) {
            return None;
        }

        let mut visited = HashSet::with_capacity(DEFAULT_HASH_SET_CAPACITY);
        let mut path = Path::default();
        let mut current = from.clone();
        let mut limit = limit;

        loop {
            if limit == Some(0) || !visited.insert(current.clone()) {
                debug!(node = %current.label(), "heuristic walk blocked");
                return None;
            }
            path.push(current.clone());
            if current == *to {
                return Some(path);
            }
            limit = limit.map(|limit| limit - 1);

            let (next, score) = self
                .adjacency(&current)
                .filter_map(|(neighbor, eid)| {
                    let h = *heuristics.get(neighbor)?;
                    let w = if use_weights { self[eid].weight() } else { 0 };
                    Some((neighbor, h.saturating_add(w)))
                })
                .min_by_key(|(_, score)| *score)?;
            trace!(from = %current.label(), to = %next.label(), score, "greedy step");
            current = next.clone();
        }
    }

    /// Runs [`Self::heuristic_search`] with limits `1`, `2`, ...
    /// `max_limit` and returns the first path found.
    pub fn iterative_heuristic_search(
        &self,
        from: &Node,
        to: &Node,
        heuristics: &HashMap<Node, Weight>,
        max_limit: usize,
        use_weights: bool,
    ) -> Option<Path> {
        let _span = info_span!("iterative_heuristic_search", max_limit).entered();
        (1..=max_limit)
            .find_map(|limit| self.heuristic_search(from, to, heuristics, use_weights, Some(limit)))
    }

    /// Nodes at the end of some walk of exactly `distance` steps from
    /// `node`, in the order a depth-first enumeration of the walks first
    /// reaches them.  Walks may revisit nodes, so `node` itself appears for
    /// every even distance when it has a neighbor.
    pub fn nodes_at_distance(&self, node: &Node, distance: usize) -> Vec<Node> {
        let _span = info_span!("nodes_at_distance", distance).entered();
        let mut results = Vec::new();
        if !self.contains_node(node) {
            return results;
        }

        let mut found = HashSet::new();
        let mut expanded = HashSet::new();
        let mut stack = vec![(node.clone(), distance)];
        while let Some((current, remaining)) = stack.pop() {
            if remaining == 0 {
                if found.insert(current.clone()) {
                    results.push(current);
                }
                continue;
            }
            // Every walk from an expanded state has already been enumerated.
            if !expanded.insert((current.clone(), remaining)) {
                continue;
            }
            let neighbors: Vec<_> = self.neighbors(&current).cloned().collect();
            stack.extend(
                neighbors
                    .into_iter()
                    .rev()
                    .map(|neighbor| (neighbor, remaining - 1)),
            );
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    /// 0 - 1 - 3
    ///  \
    ///   2       4 - 5
    /// ```
    fn create_simple_graph() -> (Graph, Vec<Node>) {
        let mut graph = Graph::new();
        let n: Vec<_> = (0..6).map(|i| Node::new(i.to_string())).collect();
        for node in &n {
            graph.add_node(node).unwrap();
        }
        graph.connect_weighted(&n[0], &n[1], 1).unwrap();
        graph.connect_weighted(&n[0], &n[2], 1).unwrap();
        graph.connect_weighted(&n[1], &n[3], 1).unwrap();
        graph.connect_weighted(&n[4], &n[5], 1).unwrap();
        (graph, n)
    }

    fn labels(nodes: &[Node]) -> Vec<String> {
        nodes.iter().map(Node::label).collect()
    }

    #[test]
    fn test_bfs_order_and_stop() {
        let (graph, n) = create_simple_graph();
        assert_eq!(labels(&graph.bfs(&n[0], &n[2])), ["0", "1", "2"]);
        assert_eq!(labels(&graph.bfs(&n[0], &n[3])), ["0", "1", "2", "3"]);
        assert_eq!(labels(&graph.bfs(&n[3], &n[3])), ["3"]);
    }

    #[test]
    fn test_bfs_stays_in_component() {
        let (graph, n) = create_simple_graph();
        let order = graph.bfs(&n[0], &n[5]);
        assert_eq!(labels(&order), ["0", "1", "2", "3"]);
        assert!(graph.bfs(&Node::new("x"), &n[0]).is_empty());
    }

    #[test]
    fn test_bfs_ignores_direction() {
        let mut graph = Graph::new();
        let a = Node::new("a");
        let b = Node::new("b");
        graph.add_node(&a).unwrap();
        graph.add_node(&b).unwrap();
        graph
            .connect(&a, &b, crate::Connection::new("", crate::Direction::AToB, 1))
            .unwrap();
        assert_eq!(graph.bfs(&b, &a), vec![b, a]);
    }

    #[test]
    fn test_dfs() {
        let (graph, n) = create_simple_graph();
        let path = graph.dfs(&n[2], &n[3]).unwrap();
        assert_eq!(path.labels(), ["2", "0", "1", "3"]);
        assert!(graph.dfs(&n[0], &n[4]).is_none());
        assert_eq!(graph.dfs(&n[4], &n[4]).unwrap().labels(), ["4"]);
    }

    #[test]
    fn test_dfs_backtracks() {
        let (graph, n) = create_simple_graph();
        // 0 tries 1 (and 3) first, then backtracks to 2.
        let path = graph.dfs(&n[0], &n[2]).unwrap();
        assert_eq!(path.labels(), ["0", "2"]);
    }

    #[test]
    fn test_dfs_limited() {
        let (graph, n) = create_simple_graph();
        assert!(graph.dfs_limited(&n[0], &n[3], 0).is_none());
        assert!(graph.dfs_limited(&n[0], &n[3], 2).is_none());
        assert_eq!(
            graph.dfs_limited(&n[0], &n[3], 3).unwrap().labels(),
            ["0", "1", "3"]
        );
        assert_eq!(graph.dfs_limited(&n[0], &n[0], 1).unwrap().labels(), ["0"]);
    }

    #[test]
    fn test_iddfs() {
        let (graph, n) = create_simple_graph();
        assert_eq!(
            graph.iddfs(&n[2], &n[3], 5).unwrap().labels(),
            ["2", "0", "1", "3"]
        );
        assert!(graph.iddfs(&n[2], &n[3], 3).is_none());
        assert!(graph.iddfs(&n[0], &n[5], 10).is_none());
        assert!(graph.iddfs(&n[0], &n[0], 0).is_none());
    }

    fn heuristic_graph() -> (Graph, Vec<Node>, HashMap<Node, Weight>) {
        // s - a - t
        //  \     /
        //   b --
        let mut graph = Graph::new();
        let n: Vec<_> = ["s", "a", "b", "t"].into_iter().map(Node::new).collect();
        for node in &n {
            graph.add_node(node).unwrap();
        }
        graph.connect_weighted(&n[0], &n[1], 10).unwrap();
        graph.connect_weighted(&n[0], &n[2], 1).unwrap();
        graph.connect_weighted(&n[1], &n[3], 1).unwrap();
        graph.connect_weighted(&n[2], &n[3], 1).unwrap();
        let h = HashMap::from([
            (n[0].clone(), 2),
            (n[1].clone(), 1),
            (n[2].clone(), 3),
            (n[3].clone(), 0),
        ]);
        (graph, n, h)
    }

    #[test]
    fn test_heuristic_search() {
        let (graph, n, h) = heuristic_graph();
        let path = graph.heuristic_search(&n[0], &n[3], &h, false, None).unwrap();
        assert_eq!(path.labels(), ["s", "a", "t"]);
        let path = graph.heuristic_search(&n[0], &n[3], &h, true, None).unwrap();
        assert_eq!(path.labels(), ["s", "b", "t"]);
    }

    #[test]
    fn test_heuristic_search_is_committed() {
        let (graph, n, mut h) = heuristic_graph();
        // From a, the best neighbor is s again, which is already visited.
        h.insert(n[0].clone(), -5);
        h.insert(n[1].clone(), -10);
        assert!(graph.heuristic_search(&n[0], &n[3], &h, false, None).is_none());
    }

    #[test]
    fn test_heuristic_search_skips_unknown_neighbors() {
        let (graph, n, mut h) = heuristic_graph();
        h.remove(&n[1]);
        let path = graph.heuristic_search(&n[0], &n[3], &h, false, None).unwrap();
        assert_eq!(path.labels(), ["s", "b", "t"]);
    }

    #[test]
    fn test_heuristic_limit() {
        let (graph, n, h) = heuristic_graph();
        assert!(graph.heuristic_search(&n[0], &n[3], &h, false, Some(2)).is_none());
        assert!(graph.heuristic_search(&n[0], &n[3], &h, false, Some(3)).is_some());
        let path = graph
            .iterative_heuristic_search(&n[0], &n[3], &h, 5, false)
            .unwrap();
        assert_eq!(path.len(), 3);
        assert!(graph.iterative_heuristic_search(&n[0], &n[3], &h, 2, false).is_none());
    }

    #[test]
    fn test_nodes_at_distance() {
        let (graph, n) = create_simple_graph();
        assert_eq!(labels(&graph.nodes_at_distance(&n[0], 0)), ["0"]);
        assert_eq!(labels(&graph.nodes_at_distance(&n[0], 1)), ["1", "2"]);
        assert_eq!(labels(&graph.nodes_at_distance(&n[0], 2)), ["0", "3"]);
        assert_eq!(labels(&graph.nodes_at_distance(&n[3], 3)), ["1", "2"]);
        assert!(graph.nodes_at_distance(&Node::new("x"), 1).is_empty());
    }
}
