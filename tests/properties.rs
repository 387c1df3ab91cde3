mod common;

use common::ArbGraph;
use graphkit::prelude::*;
use quickcheck_macros::quickcheck;

#[quickcheck]
fn prop_dijkstra_distance_is_path_weight(recipe: ArbGraph) -> bool {
    let (graph, nodes) = recipe.build();
    nodes.iter().all(|to| {
        let result = graph.dijkstra(&nodes[0], to);
        !result.is_reachable() || result.path().weight(&graph) == Some(result.distance())
    })
}

#[quickcheck]
fn prop_bfs_ends_at_reachable_target(recipe: ArbGraph) -> bool {
    let (graph, nodes) = recipe.build();
    nodes.iter().all(|to| {
        let order = graph.bfs(&nodes[0], to);
        let reachable = graph.dfs(&nodes[0], to).is_some();
        reachable == (order.last() == Some(to))
    })
}

#[quickcheck]
fn prop_prim_matches_kruskal_when_connected(recipe: ArbGraph) -> bool {
    let (graph, nodes) = recipe.build();
    let grown = graph.prim(&nodes[0]);
    if grown.nodes().len() < graph.size() {
        return true;
    }
    grown.weight() == graph.kruskal().weight() && grown.edges().len() == graph.size() - 1
}

#[cfg(feature = "pathfinding")]
mod oracles {
    use super::*;
    use pathfinding::prelude::{dijkstra, kruskal};

    fn index(graph: &Graph, node: &Node) -> usize {
        graph.index_of(node).unwrap()
    }

    #[quickcheck]
    fn prop_dijkstra_matches_pathfinding(recipe: ArbGraph) -> bool {
        let (graph, nodes) = recipe.build();
        let successors = |&i: &usize| -> Vec<(usize, Weight)> {
            graph
                .adjacency(&nodes[i])
                .map(|(neighbor, eid)| (index(&graph, neighbor), graph[eid].weight()))
                .collect()
        };
        (0..nodes.len()).all(|target| {
            let ours = graph.dijkstra(&nodes[0], &nodes[target]);
            match dijkstra(&0, successors, |&i| i == target) {
                Some((_, cost)) => ours.is_reachable() && ours.distance() == cost,
                None => !ours.is_reachable(),
            }
        })
    }

    #[quickcheck]
    fn prop_kruskal_matches_pathfinding(recipe: ArbGraph) -> bool {
        let (graph, _) = recipe.build();
        let edges: Vec<(usize, usize, Weight)> = graph
            .edges()
            .map(|(_, connection)| {
                let (a, b) = connection.endpoints().unwrap();
                (index(&graph, a), index(&graph, b), connection.weight())
            })
            .collect();
        let expected: Weight = kruskal(&edges).map(|(_, _, weight)| weight).sum();
        graph.kruskal().weight() == expected
    }

    #[quickcheck]
    fn prop_cyclic_iff_more_edges_than_a_forest(recipe: ArbGraph) -> bool {
        let (graph, _) = recipe.build();
        let forest = graph.size() - graph.connected_components().len();
        graph.is_cyclic() == (graph.edge_count() > forest)
    }
}
