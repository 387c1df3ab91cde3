mod common;

use common::build;
use graphkit::prelude::*;

#[test]
fn test_connection_is_shared_by_both_ends() {
    let (mut graph, n) = build(&["A", "B"], &[(0, 1, 7)]);
    assert_eq!(graph.connection_id(&n[0], &n[1]), graph.connection_id(&n[1], &n[0]));
    assert_eq!(graph.connection_weight(&n[1], &n[0]), Some(7));

    graph.connection_mut(&n[1], &n[0]).unwrap().set_weight(9);
    assert_eq!(graph.connection_weight(&n[0], &n[1]), Some(9));
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_connect_rejections() {
    let (mut graph, n) = build(&["A", "B"], &[(0, 1, 1)]);
    let stranger = Node::new("C");
    assert!(matches!(
        graph.connect_weighted(&n[0], &stranger, 1),
        Err(GraphError::MissingNode(_))
    ));
    assert!(matches!(
        graph.connect_weighted(&n[0], &n[0], 1),
        Err(GraphError::SelfLoop(_))
    ));
    assert!(matches!(
        graph.connect_weighted(&n[1], &n[0], 1),
        Err(GraphError::AlreadyConnected(_, _))
    ));
    assert!(matches!(graph.add_node(&n[0]), Err(GraphError::DuplicateNode(_))));
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_remove_node_purges_connections() {
    let (mut graph, n) = build(&["A", "B", "C"], &[(0, 1, 1), (1, 2, 2), (0, 2, 3)]);
    graph.remove_node(&n[1]).unwrap();

    assert!(!graph.contains_node(&n[1]));
    assert_eq!(graph.size(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.neighbors(&n[0]).collect::<Vec<_>>(), vec![&n[2]]);
    assert_eq!(graph.neighbors(&n[2]).collect::<Vec<_>>(), vec![&n[0]]);
    assert!(matches!(graph.remove_node(&n[1]), Err(GraphError::MissingNode(_))));
}

#[test]
fn test_nodes_are_identified_by_handle() {
    let mut graph = Graph::new();
    let first = Node::new("same");
    let second = Node::new("same");
    graph.add_node(&first).unwrap();
    graph.add_node(&second).unwrap();
    assert_eq!(graph.size(), 2);
    graph.connect_weighted(&first, &second, 1).unwrap();
    assert!(graph.is_connected(&second, &first));
}

#[test]
fn test_disconnect_returns_connection() {
    let (mut graph, n) = build(&["A", "B"], &[(0, 1, 4)]);
    let connection = graph.disconnect(&n[0], &n[1]).unwrap();
    assert_eq!(connection.weight(), 4);
    assert!(!graph.is_connected(&n[0], &n[1]));
    assert_eq!(graph.degree(&n[0]), 0);
    assert!(matches!(
        graph.disconnect(&n[0], &n[1]),
        Err(GraphError::NotConnected(_, _))
    ));
}
