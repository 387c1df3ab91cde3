//! An in-memory graph store with a suite of classical algorithms.
//!
//! A [`Graph`] holds [`Node`] handles and the [`Connection`]s between them.
//! Nodes are identified by handle, not by label, and each connection is
//! stored once and shared by both of its endpoints.  Connections have a
//! [`Direction`], but every traversal crosses them both ways; direction only
//! matters to the Pajek writer and to [`Graph::alpha_beta`].
//!
//! Algorithms are methods on [`Graph`]:
//!
//! - traversal and bounded search: [`Graph::bfs`], [`Graph::dfs`],
//!   [`Graph::dfs_limited`], [`Graph::iddfs`], [`Graph::heuristic_search`],
//!   [`Graph::iterative_heuristic_search`], [`Graph::nodes_at_distance`]
//! - shortest paths: [`Graph::dijkstra`], [`Graph::dijkstra_with`],
//!   [`Graph::all_pairs_distance`]
//! - spanning trees: [`Graph::kruskal`], [`Graph::prim`]
//! - analysis: [`Graph::is_cyclic`], [`Graph::is_strongly_connected`],
//!   [`Graph::is_eulerian`], [`Graph::closeness_centrality`],
//!   [`Graph::betweenness_centrality`]
//! - adversarial search: [`Graph::alpha_beta`]
//!
//! [`generate::random_graph`] builds seeded random graphs, and [`pajek`]
//! reads and writes the Pajek text format.
//!
//! # Features
//!
//! - `tracing` (default): spans and events around the algorithms, plus the
//!   timing helpers in [`tracing_support`].
//! - `pathfinding` (default): [`Graph::connected_components`].

pub mod analysis;
pub mod connection;
pub mod error;
pub mod format_debug;
pub mod generate;
pub mod graph;
pub mod minimax;
pub mod node;
pub mod pajek;
pub mod path;
pub mod payload;
pub mod prelude;
pub mod search;
pub mod shortest_path;
pub mod spanning_tree;
pub mod tracing_support;

pub use connection::{Connection, Direction, EdgeId, GENERIC_LABEL, Weight};
pub use error::GraphError;
pub use graph::Graph;
pub use node::Node;
pub use path::Path;
pub use payload::{Payload, PayloadError};
pub use shortest_path::{DijkstraOptions, DistanceMatrix, ShortestPath};
pub use spanning_tree::SpanningTree;
