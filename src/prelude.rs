pub use crate::connection::{Connection, Direction, EdgeId, Weight};
pub use crate::error::GraphError;
pub use crate::generate::{GenerateError, RandomGraphConfig, random_graph};
pub use crate::graph::Graph;
pub use crate::node::Node;
pub use crate::path::Path;
pub use crate::shortest_path::{DijkstraOptions, ShortestPath};
pub use crate::spanning_tree::SpanningTree;
