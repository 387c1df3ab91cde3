//! Reading and writing graphs in the Pajek `.net` text format.
//!
//! ```text
//! *Vertices 3
//! 1 "A"
//! 2 "B"
//! 3 "C"
//! *Arcs
//! 1 2 5
//! *Edges
//! 2 3 1
//! ```
//!
//! Vertices are numbered from 1 in node order.  Directed connections are
//! written under `*Arcs` in their declared direction; `TwoWay` connections
//! are written under `*Edges`.  Reading turns arcs into `AToB` connections
//! and edges into `TwoWay` ones.

mod parser;
mod writer;

use std::{fs, io, path::Path};

pub use parser::{ParseError, from_pajek};
pub use writer::{Pajek, to_pajek, write_pajek};

use crate::graph::Graph;

/// Writes a graph to a file, replacing any previous contents.
pub fn save_pajek(graph: &Graph, path: impl AsRef<Path>) -> io::Result<()> {
    fs::write(path, to_pajek(graph))
}

/// Reads a graph from a file.
pub fn load_pajek(path: impl AsRef<Path>) -> Result<Graph, ParseError> {
    let text = fs::read_to_string(path)?;
    from_pajek(&text)
}
