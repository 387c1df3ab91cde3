use std::fmt::{Debug, Formatter};

use crate::{
    connection::{Connection, Direction},
    graph::Graph,
};

/// Formats a value with a closure, for building nested debug output.
struct FormatDebugWith<F>(F)
where
    F: Fn(&mut Formatter<'_>) -> std::fmt::Result;

impl<F> Debug for FormatDebugWith<F>
where
    F: Fn(&mut Formatter<'_>) -> std::fmt::Result,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        (self.0)(f)
    }
}

/// Formats a string without quotes.
struct FormatDebugAs(String);

impl Debug for FormatDebugAs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag for an edge, using the node labels in declared direction.
fn edge_tag(connection: &Connection) -> String {
    let Some((a, b)) = connection.endpoints() else {
        return String::from("?");
    };
    match connection.direction() {
        Direction::TwoWay => format!("{} -- {}", a.label(), b.label()),
        Direction::AToB => format!("{} -> {}", a.label(), b.label()),
        Direction::BToA => format!("{} -> {}", b.label(), a.label()),
    }
}

/// Formats a graph for debug output.
///
/// Nodes are listed by label in iteration order; edges are listed as
/// `a -- b` (or `a -> b` for directed edges) mapped to their weight.
pub fn format_debug(graph: &Graph, fmt: &mut Formatter<'_>, name: &str) -> std::fmt::Result {
    fmt.debug_struct(name)
        .field(
            "nodes",
            &FormatDebugWith(|f: &mut Formatter<'_>| {
                f.debug_list()
                    .entries(graph.nodes().map(|node| node.label()))
                    .finish()
            }),
        )
        .field(
            "edges",
            &FormatDebugWith(|f: &mut Formatter<'_>| {
                f.debug_map()
                    .entries(
                        graph
                            .edges()
                            .map(|(_, conn)| (FormatDebugAs(edge_tag(conn)), conn.weight())),
                    )
                    .finish()
            }),
        )
        .finish()
}

/// Writes one line per node: its label, a colon, then each neighbor's label
/// followed by `"; "`.
pub fn format_adjacency(graph: &Graph, fmt: &mut Formatter<'_>) -> std::fmt::Result {
    for node in graph.nodes() {
        write!(fmt, "{}: ", node.label())?;
        for neighbor in graph.neighbors(node) {
            write!(fmt, "{}; ", neighbor.label())?;
        }
        writeln!(fmt)?;
    }
    Ok(())
}
