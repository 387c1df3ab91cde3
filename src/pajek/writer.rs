use std::{
    fmt::{self, Display},
    io,
};

use crate::{
    connection::{Connection, Direction},
    graph::Graph,
    node::Node,
};

/// Displays a graph in Pajek format.
pub struct Pajek<'g>(pub &'g Graph);

impl Display for Pajek<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.0;
        writeln!(f, "*Vertices {}", graph.size())?;
        for (index, node) in graph.nodes().enumerate() {
            writeln!(f, "{} \"{}\"", index + 1, node.label())?;
        }

        let (arcs, edges): (Vec<&Connection>, Vec<&Connection>) = graph
            .edges()
            .map(|(_, conn)| conn)
            .partition(|conn| conn.direction().is_directed());

        if !arcs.is_empty() {
            writeln!(f, "*Arcs")?;
            for conn in arcs {
                let Some((from, to)) = conn.arc() else {
                    continue;
                };
                write_line(f, graph, from, to, conn)?;
            }
        }
        if !edges.is_empty() {
            writeln!(f, "*Edges")?;
            for conn in edges {
                let Some((a, b)) = conn.endpoints() else {
                    continue;
                };
                debug_assert_eq!(conn.direction(), Direction::TwoWay);
                write_line(f, graph, a, b, conn)?;
            }
        }
        Ok(())
    }
}

fn write_line(
    f: &mut fmt::Formatter<'_>,
    graph: &Graph,
    from: &Node,
    to: &Node,
    conn: &Connection,
) -> fmt::Result {
    let (Some(from), Some(to)) = (graph.index_of(from), graph.index_of(to)) else {
        return Ok(());
    };
    writeln!(f, "{} {} {}", from + 1, to + 1, conn.weight())
}

/// Renders a graph in Pajek format.
pub fn to_pajek(graph: &Graph) -> String {
    Pajek(graph).to_string()
}

/// Writes a graph in Pajek format.
pub fn write_pajek(graph: &Graph, output: &mut impl io::Write) -> io::Result<()> {
    write!(output, "{}", Pajek(graph))
}
