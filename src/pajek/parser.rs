use std::{collections::HashMap, io};

use crate::{
    connection::{Connection, Direction, GENERIC_LABEL, Weight},
    error::GraphError,
    graph::Graph,
    node::Node,
    tracing_support::{debug, info_span},
};

/// Errors that can occur while reading Pajek text.  Line numbers start at 1.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("line {line}: unknown section `{name}`")]
    UnknownSection { line: usize, name: String },
    #[error("line {line}: vertex {index} is already defined")]
    DuplicateVertex { line: usize, index: i64 },
    #[error("line {line}: vertex {index} is not defined")]
    UndefinedVertex { line: usize, index: i64 },
    #[error("line {line}: label of vertex {index} is not quoted")]
    MalformedLabel { line: usize, index: i64 },
    #[error("line {line}: arcs and edges need vertices to be defined first")]
    NoVertices { line: usize },
    #[error("line {line}: arcs and edges need two vertex indexes")]
    MissingEndpoint { line: usize },
    #[error("line {line}: `{token}` is not an integer")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: {source}")]
    Rejected {
        line: usize,
        #[source]
        source: GraphError,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ParseError {
    /// The line the error was found on, if it came from the text itself.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::UnknownSection { line, .. }
            | ParseError::DuplicateVertex { line, .. }
            | ParseError::UndefinedVertex { line, .. }
            | ParseError::MalformedLabel { line, .. }
            | ParseError::NoVertices { line }
            | ParseError::MissingEndpoint { line }
            | ParseError::InvalidNumber { line, .. }
            | ParseError::Rejected { line, .. } => Some(*line),
            ParseError::Io(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Vertices,
    Arcs,
    Edges,
}

struct Parser {
    graph: Graph,
    vertices: HashMap<i64, Node>,
    section: Option<Section>,
    line: usize,
}

fn parse_int<T: std::str::FromStr>(token: &str, line: usize) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

impl Parser {
    fn new() -> Self {
        Self {
            graph: Graph::new(),
            vertices: HashMap::new(),
            section: None,
            line: 0,
        }
    }

    fn parse_line(&mut self, text: &str) -> Result<(), ParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        if let Some(header) = text.strip_prefix('*') {
            let name = header.split_whitespace().next().unwrap_or_default();
            self.section = Some(match name.to_lowercase().as_str() {
                "vertices" => Section::Vertices,
                "arcs" => Section::Arcs,
                "edges" => Section::Edges,
                _ => {
                    return Err(ParseError::UnknownSection {
                        line: self.line,
                        name: name.to_string(),
                    });
                }
            });
            return Ok(());
        }

        match self.section {
            // Anything before the first header is ignored.
            None => Ok(()),
            Some(Section::Vertices) => self.parse_vertex(text),
            Some(Section::Arcs) => self.parse_link(text, Direction::AToB),
            Some(Section::Edges) => self.parse_link(text, Direction::TwoWay),
        }
    }

    fn parse_vertex(&mut self, text: &str) -> Result<(), ParseError> {
        let line = self.line;
        let (index, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
        let index: i64 = parse_int(index, line)?;
        if self.vertices.contains_key(&index) {
            return Err(ParseError::DuplicateVertex { line, index });
        }

        let rest = rest.trim();
        let label = if rest.is_empty() {
            format!("Node {index}")
        } else {
            rest.strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .ok_or(ParseError::MalformedLabel { line, index })?
                .to_string()
        };

        let node = Node::new(label);
        self.graph
            .add_node(&node)
            .map_err(|source| ParseError::Rejected { line, source })?;
        self.vertices.insert(index, node);
        Ok(())
    }

    fn parse_link(&mut self, text: &str, direction: Direction) -> Result<(), ParseError> {
        let line = self.line;
        if self.vertices.is_empty() {
            return Err(ParseError::NoVertices { line });
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        let [a, b, rest @ ..] = tokens.as_slice() else {
            return Err(ParseError::MissingEndpoint { line });
        };
        let a = self.vertex(parse_int(a, line)?)?;
        let b = self.vertex(parse_int(b, line)?)?;
        let weight: Weight = match rest.first() {
            Some(token) => parse_int(token, line)?,
            None => 0,
        };

        self.graph
            .connect(&a, &b, Connection::new(GENERIC_LABEL, direction, weight))
            .map_err(|source| ParseError::Rejected { line, source })?;
        Ok(())
    }

    fn vertex(&self, index: i64) -> Result<Node, ParseError> {
        self.vertices
            .get(&index)
            .cloned()
            .ok_or(ParseError::UndefinedVertex {
                line: self.line,
                index,
            })
    }
}

/// Parses Pajek text into a new graph.  Parsing stops at the first error,
/// and no graph is returned in that case.
///
/// Blank lines and lines before the first section header are ignored.
/// Section headers are case-insensitive.  A vertex line is an index followed
/// by an optional quoted label (default `Node <index>`); an arc or edge line
/// is two vertex indexes followed by an optional weight (default 0).
pub fn from_pajek(text: &str) -> Result<Graph, ParseError> {
    let _span = info_span!("from_pajek").entered();
    let mut parser = Parser::new();
    for (number, line) in text.lines().enumerate() {
        parser.line = number + 1;
        parser.parse_line(line)?;
    }
    debug!(
        nodes = parser.graph.size(),
        edges = parser.graph.edge_count(),
        "parsed pajek graph"
    );
    Ok(parser.graph)
}
