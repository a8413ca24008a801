//! # Text Parser
//!
//! Turns Mermaid flowchart source into a structured node/edge/subgraph
//! model. Only the flowchart/graph subset is supported; other diagram
//! families are out of scope.
//!
//! The parser is a pure function of its input: no side effects beyond
//! debug-level diagnostics.

mod lexer;

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Canonical layout direction.
///
/// The text notation accepts four spellings, but only two canonical values
/// exist downstream: `TD`, `TB`, and `RL` all collapse into `TopBottom`,
/// matching the behavior of the editor this engine mirrors. `RL` does not
/// get a right-to-left layout of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    TopBottom,
    LeftRight,
}

impl Direction {
    /// Keyword emitted in a serialized header line.
    pub fn keyword(&self) -> &'static str {
        match self {
            Direction::TopBottom => "TD",
            Direction::LeftRight => "LR",
        }
    }
}

/// Node shape as written in the text notation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    #[default]
    Rect,
    Diamond,
    Rounded,
    Stadium,
    Circle,
    Database,
    Subroutine,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParsedNode {
    pub id: String,
    pub label: String,
    pub shape: NodeShape,
    /// The subgraph active when this node was first referenced, if any.
    pub subgraph_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParsedEdge {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParsedSubgraph {
    pub id: String,
    pub label: String,
    /// Member ids in first-reference order.
    pub node_ids: Vec<String>,
}

/// Result of a successful parse.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedFlow {
    pub direction: Direction,
    pub nodes: Vec<ParsedNode>,
    pub edges: Vec<ParsedEdge>,
    pub subgraphs: Vec<ParsedSubgraph>,
}

/// Parses Mermaid flowchart text.
///
/// The first non-empty line must be a `graph`/`flowchart` direction
/// declaration. Remaining lines are statements: subgraph open/close, edge
/// chains (with `&` fan-out and optional labels), standalone node
/// definitions, `%%` comments, or blanks.
pub fn parse(text: &str) -> Result<ParsedFlow, ParseError> {
    let mut lines = text.lines().enumerate();

    let direction = loop {
        let Some((_, raw)) = lines.next() else {
            return Err(ParseError::MissingDirection);
        };
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        break parse_header(line).ok_or(ParseError::MissingDirection)?;
    };

    let mut parser = FlowParser::default();
    for (index, raw) in lines {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("%%") {
            continue;
        }
        parser.statement(index + 1, line)?;
    }

    if parser.nodes.is_empty() {
        return Err(ParseError::NoNodes);
    }
    for edge in &parser.edges {
        for id in [&edge.source, &edge.target] {
            if !parser.index.contains_key(id) {
                return Err(ParseError::UnknownNodeReference { id: id.clone() });
            }
        }
    }

    tracing::debug!(
        nodes = parser.nodes.len(),
        edges = parser.edges.len(),
        subgraphs = parser.subgraphs.len(),
        "parsed flowchart"
    );
    Ok(ParsedFlow {
        direction,
        nodes: parser.nodes,
        edges: parser.edges,
        subgraphs: parser.subgraphs,
    })
}

/// Matches `graph TD`-style headers, case-insensitively, tolerating a
/// trailing semicolon on the direction token.
fn parse_header(line: &str) -> Option<Direction> {
    let mut words = line.split_whitespace();
    let keyword = words.next()?.to_lowercase();
    if keyword != "graph" && keyword != "flowchart" {
        return None;
    }
    let direction = words.next()?.trim_end_matches(';').to_lowercase();
    match direction.as_str() {
        "lr" => Some(Direction::LeftRight),
        "td" | "tb" | "rl" => Some(Direction::TopBottom),
        _ => None,
    }
}

#[derive(Default)]
struct FlowParser {
    nodes: Vec<ParsedNode>,
    edges: Vec<ParsedEdge>,
    subgraphs: Vec<ParsedSubgraph>,
    /// Node id -> index into `nodes`.
    index: HashMap<String, usize>,
    /// Index into `subgraphs` of the active context. Contexts do not nest:
    /// opening a subgraph while one is active replaces it.
    active_subgraph: Option<usize>,
}

impl FlowParser {
    fn statement(&mut self, line_no: usize, line: &str) -> Result<(), ParseError> {
        if let Some(rest) = line.strip_prefix("subgraph")
            && (rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            return self.open_subgraph(line_no, rest.trim());
        }
        if line == "end" {
            self.active_subgraph = None;
            return Ok(());
        }

        if let Some(edge_line) = lexer::split_edge_line(line) {
            let added = self.edge_statement(&edge_line);
            if added > 0 {
                return Ok(());
            }
        }

        if let Some(token) = lexer::parse_node_text(line) {
            self.define_node(token);
            return Ok(());
        }

        Err(ParseError::Syntax {
            line: line_no,
            text: line.to_string(),
        })
    }

    fn open_subgraph(&mut self, line_no: usize, rest: &str) -> Result<(), ParseError> {
        if rest.is_empty() {
            return Err(ParseError::Syntax {
                line: line_no,
                text: "subgraph".to_string(),
            });
        }
        let (id, label) = match rest.find('[') {
            Some(open) => {
                let id = rest[..open].trim();
                let label = rest[open + 1..].trim_end_matches(']').trim();
                (id.to_string(), label.to_string())
            }
            None => (rest.to_string(), rest.to_string()),
        };

        let idx = match self.subgraphs.iter().position(|s| s.id == id) {
            Some(existing) => existing,
            None => {
                self.subgraphs.push(ParsedSubgraph {
                    id,
                    label,
                    node_ids: Vec::new(),
                });
                self.subgraphs.len() - 1
            }
        };
        self.active_subgraph = Some(idx);
        Ok(())
    }

    /// Processes one edge chain, expanding `&` fan-out on each side into
    /// the full source x target cross-product per arrow. Returns the number
    /// of edges added.
    fn edge_statement(&mut self, line: &lexer::EdgeLine) -> usize {
        // Each side is defined (and registered) once, then referenced by id
        // for every arrow it participates in.
        let side_ids: Vec<Vec<String>> = line
            .sides
            .iter()
            .map(|side| {
                lexer::split_fanout(side)
                    .into_iter()
                    .filter_map(lexer::parse_node_text)
                    .map(|token| self.define_node(token))
                    .collect()
            })
            .collect();

        let mut added = 0;
        for (arrow_idx, arrow) in line.arrows.iter().enumerate() {
            for source in &side_ids[arrow_idx] {
                for target in &side_ids[arrow_idx + 1] {
                    self.edges.push(ParsedEdge {
                        source: source.clone(),
                        target: target.clone(),
                        label: arrow.label.clone(),
                    });
                    added += 1;
                }
            }
        }
        added
    }

    /// Registers a node definition, returning its id. The first definition
    /// of an id wins; later occurrences reuse the stored label and shape.
    /// Subgraph membership is recorded only at first reference.
    fn define_node(&mut self, token: lexer::NodeToken) -> String {
        if self.index.contains_key(&token.id) {
            return token.id;
        }

        let subgraph_id = self.active_subgraph.map(|idx| {
            self.subgraphs[idx].node_ids.push(token.id.clone());
            self.subgraphs[idx].id.clone()
        });
        self.index.insert(token.id.clone(), self.nodes.len());
        self.nodes.push(ParsedNode {
            id: token.id.clone(),
            label: token.label,
            shape: token.shape,
            subgraph_id,
        });
        token.id
    }
}
