//! Semantic node-type inference.
//!
//! Classification is heuristic and ordered; the ordering is behavior, not
//! an implementation detail. Diamonds are decisions no matter what; sources
//! are triggers before sinks are outcomes, so an isolated node classifies
//! as a trigger.

use crate::parse::{NodeShape, ParsedEdge, ParsedNode};
use scribe_canvas::model::NodeType;

const DELAY_KEYWORDS: [&str; 3] = ["wait", "delay", "timer"];
const INTEGRATION_KEYWORDS: [&str; 3] = ["api", "webhook", "integration"];

/// Infers the semantic type of a parsed node from its shape, its degree,
/// and its label.
pub fn infer_node_type(node: &ParsedNode, edges: &[ParsedEdge], node_count: usize) -> NodeType {
    if node.shape == NodeShape::Diamond {
        return NodeType::Decision;
    }

    let incoming = edges.iter().filter(|e| e.target == node.id).count();
    let outgoing = edges.iter().filter(|e| e.source == node.id).count();

    if incoming == 0 {
        return NodeType::Trigger;
    }
    if outgoing == 0 && node_count > 1 {
        return NodeType::Outcome;
    }
    if outgoing > 1 {
        return NodeType::Decision;
    }

    let label = node.label.to_lowercase();
    if DELAY_KEYWORDS.iter().any(|k| label.contains(k)) {
        return NodeType::Delay;
    }
    if INTEGRATION_KEYWORDS.iter().any(|k| label.contains(k)) {
        return NodeType::Integration;
    }

    NodeType::Action
}
