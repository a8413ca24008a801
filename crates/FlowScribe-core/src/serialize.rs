//! # Visual-to-Text Serializer
//!
//! Walks the visual graph and re-emits flowchart source: the structural
//! inverse of parsing and conversion. Topology, labels, shapes, and
//! grouping survive a round trip; formatting, comments, and original id
//! spellings do not.

use crate::parse::Direction;
use scribe_canvas::model::{NodePayload, VisualEdge, VisualNode, VisualShape};

/// Replaces every character outside `[A-Za-z0-9_]` with `_`, so emitted ids
/// never collide with the bracket syntax. Node definitions and edge
/// endpoints go through the same mapping, keeping the output
/// self-consistent.
fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Double quotes inside a label would terminate the bracket syntax early;
/// they degrade to single quotes.
fn clean_label(label: &str) -> String {
    label.replace('"', "'")
}

fn node_line(id: &str, shape: VisualShape, label: &str) -> String {
    let id = sanitize_id(id);
    let label = clean_label(label);
    match shape {
        VisualShape::Rectangle => format!("{id}[{label}]"),
        VisualShape::Diamond => format!("{id}{{{label}}}"),
        VisualShape::Circle => format!("{id}(({label}))"),
        VisualShape::Stadium => format!("{id}([{label}])"),
        VisualShape::Database => format!("{id}[({label})]"),
        VisualShape::Subroutine => format!("{id}[[{label}]]"),
    }
}

/// Serializes the visual graph back into flowchart text.
pub fn serialize(nodes: &[VisualNode], edges: &[VisualEdge], direction: Direction) -> String {
    let mut out = format!("graph {}\n", direction.keyword());

    let groups: Vec<&VisualNode> = nodes.iter().filter(|n| n.is_group()).collect();
    let mut emitted_as_child: Vec<&str> = Vec::new();

    for group in &groups {
        let children: Vec<&VisualNode> = nodes
            .iter()
            .filter(|n| !n.is_group() && n.parent_id.as_deref() == Some(group.id.as_str()))
            .collect();
        // An empty subgraph would parse back as a free-text one-node group;
        // groups without current children are skipped entirely.
        if children.is_empty() {
            continue;
        }

        let label = clean_label(group.label().trim());
        if label.is_empty() {
            out.push_str(&format!("subgraph {}\n", sanitize_id(&group.id)));
        } else {
            out.push_str(&format!("subgraph {} [{}]\n", sanitize_id(&group.id), label));
        }
        for child in children {
            if let NodePayload::Process(data) = &child.payload {
                out.push_str("    ");
                out.push_str(&node_line(&child.id, data.shape, &data.label));
                out.push('\n');
                emitted_as_child.push(child.id.as_str());
            }
        }
        out.push_str("end\n");
    }

    for node in nodes {
        if let NodePayload::Process(data) = &node.payload
            && !emitted_as_child.contains(&node.id.as_str())
        {
            out.push_str(&node_line(&node.id, data.shape, &data.label));
            out.push('\n');
        }
    }

    for edge in edges {
        let source = sanitize_id(&edge.source);
        let target = sanitize_id(&edge.target);
        match edge.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => {
                out.push_str(&format!("{source} -->|{}| {target}\n", clean_label(label)));
            }
            _ => out.push_str(&format!("{source} --> {target}\n")),
        }
    }

    out
}
