//! Orchestration between text and canvas: the apply/serialize pipeline.
//!
//! Applying replaces the whole graph as a single history entry. Any failure
//! happens before the store is touched, so a broken input leaves the
//! previously applied graph exactly as it was.

use crate::collab::GeneratedFlow;
use crate::convert::{ConvertOptions, convert};
use crate::error::{FlowError, ParseError};
use crate::layout::{LayoutConfig, layout};
use crate::parse::{Direction, parse};
use crate::serialize::serialize;
use crate::tools::match_tool;
use glam::Vec2;
use scribe_canvas::model::{NodeType, ProcessData, VisualEdge, VisualNode, VisualShape};
use scribe_canvas::store::FlowStore;

/// Parses, converts, lays out, and applies flowchart text to the store.
///
/// The original editor staggered node insertion for a draw-in animation;
/// that is presentation, not semantics, and the replacement here is atomic.
#[tracing::instrument(skip_all, fields(len = text.len()))]
pub fn apply_text(
    store: &mut FlowStore,
    text: &str,
    opts: &ConvertOptions,
    layout_cfg: &LayoutConfig,
) -> Result<Direction, FlowError> {
    let flow = parse(text)?;
    let (mut nodes, edges) = convert(&flow, opts);
    layout(&mut nodes, &edges, flow.direction, layout_cfg);
    tracing::info!(nodes = nodes.len(), edges = edges.len(), "applying parsed flow");
    store.replace_graph(nodes, edges);
    Ok(flow.direction)
}

/// Serializes the live graph back to flowchart text.
pub fn to_text(store: &FlowStore, direction: Direction) -> String {
    serialize(store.nodes(), store.edges(), direction)
}

/// Applies a generated flow to the store.
///
/// Raw text routes through [`apply_text`]. A structured list is untrusted
/// in exactly the same way: ids are deduplicated first-definition-wins,
/// edges must reference known nodes, and an empty node list is rejected,
/// mirroring the parser's own validation.
#[tracing::instrument(skip_all)]
pub fn apply_generated(
    store: &mut FlowStore,
    flow: GeneratedFlow,
    opts: &ConvertOptions,
    layout_cfg: &LayoutConfig,
) -> Result<Direction, FlowError> {
    let (gen_nodes, gen_edges) = match flow {
        GeneratedFlow::Mermaid(text) => return apply_text(store, &text, opts, layout_cfg),
        GeneratedFlow::Structured { nodes, edges } => (nodes, edges),
    };

    if gen_nodes.is_empty() {
        return Err(ParseError::NoNodes.into());
    }

    let mut nodes: Vec<VisualNode> = Vec::with_capacity(gen_nodes.len());
    for generated in gen_nodes {
        if nodes.iter().any(|n| n.id == generated.id) {
            continue;
        }
        let shape = match generated.node_type {
            NodeType::Decision => VisualShape::Diamond,
            _ => VisualShape::Rectangle,
        };
        let mut data = ProcessData::new(generated.label, generated.node_type, shape);
        data.description = generated.description;
        if let Some(tool) = match_tool(&data.label) {
            data.node_type = NodeType::Tool;
            data.tool = Some(tool.to_ref());
        }
        let index = nodes.len();
        nodes.push(VisualNode::process(
            generated.id,
            Vec2::new(0.0, index as f32 * 150.0),
            data,
        ));
    }

    let mut edges: Vec<VisualEdge> = Vec::with_capacity(gen_edges.len());
    for (index, generated) in gen_edges.into_iter().enumerate() {
        for id in [&generated.source, &generated.target] {
            if !nodes.iter().any(|n| &n.id == id) {
                return Err(ParseError::UnknownNodeReference { id: id.clone() }.into());
            }
        }
        let mut edge = VisualEdge::new(
            format!("e{index}-{}-{}", generated.source, generated.target),
            generated.source,
            generated.target,
        );
        edge.label = generated.label;
        edges.push(edge);
    }

    let direction = Direction::TopBottom;
    layout(&mut nodes, &edges, direction, layout_cfg);
    tracing::info!(nodes = nodes.len(), edges = edges.len(), "applying generated flow");
    store.replace_graph(nodes, edges);
    Ok(direction)
}
