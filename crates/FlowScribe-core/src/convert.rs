//! # Graph-to-Visual Converter
//!
//! Maps a parsed flow into the visual node/edge records the canvas
//! consumes. Positions assigned here are provisional stacking only; the
//! layout engine overwrites them.

use crate::infer::infer_node_type;
use crate::parse::{Direction, NodeShape, ParsedFlow};
use crate::tools::match_tool;
use glam::Vec2;
use scribe_canvas::model::{
    GroupData, HandleSide, NodeType, ProcessData, VisualEdge, VisualNode, VisualShape,
};

#[derive(Clone, Copy, Debug)]
pub struct ConvertOptions {
    /// Emit one group node per parsed subgraph and parent members into it.
    pub enable_groups: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self { enable_groups: true }
    }
}

fn visual_shape(shape: NodeShape) -> VisualShape {
    match shape {
        // Plain and rounded rectangles collapse; the distinction does not
        // survive conversion.
        NodeShape::Rect | NodeShape::Rounded => VisualShape::Rectangle,
        NodeShape::Diamond => VisualShape::Diamond,
        NodeShape::Stadium => VisualShape::Stadium,
        NodeShape::Circle => VisualShape::Circle,
        NodeShape::Database => VisualShape::Database,
        NodeShape::Subroutine => VisualShape::Subroutine,
    }
}

/// Converts a parsed flow into visual nodes and edges.
///
/// Re-converting the same flow with the same options yields identical
/// output: edge ids are synthesized from the running index and endpoint
/// ids, and group color indices follow declaration order.
pub fn convert(flow: &ParsedFlow, opts: &ConvertOptions) -> (Vec<VisualNode>, Vec<VisualEdge>) {
    let mut nodes = Vec::with_capacity(flow.nodes.len() + flow.subgraphs.len());

    if opts.enable_groups {
        for (index, subgraph) in flow.subgraphs.iter().enumerate() {
            nodes.push(VisualNode::group(
                subgraph.id.clone(),
                Vec2::new(0.0, index as f32 * 400.0),
                GroupData {
                    label: subgraph.label.clone(),
                    color_index: index,
                    size: None,
                },
            ));
        }
    }

    for (index, parsed) in flow.nodes.iter().enumerate() {
        let mut data = ProcessData::new(
            parsed.label.clone(),
            infer_node_type(parsed, &flow.edges, flow.nodes.len()),
            visual_shape(parsed.shape),
        );
        // A tool match overrides whatever the heuristics inferred.
        if let Some(tool) = match_tool(&parsed.label) {
            data.node_type = NodeType::Tool;
            data.tool = Some(tool.to_ref());
        }

        let mut node = VisualNode::process(
            parsed.id.clone(),
            Vec2::new(0.0, index as f32 * 150.0),
            data,
        );
        if opts.enable_groups
            && let Some(subgraph_id) = &parsed.subgraph_id
        {
            if flow.subgraphs.iter().any(|s| &s.id == subgraph_id) {
                node.parent_id = Some(subgraph_id.clone());
            } else {
                // Cannot happen after a successful parse; a conversion
                // inconsistency is logged, not surfaced.
                tracing::error!(node = %parsed.id, subgraph = %subgraph_id, "node references undeclared subgraph");
            }
        }
        nodes.push(node);
    }

    let (source_handle, target_handle) = match flow.direction {
        Direction::TopBottom => (HandleSide::Bottom, HandleSide::Top),
        Direction::LeftRight => (HandleSide::Right, HandleSide::Left),
    };
    let edges = flow
        .edges
        .iter()
        .enumerate()
        .map(|(index, parsed)| VisualEdge {
            id: format!("e{index}-{}-{}", parsed.source, parsed.target),
            source: parsed.source.clone(),
            target: parsed.target.clone(),
            source_handle: Some(source_handle),
            target_handle: Some(target_handle),
            label: parsed.label.clone(),
        })
        .collect();

    (nodes, edges)
}
