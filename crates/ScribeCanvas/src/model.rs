//! # Core Data Model
//!
//! This module defines the visual graph model consumed by canvas hosts:
//! typed process nodes, group nodes, and the edges between them.
//!
//! Node ids are plain strings because they must survive a Mermaid text
//! round trip; the engine never invents opaque handles for parsed ids.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Default node footprint width, in canvas units.
pub const NODE_WIDTH: f32 = 280.0;
/// Default node footprint height, in canvas units.
pub const NODE_HEIGHT: f32 = 80.0;

use bitflags::bitflags;

bitflags! {
    /// Bitflags representing various boolean states of a node.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// The node cannot be moved or deleted.
        const LOCKED = 1 << 0;
        /// The node is not rendered.
        const HIDDEN = 1 << 1;
        /// The node is currently selected by the user.
        const SELECTED = 1 << 2;
    }
}

// Manual Serialize/Deserialize implementation to keep the wire format a bare u8.
impl Serialize for NodeFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for NodeFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

/// Semantic role of a process node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Trigger,
    #[default]
    Action,
    Decision,
    Delay,
    Outcome,
    Integration,
    Tool,
}

/// Rendered outline of a process node.
///
/// Both plain and rounded rectangles from the text notation collapse into
/// `Rectangle`; the distinction does not survive conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualShape {
    #[default]
    Rectangle,
    Diamond,
    Stadium,
    Circle,
    Database,
    Subroutine,
}

/// Side of a node an edge attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// Border treatment override for a process node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Reference to a known external tool, used for logo lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRef {
    pub id: String,
    /// Domain the host resolves to a favicon/logo URL.
    pub domain: String,
}

/// Payload of a process node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessData {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub node_type: NodeType,
    #[serde(default)]
    pub shape: VisualShape,
    /// Set when the label matched the known-tool directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<ToolRef>,
    /// Measured size, when the host has reported one. Absent means the
    /// default footprint applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,
}

impl ProcessData {
    pub fn new(label: impl Into<String>, node_type: NodeType, shape: VisualShape) -> Self {
        Self {
            label: label.into(),
            description: None,
            node_type,
            shape,
            tool: None,
            size: None,
            custom_color: None,
            border_style: None,
        }
    }
}

/// Payload of a group node (a rendered subgraph cluster).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupData {
    pub label: String,
    /// Declaration index of the originating subgraph, cycled through the
    /// host's group palette. Cosmetic only.
    pub color_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec2>,
}

/// Node payload, discriminated by kind.
///
/// Process fields and group fields never mix: a group has no `node_type`,
/// a process node has no `color_index`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodePayload {
    Process(ProcessData),
    Group(GroupData),
}

/// A positioned node on the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualNode {
    pub id: String,
    /// World-space position of the top-left corner.
    pub position: Vec2,
    #[serde(flatten)]
    pub payload: NodePayload,
    /// Id of the enclosing group node, if any. Groups themselves never
    /// carry a parent; groups do not nest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub flags: NodeFlags,
}

impl VisualNode {
    /// Creates a process node at the given position.
    pub fn process(id: impl Into<String>, position: Vec2, data: ProcessData) -> Self {
        Self {
            id: id.into(),
            position,
            payload: NodePayload::Process(data),
            parent_id: None,
            flags: NodeFlags::default(),
        }
    }

    /// Creates a group node at the given position.
    pub fn group(id: impl Into<String>, position: Vec2, data: GroupData) -> Self {
        Self {
            id: id.into(),
            position,
            payload: NodePayload::Group(data),
            parent_id: None,
            flags: NodeFlags::default(),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.payload, NodePayload::Group(_))
    }

    pub fn label(&self) -> &str {
        match &self.payload {
            NodePayload::Process(data) => &data.label,
            NodePayload::Group(data) => &data.label,
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        match &mut self.payload {
            NodePayload::Process(data) => data.label = label.into(),
            NodePayload::Group(data) => data.label = label.into(),
        }
    }

    pub fn process_data(&self) -> Option<&ProcessData> {
        match &self.payload {
            NodePayload::Process(data) => Some(data),
            NodePayload::Group(_) => None,
        }
    }

    /// Effective footprint: the measured size when the host reported one,
    /// else the default footprint.
    pub fn size_or_default(&self) -> Vec2 {
        let size = match &self.payload {
            NodePayload::Process(data) => data.size,
            NodePayload::Group(data) => data.size,
        };
        size.unwrap_or(Vec2::new(NODE_WIDTH, NODE_HEIGHT))
    }

    pub fn is_selected(&self) -> bool {
        self.flags.contains(NodeFlags::SELECTED)
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.flags.set(NodeFlags::SELECTED, selected);
    }
}

/// A directed edge between two process nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<HandleSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<HandleSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl VisualEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
