//! # Flow State Store
//!
//! Single source of truth for the live graph. The store is an explicitly
//! constructed value passed by reference to whatever needs it; there is no
//! process-global instance.
//!
//! Every mutating operation validates first, then records the pre-mutation
//! snapshot, then applies. A failed validation therefore leaves both the
//! live state and the history untouched.

use crate::history::{DEFAULT_HISTORY_CAP, History, Snapshot};
use crate::model::{HandleSide, NodePayload, VisualEdge, VisualNode};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("node `{0}` already exists")]
    DuplicateNode(String),
    #[error("node `{0}` does not exist")]
    UnknownNode(String),
    #[error("edge endpoint `{0}` does not reference a process node")]
    UnknownEndpoint(String),
    #[error("parent `{0}` does not reference a group node")]
    InvalidParent(String),
}

/// Canonical node/edge arrays plus bounded undo/redo history.
pub struct FlowStore {
    nodes: Vec<VisualNode>,
    edges: Vec<VisualEdge>,
    history: History,
}

impl Default for FlowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowStore {
    pub fn new() -> Self {
        Self::with_history_cap(DEFAULT_HISTORY_CAP)
    }

    pub fn with_history_cap(cap: usize) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            history: History::new(cap),
        }
    }

    pub fn nodes(&self) -> &[VisualNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[VisualEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&VisualNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn commit(&mut self) {
        self.history.record(Snapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        });
    }

    fn is_process(&self, id: &str) -> bool {
        self.node(id).is_some_and(|n| !n.is_group())
    }

    /// Inserts a node, enforcing the parent invariants: a parent must be an
    /// existing group, and groups never carry a parent themselves.
    pub fn add_node(&mut self, node: VisualNode) -> Result<(), StoreError> {
        if self.node(&node.id).is_some() {
            return Err(StoreError::DuplicateNode(node.id));
        }
        if let Some(parent) = &node.parent_id {
            if node.is_group() {
                return Err(StoreError::InvalidParent(parent.clone()));
            }
            match self.node(parent) {
                Some(p) if p.is_group() => {}
                _ => return Err(StoreError::InvalidParent(parent.clone())),
            }
        }
        self.commit();
        tracing::debug!(node = %node.id, "add node");
        self.nodes.push(node);
        Ok(())
    }

    /// Inserts a fully formed edge after validating both endpoints.
    pub fn add_edge(&mut self, edge: VisualEdge) -> Result<(), StoreError> {
        if !self.is_process(&edge.source) {
            return Err(StoreError::UnknownEndpoint(edge.source));
        }
        if !self.is_process(&edge.target) {
            return Err(StoreError::UnknownEndpoint(edge.target));
        }
        self.commit();
        tracing::debug!(edge = %edge.id, source = %edge.source, target = %edge.target, "add edge");
        self.edges.push(edge);
        Ok(())
    }

    /// Connects two handles into a new edge. This is the only path by which
    /// interactive drag-to-connect creates edges; missing handles default to
    /// bottom-out, top-in.
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        source_handle: Option<HandleSide>,
        target_handle: Option<HandleSide>,
    ) -> Result<String, StoreError> {
        if !self.is_process(source) {
            return Err(StoreError::UnknownEndpoint(source.to_string()));
        }
        if !self.is_process(target) {
            return Err(StoreError::UnknownEndpoint(target.to_string()));
        }
        self.commit();
        let id = format!("edge-{}", Uuid::new_v4());
        tracing::debug!(edge = %id, source, target, "connect");
        self.edges.push(VisualEdge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            source_handle: Some(source_handle.unwrap_or(HandleSide::Bottom)),
            target_handle: Some(target_handle.unwrap_or(HandleSide::Top)),
            label: None,
        });
        Ok(id)
    }

    /// Rewrites a node's label.
    pub fn update_label(&mut self, id: &str, label: &str) -> Result<(), StoreError> {
        if self.node(id).is_none() {
            return Err(StoreError::UnknownNode(id.to_string()));
        }
        self.commit();
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .expect("existence checked before commit");
        node.set_label(label);
        Ok(())
    }

    /// Applies an arbitrary payload edit to one node as a single history
    /// entry.
    pub fn update_node_data(
        &mut self,
        id: &str,
        mutate: impl FnOnce(&mut NodePayload),
    ) -> Result<(), StoreError> {
        if self.node(id).is_none() {
            return Err(StoreError::UnknownNode(id.to_string()));
        }
        self.commit();
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .expect("existence checked before commit");
        mutate(&mut node.payload);
        Ok(())
    }

    /// Removes every node flagged SELECTED plus every edge touching a
    /// removed node, as one history entry. Children of a deleted group are
    /// un-parented, not deleted.
    pub fn delete_selection(&mut self) {
        let removed: Vec<String> = self
            .nodes
            .iter()
            .filter(|n| n.is_selected())
            .map(|n| n.id.clone())
            .collect();
        if removed.is_empty() {
            return;
        }
        self.commit();
        tracing::debug!(count = removed.len(), "delete selection");
        self.nodes.retain(|n| !n.is_selected());
        for node in &mut self.nodes {
            if let Some(parent) = &node.parent_id
                && removed.iter().any(|id| id == parent)
            {
                node.parent_id = None;
            }
        }
        self.edges
            .retain(|e| !removed.contains(&e.source) && !removed.contains(&e.target));
    }

    /// Replaces the node array wholesale.
    pub fn set_nodes(&mut self, nodes: Vec<VisualNode>) {
        self.commit();
        self.nodes = nodes;
    }

    /// Replaces the edge array wholesale.
    pub fn set_edges(&mut self, edges: Vec<VisualEdge>) {
        self.commit();
        self.edges = edges;
    }

    /// Replaces the whole graph as one history entry (Mermaid apply, sample
    /// load, generated-flow application).
    pub fn replace_graph(&mut self, nodes: Vec<VisualNode>, edges: Vec<VisualEdge>) {
        self.commit();
        tracing::debug!(nodes = nodes.len(), edges = edges.len(), "replace graph");
        self.nodes = nodes;
        self.edges = edges;
    }

    /// Empties the graph.
    pub fn clear(&mut self) {
        self.commit();
        self.nodes.clear();
        self.edges.clear();
    }

    /// Restores the previous history snapshot. Silent no-op at the boundary.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.nodes = snapshot.nodes;
                self.edges = snapshot.edges;
                true
            }
            None => false,
        }
    }

    /// Restores the next history snapshot. Silent no-op at the boundary.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.nodes = snapshot.nodes;
                self.edges = snapshot.edges;
                true
            }
            None => false,
        }
    }

    /// Flags a node as selected/deselected. Selection is transient view
    /// state and does not enter history.
    pub fn set_selected(&mut self, id: &str, selected: bool) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            node.set_selected(selected);
        }
    }

    pub fn clear_selection(&mut self) {
        for node in &mut self.nodes {
            node.set_selected(false);
        }
    }

    /// Aligns the selected nodes; a single history entry when at least two
    /// nodes are selected, otherwise a no-op.
    pub fn align_selected(&mut self, mode: crate::align::AlignMode) {
        let selected: Vec<usize> = self.selected_indices();
        if selected.len() < 2 {
            return;
        }
        self.commit();
        let mut subset: Vec<VisualNode> = selected.iter().map(|&i| self.nodes[i].clone()).collect();
        crate::align::align(&mut subset, mode);
        self.write_back(&selected, subset);
    }

    /// Distributes the selected nodes; a single history entry when at least
    /// three nodes are selected, otherwise a no-op.
    pub fn distribute_selected(&mut self, axis: crate::align::DistributeAxis) {
        let selected: Vec<usize> = self.selected_indices();
        if selected.len() < 3 {
            return;
        }
        self.commit();
        let mut subset: Vec<VisualNode> = selected.iter().map(|&i| self.nodes[i].clone()).collect();
        crate::align::distribute(&mut subset, axis);
        self.write_back(&selected, subset);
    }

    fn selected_indices(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_selected())
            .map(|(i, _)| i)
            .collect()
    }

    fn write_back(&mut self, indices: &[usize], subset: Vec<VisualNode>) {
        for (&i, node) in indices.iter().zip(subset) {
            self.nodes[i] = node;
        }
    }
}
