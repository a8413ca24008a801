//! Collaborator seams: cloud persistence, AI generation, share resolution.
//!
//! The engine owns only the traits and payload shapes. Real backends live
//! with the host; `MemoryDiagramStore` exists so the seams can be exercised
//! in tests without one.

use async_trait::async_trait;
use scribe_canvas::model::{NodeType, VisualEdge, VisualNode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

/// Transient collaborator failures. Surfaced to the host for a retry
/// affordance; they never touch the in-memory graph.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CollabError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("diagram `{0}` not found")]
    NotFound(String),
    #[error("not authorized")]
    Unauthorized,
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// A saved diagram as the cloud store hands it back: plain node/edge arrays
/// plus the optional source text they were applied from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub id: String,
    pub name: String,
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mermaid: Option<String>,
}

/// Partial update for a saved diagram; `None` fields are left as stored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DiagramPatch {
    pub name: Option<String>,
    pub nodes: Option<Vec<VisualNode>>,
    pub edges: Option<Vec<VisualEdge>>,
    pub mermaid: Option<String>,
}

/// Cloud persistence of saved diagrams.
#[async_trait]
pub trait DiagramStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Diagram>, CollabError>;
    async fn create(
        &self,
        name: &str,
        nodes: Vec<VisualNode>,
        edges: Vec<VisualEdge>,
        mermaid: Option<String>,
    ) -> Result<Diagram, CollabError>;
    async fn update(&self, id: &str, patch: DiagramPatch) -> Result<Diagram, CollabError>;
    async fn delete(&self, id: &str) -> Result<(), CollabError>;
    async fn get_by_id(&self, id: &str) -> Result<Diagram, CollabError>;
}

/// A generated flow arrives either as raw flowchart text or as a structured
/// node/edge list. Both are untrusted and go through the same validation
/// path as typed input.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedFlow {
    Structured {
        nodes: Vec<GeneratedNode>,
        edges: Vec<GeneratedEdge>,
    },
    Mermaid(String),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedNode {
    pub id: String,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedEdge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Free text in, flow out.
#[async_trait]
pub trait FlowGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GeneratedFlow, CollabError>;
}

/// A shared diagram resolved from an opaque short code.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SharedDiagram {
    pub name: String,
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
}

/// Short-link resolution. The password, when present, is forwarded verbatim
/// and checked entirely by the collaborator.
#[async_trait]
pub trait ShareResolver: Send + Sync {
    async fn resolve(&self, code: &str, password: Option<&str>) -> Result<SharedDiagram, CollabError>;
}

/// Outcome of a bulk diagram import: well-formed items and a count of
/// rejected ones.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: Vec<Diagram>,
    pub rejected: usize,
}

/// Deserializes a JSON array of diagrams, rejecting malformed items
/// per-item rather than failing the batch.
pub fn import_diagrams(json: &str) -> Result<ImportReport, CollabError> {
    let items: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| CollabError::InvalidPayload(e.to_string()))?;

    let mut report = ImportReport::default();
    for item in items {
        match serde_json::from_value::<Diagram>(item) {
            Ok(diagram) => report.imported.push(diagram),
            Err(e) => {
                tracing::warn!(error = %e, "rejected malformed diagram payload");
                report.rejected += 1;
            }
        }
    }
    tracing::info!(
        imported = report.imported.len(),
        rejected = report.rejected,
        "diagram import finished"
    );
    Ok(report)
}

/// In-memory [`DiagramStore`] used by tests and the playground.
#[derive(Default)]
pub struct MemoryDiagramStore {
    inner: Mutex<HashMap<String, Diagram>>,
}

#[async_trait]
impl DiagramStore for MemoryDiagramStore {
    async fn list(&self) -> Result<Vec<Diagram>, CollabError> {
        let inner = self.inner.lock().expect("store lock");
        Ok(inner.values().cloned().collect())
    }

    async fn create(
        &self,
        name: &str,
        nodes: Vec<VisualNode>,
        edges: Vec<VisualEdge>,
        mermaid: Option<String>,
    ) -> Result<Diagram, CollabError> {
        let diagram = Diagram {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            nodes,
            edges,
            mermaid,
        };
        let mut inner = self.inner.lock().expect("store lock");
        inner.insert(diagram.id.clone(), diagram.clone());
        Ok(diagram)
    }

    async fn update(&self, id: &str, patch: DiagramPatch) -> Result<Diagram, CollabError> {
        let mut inner = self.inner.lock().expect("store lock");
        let diagram = inner
            .get_mut(id)
            .ok_or_else(|| CollabError::NotFound(id.to_string()))?;
        if let Some(name) = patch.name {
            diagram.name = name;
        }
        if let Some(nodes) = patch.nodes {
            diagram.nodes = nodes;
        }
        if let Some(edges) = patch.edges {
            diagram.edges = edges;
        }
        if let Some(mermaid) = patch.mermaid {
            diagram.mermaid = Some(mermaid);
        }
        Ok(diagram.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), CollabError> {
        let mut inner = self.inner.lock().expect("store lock");
        inner
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CollabError::NotFound(id.to_string()))
    }

    async fn get_by_id(&self, id: &str) -> Result<Diagram, CollabError> {
        let inner = self.inner.lock().expect("store lock");
        inner
            .get(id)
            .cloned()
            .ok_or_else(|| CollabError::NotFound(id.to_string()))
    }
}
