//! # ScribeCanvas
//!
//! `scribe_canvas` is the headless state layer of the FlowScribe editor:
//! the visual graph model (typed process nodes, groups, edges), the flow
//! store with bounded undo/redo history, and the alignment utilities.
//!
//! Rendering, hit testing, and drag mechanics belong to the host canvas
//! widget; this crate only owns the data that widget is fed and the data it
//! reports back.
//!
//! ## Architecture
//! - **Model (`src/model.rs`)**: node/edge records with string ids that
//!   survive a Mermaid round trip.
//! - **Store (`src/store.rs`)**: the single source of truth, mutate-with-
//!   history semantics.
//! - **History (`src/history.rs`)**: bounded full-state snapshots with a
//!   cursor.
//! - **Align (`src/align.rs`)**: alignment/distribution over a selection.

pub mod align;
pub mod history;
pub mod model;
pub mod store;

pub use align::{AlignMode, DistributeAxis, align, distribute};
pub use history::{DEFAULT_HISTORY_CAP, History, Snapshot};
pub use model::{
    HandleSide, NODE_HEIGHT, NODE_WIDTH, NodeFlags, NodePayload, NodeType, ProcessData, ToolRef,
    VisualEdge, VisualNode, VisualShape,
};
pub use store::{FlowStore, StoreError};
