//! # FlowScribe Core
//!
//! The text engine of the FlowScribe editor: flowchart parsing, semantic
//! type inference, conversion into the visual model, layered layout,
//! serialization back to text, and the pipeline that keeps a
//! [`scribe_canvas::FlowStore`] in sync with flowchart source.
//!
//! Data flows text -> parse -> infer -> convert -> layout -> store, and
//! back out store -> serialize -> text. Collaborator seams (cloud
//! persistence, generation, sharing) are traits in [`collab`]; the engine
//! never talks to a network itself.

pub mod collab;
pub mod convert;
pub mod error;
pub mod infer;
pub mod layout;
pub mod parse;
pub mod samples;
pub mod serialize;
pub mod sync;
pub mod tools;

pub use convert::{ConvertOptions, convert};
pub use error::{FlowError, ParseError};
pub use infer::infer_node_type;
pub use layout::{LayoutConfig, layout};
pub use parse::{Direction, NodeShape, ParsedEdge, ParsedFlow, ParsedNode, ParsedSubgraph, parse};
pub use serialize::serialize;
pub use sync::{apply_generated, apply_text, to_text};
pub use tools::{TOOL_DIRECTORY, ToolEntry, match_tool};
