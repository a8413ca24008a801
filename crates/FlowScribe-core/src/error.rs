use thiserror::Error;

/// Failures while parsing Mermaid flowchart text.
///
/// All of these are recoverable: the host shows the message next to the
/// text editor and the previously applied graph stays untouched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("flowchart must start with a direction declaration, e.g. `graph TD`")]
    MissingDirection,
    #[error("flowchart defines no nodes")]
    NoNodes,
    #[error("edge references undefined node `{id}`")]
    UnknownNodeReference { id: String },
    #[error("unrecognized statement on line {line}: `{text}`")]
    Syntax { line: usize, text: String },
}

/// Umbrella error for the text-to-canvas pipeline.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("unknown sample flow `{id}`")]
    UnknownSample { id: String },
}
