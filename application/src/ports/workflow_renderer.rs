//! Workflow renderer port.
//!
//! Turns a [`WorkflowSpec`] into a CI workflow document. Rendering is pure
//! (no files written, no processes started).

use devops_domain::WorkflowSpec;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(String),

    /// The rendered text is not a well-formed document
    #[error("rendered workflow is not valid YAML: {0}")]
    InvalidDocument(String),
}

pub trait WorkflowRenderer: Send + Sync {
    fn render(&self, spec: &WorkflowSpec) -> Result<String, RenderError>;
}
