//! CI workflow rendering
//!
//! [`TeraWorkflowRenderer`] implements the [`WorkflowRenderer`] port with a
//! tera template compiled once at construction. Every rendered document is
//! parsed back with `serde_yaml` before it is returned, so a caller never
//! receives text that is not a YAML mapping with `on` and `jobs`.
//!
//! [`WorkflowRenderer`]: devops_application::ports::workflow_renderer::WorkflowRenderer

mod renderer;

pub use renderer::TeraWorkflowRenderer;
