use devops_application::ports::workflow_renderer::{RenderError, WorkflowRenderer};
use devops_domain::WorkflowSpec;
use std::error::Error as _;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "github_workflow.yml";
const TEMPLATE: &str = include_str!("../../templates/github_workflow.yml.tera");

/// GitHub Actions workflow renderer backed by tera
pub struct TeraWorkflowRenderer {
    tera: Tera,
}

impl TeraWorkflowRenderer {
    pub fn new() -> Result<Self, RenderError> {
        Self::with_template(TEMPLATE)
    }

    /// Renderer with a caller-supplied template (same context variables)
    pub fn with_template(template: &str) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, template)
            .map_err(|e| RenderError::Template(describe(&e)))?;
        Ok(Self { tera })
    }
}

impl WorkflowRenderer for TeraWorkflowRenderer {
    fn render(&self, spec: &WorkflowSpec) -> Result<String, RenderError> {
        let mut context =
            Context::from_serialize(spec).map_err(|e| RenderError::Template(describe(&e)))?;
        if let Some(image) = &spec.image {
            context.insert("image_tag", &format!("{}:${{{{ github.sha }}}}", image));
        }
        let rendered = self
            .tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| RenderError::Template(describe(&e)))?;

        check_document(&rendered)?;
        Ok(ensure_trailing_newline(rendered))
    }
}

/// The document must be a YAML mapping with `on` and `jobs`.
fn check_document(text: &str) -> Result<(), RenderError> {
    let doc: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| RenderError::InvalidDocument(e.to_string()))?;
    let mapping = doc
        .as_mapping()
        .ok_or_else(|| RenderError::InvalidDocument("top level is not a mapping".to_string()))?;
    for key in ["on", "jobs"] {
        if !mapping.contains_key(key) {
            return Err(RenderError::InvalidDocument(format!("missing '{}' section", key)));
        }
    }
    Ok(())
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// tera keeps the useful part of an error in its source chain
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
