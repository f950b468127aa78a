//! Template renderer port
//!
//! Defines the interface for turning a named template plus a variable
//! context into text.

use agentgen_domain::TemplateName;
use thiserror::Error;

/// Errors that can occur while rendering a template
///
/// Validation has already passed when these occur, so they point at a
/// template-authoring defect rather than bad user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateRenderError {
    #[error("template `{template}` references undefined variable `{variable}`")]
    MissingVariable { template: String, variable: String },

    #[error("template `{0}` not found")]
    TemplateNotFound(String),

    #[error("template `{template}` has a syntax error: {message}")]
    Syntax { template: String, message: String },

    #[error("template `{template}` failed to render: {message}")]
    Failed { template: String, message: String },
}

impl TemplateRenderError {
    /// Logical name of the template concerned
    pub fn template(&self) -> &str {
        match self {
            TemplateRenderError::MissingVariable { template, .. }
            | TemplateRenderError::Syntax { template, .. }
            | TemplateRenderError::Failed { template, .. } => template,
            TemplateRenderError::TemplateNotFound(template) => template,
        }
    }
}

/// Renders named templates
///
/// Implementations resolve templates once at construction time and perform
/// no file writes. Rendering the same template with the same variables must
/// give byte-identical output.
pub trait TemplateRenderer: Send + Sync {
    fn render(
        &self,
        template: TemplateName,
        variables: &serde_json::Value,
    ) -> Result<String, TemplateRenderError>;
}

impl<T: TemplateRenderer + ?Sized> TemplateRenderer for &T {
    fn render(
        &self,
        template: TemplateName,
        variables: &serde_json::Value,
    ) -> Result<String, TemplateRenderError> {
        (**self).render(template, variables)
    }
}
