//! Application layer for agentgen
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    progress::{GenerationProgress, GenerationStage, NoProgress},
    template_renderer::{TemplateRenderError, TemplateRenderer},
};
pub use use_cases::create_spec::{CreateSpecError, CreateSpecInput, CreateSpecUseCase, CreatedSpec};
pub use use_cases::generate_project::{
    GenerateError, GenerateProjectInput, GenerateProjectUseCase,
    context::{ParameterView, ProjectView, ToolContext, ToolView},
};
pub use use_cases::validate_spec::ValidateSpecUseCase;
