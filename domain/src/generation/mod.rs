//! Generation value objects
//!
//! Options that parameterize rendering, the logical template names, and the
//! in-memory artifacts a run produces. Writing artifacts to disk is left to
//! the caller.

pub mod artifact;
pub mod options;
pub mod plan;
pub mod template;

pub use artifact::{GenerationResult, RenderedArtifact};
pub use options::{ArtifactLayout, DEFAULT_AGENT_NAME, DEFAULT_MODEL, GenerationOptions, TemplateSource};
pub use plan::{FileStatus, PlannedFile, WritePlan};
pub use template::TemplateName;
