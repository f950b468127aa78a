//! Port definitions (interfaces for external dependencies)

pub mod progress;
pub mod template_renderer;
