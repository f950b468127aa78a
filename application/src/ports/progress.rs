//! Progress notification port
//!
//! Defines the interface for reporting progress during a generation run.

use std::fmt;

/// Stages of a generation run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    /// Loading and validating the specification
    Validate,
    /// Rendering one module per tool
    RenderTools,
    /// Rendering the entrypoint, readme and supporting files
    RenderProject,
}

impl GenerationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStage::Validate => "Validating specification",
            GenerationStage::RenderTools => "Generating tools",
            GenerationStage::RenderProject => "Generating project files",
        }
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback for progress updates during generation
///
/// Implementations live in the presentation layer.
pub trait GenerationProgress: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: GenerationStage, total: usize);

    /// Called after each artifact is rendered
    fn on_artifact_rendered(&self, _stage: GenerationStage, _relative_path: &str) {}

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: GenerationStage);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl GenerationProgress for NoProgress {
    fn on_stage_start(&self, _stage: GenerationStage, _total: usize) {}
    fn on_stage_complete(&self, _stage: GenerationStage) {}
}
