//! Rendered artifacts

use crate::spec::ValidationReport;
use serde::Serialize;

/// One generated file: path relative to the project root, and its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedArtifact {
    pub relative_path: String,
    pub content: String,
}

impl RenderedArtifact {
    pub fn new(relative_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }
}

/// Outcome of one generation run.
///
/// The report is always present; artifacts are empty when it has errors.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub artifacts: Vec<RenderedArtifact>,
    pub report: ValidationReport,
}

impl GenerationResult {
    /// A run stopped by validation errors.
    pub fn rejected(report: ValidationReport) -> Self {
        Self {
            artifacts: Vec::new(),
            report,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.report.has_errors()
    }

    pub fn artifact(&self, relative_path: &str) -> Option<&RenderedArtifact> {
        self.artifacts
            .iter()
            .find(|a| a.relative_path == relative_path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.artifacts.iter().map(|a| a.relative_path.as_str())
    }
}
