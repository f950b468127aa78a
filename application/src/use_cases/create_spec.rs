//! Create Spec use case
//!
//! Builds a new specification document from signatures typed on the command
//! line. Every signature is validated first so a bad one never reaches disk.

use agentgen_domain::{
    DocumentSyntax, Provenance, RawSignature, SpecValidator, ValidationReport,
};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while creating a specification
#[derive(Error, Debug)]
pub enum CreateSpecError {
    #[error("{} of {} signature(s) rejected", .0.error_count(), .0.inputs())]
    Rejected(ValidationReport),
}

impl CreateSpecError {
    pub fn report(&self) -> &ValidationReport {
        match self {
            CreateSpecError::Rejected(report) => report,
        }
    }
}

/// Input for the CreateSpec use case
#[derive(Debug, Clone)]
pub struct CreateSpecInput {
    pub signatures: Vec<String>,
    pub syntax: DocumentSyntax,
}

impl CreateSpecInput {
    pub fn new(signatures: Vec<String>, syntax: DocumentSyntax) -> Self {
        Self { signatures, syntax }
    }
}

/// A freshly rendered specification document
#[derive(Debug, Clone)]
pub struct CreatedSpec {
    pub content: String,
    /// Report over the given signatures (warnings only)
    pub report: ValidationReport,
}

/// Use case for writing a new specification document
#[derive(Debug, Clone, Default)]
pub struct CreateSpecUseCase {
    validator: SpecValidator,
}

impl CreateSpecUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the signatures and render them in canonical form.
    pub fn execute(&self, input: CreateSpecInput) -> Result<CreatedSpec, CreateSpecError> {
        let raw: Vec<_> = input
            .signatures
            .iter()
            .enumerate()
            .map(|(i, text)| RawSignature::new(text.clone(), Provenance::inline(i + 1)))
            .collect();

        let report = self.validator.validate(&raw);
        if report.has_errors() {
            return Err(CreateSpecError::Rejected(report));
        }

        let canonical: Vec<_> = report.tools().iter().map(|t| t.to_string()).collect();
        debug!("Rendering {} signature(s) as {:?}", canonical.len(), input.syntax);

        Ok(CreatedSpec {
            content: input.syntax.render(&canonical),
            report,
        })
    }
}
