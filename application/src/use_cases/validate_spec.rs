//! Validate Spec use case
//!
//! Loads a specification document and validates every signature in it,
//! without rendering anything.

use agentgen_domain::{
    IssueCode, SpecValidator, SpecificationDocument, SpecificationFormatError, ValidationReport,
};
use tracing::{debug, info, warn};

/// Use case for validating a specification document
#[derive(Debug, Clone, Default)]
pub struct ValidateSpecUseCase {
    validator: SpecValidator,
}

impl ValidateSpecUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validator(validator: SpecValidator) -> Self {
        Self { validator }
    }

    /// Load and validate a document.
    ///
    /// Only a malformed document fails; every per-signature problem ends up
    /// in the returned report.
    pub fn execute(
        &self,
        document: &SpecificationDocument,
    ) -> Result<ValidationReport, SpecificationFormatError> {
        let signatures = document.load()?;
        debug!(
            "Loaded {} signature(s) from {} ({} format)",
            signatures.len(),
            document.source(),
            document.format()
        );
        for raw in &signatures {
            debug!("{}: {}", raw.provenance, raw.text);
        }

        let report = self.validator.validate(&signatures);

        for issue in report.warnings() {
            warn!("{}", issue);
        }
        if report.has_errors() {
            info!(
                "Validation of {} failed: {} error(s), {} warning(s)",
                document.source(),
                report.error_count(),
                report.warning_count()
            );
        } else {
            info!(
                "Validated {} tool(s) from {}",
                report.tools().len(),
                document.source()
            );
        }
        if report.issues_with_code(IssueCode::EmptySpecification).next().is_some() {
            debug!("{} contains no signatures", document.source());
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentgen_domain::SpecificationFormat;

    #[test]
    fn test_validates_object_document() {
        let document = SpecificationDocument::new(
            SpecificationFormat::Object,
            "tools.yml",
            "tools:\n  - \"SearchLinkedIn(url: str)\"\n  - \"BadTool\"\n",
        );
        let report = ValidateSpecUseCase::new().execute(&document).unwrap();
        assert_eq!(report.inputs(), 2);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.tools().len(), 1);
    }

    #[test]
    fn test_format_error_is_fatal() {
        let document = SpecificationDocument::new(
            SpecificationFormat::Object,
            "tools.yml",
            "agents:\n  - \"A(x: str)\"\n",
        );
        let err = ValidateSpecUseCase::new().execute(&document).unwrap_err();
        assert!(matches!(err, SpecificationFormatError::MissingToolsKey { .. }));
    }

    #[test]
    fn test_custom_validator() {
        let use_case = ValidateSpecUseCase::with_validator(
            SpecValidator::new().with_reserved_tool_name("Deploy"),
        );
        let document =
            SpecificationDocument::new(SpecificationFormat::SourceCall, "tools.py", "Deploy()\n");
        let report = use_case.execute(&document).unwrap();
        assert_eq!(report.issues_with_code(IssueCode::ReservedName).count(), 1);
    }
}
