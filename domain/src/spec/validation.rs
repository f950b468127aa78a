//! Specification validation
//!
//! [`SpecValidator`] checks a whole batch of raw signatures and collects every
//! problem into one [`ValidationReport`] instead of stopping at the first.
//! A user fixing a ten-tool file sees all ten problems in one run.
//!
//! # Passes
//!
//! 1. **Per-tool**: parse each signature. Failures become
//!    [`IssueCode::InvalidSignature`] or [`IssueCode::UnknownType`] errors.
//! 2. **Cross-tool** (parsed subset only):
//!
//! | Check | Severity | Effect |
//! |-------|----------|--------|
//! | Duplicate name (case-insensitive) | Error | later occurrence dropped |
//! | Reserved tool / parameter name | Error | tool dropped |
//! | Module name is a Python keyword (`Import` → `import`) | Error | tool dropped |
//! | Name not PascalCase | Warning | kept |
//! | Required parameter after a defaulted one | Warning | kept, reordered |
//!
//! An empty batch is an error. Generation may proceed only when
//! [`ValidationReport::has_errors`] is false.

use super::document::RawSignature;
use super::entities::{Provenance, ToolSpec, is_pascal_case};
use super::parser::{ParseError, parse_signature};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Tool names taken by the generated project's framework imports.
pub const RESERVED_TOOL_NAMES: &[&str] = &["Agent", "Tool", "AgentEndTask"];

/// Python keywords. None of them can name a parameter or a tool module.
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Non-keyword parameter names taken by the generated `execute` method.
pub const RESERVED_PARAMETER_NAMES: &[&str] = &["self"];

/// Severity level of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks generation.
    Error,
    /// Reported, but generation proceeds.
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the kind of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// The signature does not match the grammar, or its default does not
    /// match its declared type.
    InvalidSignature,
    /// A parameter uses a type outside the registry.
    UnknownType,
    /// Two tools share a name (compared case-insensitively).
    DuplicateToolName,
    /// A tool or parameter name collides with a framework identifier.
    ReservedName,
    /// A required parameter follows a defaulted one.
    ParameterOrder,
    /// The tool name is not PascalCase.
    NonPascalCaseName,
    /// The document contains no signatures.
    EmptySpecification,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::InvalidSignature => "invalid-signature",
            IssueCode::UnknownType => "unknown-type",
            IssueCode::DuplicateToolName => "duplicate-tool-name",
            IssueCode::ReservedName => "reserved-name",
            IssueCode::ParameterOrder => "parameter-order",
            IssueCode::NonPascalCaseName => "non-pascal-case-name",
            IssueCode::EmptySpecification => "empty-specification",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One problem found during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    /// Where the offending signature came from (absent for document-wide issues)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Provenance>,
    /// Name of the tool concerned, when the signature parsed far enough
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
}

impl ValidationIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.severity, self.code)?;
        if let Some(location) = &self.location {
            write!(f, " {}", location)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Accumulated outcome of validating one batch.
///
/// Built by [`SpecValidator::validate`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
    tools: Vec<ToolSpec>,
    inputs: usize,
}

impl ValidationReport {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Tools that passed, normalized to required-then-defaulted order.
    pub fn tools(&self) -> &[ToolSpec] {
        &self.tools
    }

    /// Number of raw signatures the report covers.
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(ValidationIssue::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn issues_with_code(&self, code: IssueCode) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.code == code)
    }

    fn push(
        &mut self,
        severity: Severity,
        code: IssueCode,
        message: String,
        location: Option<&Provenance>,
        tool: Option<&str>,
    ) {
        self.issues.push(ValidationIssue {
            severity,
            code,
            message,
            location: location.cloned(),
            tool: tool.map(str::to_string),
        });
    }
}

/// Two-pass validator over a batch of raw signatures.
#[derive(Debug, Clone)]
pub struct SpecValidator {
    reserved_tool_names: Vec<String>,
    reserved_parameter_names: Vec<String>,
}

impl Default for SpecValidator {
    fn default() -> Self {
        Self {
            reserved_tool_names: RESERVED_TOOL_NAMES.iter().map(|s| s.to_string()).collect(),
            reserved_parameter_names: RESERVED_PARAMETER_NAMES
                .iter()
                .chain(PYTHON_KEYWORDS)
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SpecValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool name to the reserved set (builder pattern)
    pub fn with_reserved_tool_name(mut self, name: impl Into<String>) -> Self {
        self.reserved_tool_names.push(name.into());
        self
    }

    fn is_reserved_tool_name(&self, name: &str) -> bool {
        self.reserved_tool_names
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(name))
    }

    fn is_reserved_parameter_name(&self, name: &str) -> bool {
        self.reserved_parameter_names.iter().any(|reserved| reserved == name)
    }

    /// Validate a batch. Never fails: every problem lands in the report.
    pub fn validate(&self, signatures: &[RawSignature]) -> ValidationReport {
        let mut report = ValidationReport {
            inputs: signatures.len(),
            ..Default::default()
        };

        if signatures.is_empty() {
            report.push(
                Severity::Error,
                IssueCode::EmptySpecification,
                "no tools specified".to_string(),
                None,
                None,
            );
            return report;
        }

        let parsed = self.parse_pass(signatures, &mut report);
        self.cross_tool_pass(parsed, &mut report);
        report
    }

    fn parse_pass(&self, signatures: &[RawSignature], report: &mut ValidationReport) -> Vec<ToolSpec> {
        let mut parsed = Vec::with_capacity(signatures.len());
        for raw in signatures {
            match parse_signature(&raw.text, raw.provenance.clone()) {
                Ok(spec) => parsed.push(spec),
                Err(err) => {
                    let code = match err {
                        ParseError::UnknownType { .. } => IssueCode::UnknownType,
                        ParseError::InvalidSignature { .. } => IssueCode::InvalidSignature,
                    };
                    report.push(Severity::Error, code, err.to_string(), Some(&raw.provenance), None);
                }
            }
        }
        parsed
    }

    fn cross_tool_pass(&self, parsed: Vec<ToolSpec>, report: &mut ValidationReport) {
        let mut first_seen: HashMap<String, Provenance> = HashMap::new();

        for spec in parsed {
            let name = spec.name();
            let location = spec.provenance();
            let mut rejected = false;

            match first_seen.get(&name.to_lowercase()) {
                Some(first) => {
                    report.push(
                        Severity::Error,
                        IssueCode::DuplicateToolName,
                        format!("duplicate tool name `{}` (first defined at {})", name, first),
                        Some(location),
                        Some(name),
                    );
                    rejected = true;
                }
                None => {
                    first_seen.insert(name.to_lowercase(), location.clone());
                }
            }

            if self.is_reserved_tool_name(name) {
                report.push(
                    Severity::Error,
                    IssueCode::ReservedName,
                    format!("tool name `{}` is reserved by the agent framework", name),
                    Some(location),
                    Some(name),
                );
                rejected = true;
            }

            let module = spec.module_name();
            if PYTHON_KEYWORDS.contains(&module.as_str()) {
                report.push(
                    Severity::Error,
                    IssueCode::ReservedName,
                    format!(
                        "tool name `{}` would generate module `{}`, which is a Python keyword",
                        name, module
                    ),
                    Some(location),
                    Some(name),
                );
                rejected = true;
            }

            for param in spec.parameters() {
                if self.is_reserved_parameter_name(param.name()) {
                    report.push(
                        Severity::Error,
                        IssueCode::ReservedName,
                        format!(
                            "parameter name `{}` in `{}` is a reserved identifier",
                            param.name(),
                            name
                        ),
                        Some(location),
                        Some(name),
                    );
                    rejected = true;
                }
            }

            if !is_pascal_case(name) {
                report.push(
                    Severity::Warning,
                    IssueCode::NonPascalCaseName,
                    format!("tool name `{}` is not PascalCase", name),
                    Some(location),
                    Some(name),
                );
            }

            let spec = if spec.is_calling_convention_ordered() {
                spec
            } else {
                let normalized = spec.normalized();
                report.push(
                    Severity::Warning,
                    IssueCode::ParameterOrder,
                    format!(
                        "required parameters follow defaulted ones in `{}`; reordered to `{}`",
                        spec, normalized
                    ),
                    Some(location),
                    Some(name),
                );
                normalized
            };

            if !rejected {
                report.tools.push(spec);
            }
        }
    }
}
