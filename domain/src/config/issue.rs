//! Configuration file issues
//!
//! Problems found in a loaded configuration. Errors stop the CLI before any
//! work is done; warnings are printed and ignored.

use crate::spec::Severity;

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A field that must be non-empty is empty.
    EmptyValue { field: String },
    /// The agent name is not an identifier.
    InvalidAgentName { value: String },
    /// A file extension contains characters other than letters and digits.
    InvalidExtension { field: String, value: String },
    /// A configured path does not exist.
    MissingPath { field: String, path: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}
