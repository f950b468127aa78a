//! Domain error types

use thiserror::Error;

/// Domain-level errors raised when project-wide options are unusable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid agent name: `{0}` must be an identifier")]
    InvalidAgentName(String),

    #[error("Invalid model identifier: {0}")]
    InvalidModel(String),

    #[error("Invalid file extension: `{0}`")]
    InvalidExtension(String),
}

impl DomainError {
    /// Name of the option the error refers to
    pub fn option_name(&self) -> &'static str {
        match self {
            DomainError::InvalidAgentName(_) => "agent_name",
            DomainError::InvalidModel(_) => "model",
            DomainError::InvalidExtension(_) => "extension",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_agent_name_display() {
        let error = DomainError::InvalidAgentName("my agent".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid agent name: `my agent` must be an identifier"
        );
    }

    #[test]
    fn test_option_name() {
        assert_eq!(DomainError::InvalidModel(String::new()).option_name(), "model");
        assert_eq!(
            DomainError::InvalidExtension("p y".to_string()).option_name(),
            "extension"
        );
    }
}
