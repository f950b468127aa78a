//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use agentgen_domain::spec::entities::is_identifier;
use agentgen_domain::{
    ArtifactLayout, ConfigIssue, ConfigIssueCode, DEFAULT_AGENT_NAME, DEFAULT_MODEL,
    GenerationOptions, OutputFormat, TemplateSource,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw generation configuration from TOML (`[generation]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub agent_name: String,
    pub model: String,
    /// File whose contents become the generated `system_prompt.txt`
    pub system_prompt_file: Option<PathBuf>,
    /// Directory whose templates override the bundled ones
    pub template_dir: Option<PathBuf>,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt_file: None,
            template_dir: None,
        }
    }
}

/// Raw output configuration from TOML (`[output]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub code_extension: String,
    pub readme_extension: String,
    /// Enable colored terminal output
    pub color: bool,
    /// Report format (uses domain type)
    pub format: OutputFormat,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        let layout = ArtifactLayout::default();
        Self {
            code_extension: layout.code_extension,
            readme_extension: layout.readme_extension,
            color: true,
            format: OutputFormat::default(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Generation defaults
    pub generation: FileGenerationConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let generation = &self.generation;

        if generation.agent_name.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "generation.agent_name".to_string(),
                },
                "generation.agent_name cannot be empty",
            ));
        } else if !is_identifier(&generation.agent_name) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidAgentName {
                    value: generation.agent_name.clone(),
                },
                format!(
                    "generation.agent_name: '{}' is not a valid identifier",
                    generation.agent_name
                ),
            ));
        }

        if generation.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "generation.model".to_string(),
                },
                "generation.model cannot be empty",
            ));
        }

        for (field, path) in [
            ("generation.system_prompt_file", &generation.system_prompt_file),
            ("generation.template_dir", &generation.template_dir),
        ] {
            let Some(path) = path else { continue };
            if !path.exists() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::MissingPath {
                        field: field.to_string(),
                        path: path.display().to_string(),
                    },
                    format!("{}: '{}' does not exist", field, path.display()),
                ));
            }
        }

        for (field, value) in [
            ("output.code_extension", &self.output.code_extension),
            ("output.readme_extension", &self.output.readme_extension),
        ] {
            if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidExtension {
                        field: field.to_string(),
                        value: value.clone(),
                    },
                    format!("{}: '{}' must be letters and digits only (no dot)", field, value),
                ));
            }
        }

        if self.output.code_extension != "py" && self.generation.template_dir.is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidExtension {
                    field: "output.code_extension".to_string(),
                    value: self.output.code_extension.clone(),
                },
                format!(
                    "output.code_extension is '{}' but the bundled templates generate Python",
                    self.output.code_extension
                ),
            ));
        }

        issues
    }

    pub fn layout(&self) -> ArtifactLayout {
        ArtifactLayout {
            code_extension: self.output.code_extension.clone(),
            readme_extension: self.output.readme_extension.clone(),
        }
    }

    pub fn template_source(&self) -> TemplateSource {
        match &self.generation.template_dir {
            Some(dir) => TemplateSource::Directory(dir.clone()),
            None => TemplateSource::Bundled,
        }
    }

    /// Generation options from file values; the system prompt file is read
    /// by the caller.
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            agent_name: self.generation.agent_name.clone(),
            model: self.generation.model.clone(),
            system_prompt: None,
            template_source: self.template_source(),
            layout: self.layout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentgen_domain::Severity;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[generation]
agent_name = "NewsBot"
model = "openai/gpt-4o"
template_dir = "templates"

[output]
readme_extension = "rst"
color = false
format = "json"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generation.agent_name, "NewsBot");
        assert_eq!(config.generation.model, "openai/gpt-4o");
        assert_eq!(config.generation.template_dir, Some(PathBuf::from("templates")));
        assert_eq!(config.output.code_extension, "py");
        assert_eq!(config.output.readme_extension, "rst");
        assert!(!config.output.color);
        assert_eq!(config.output.format, OutputFormat::Json);

        let options = config.generation_options();
        assert_eq!(options.layout.readme_path(), "README.rst");
        assert_eq!(
            options.template_source,
            TemplateSource::Directory(PathBuf::from("templates"))
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.generation_options(), GenerationOptions::default());
    }

    #[test]
    fn test_validate_collects_every_issue() {
        let config = FileConfig {
            generation: FileGenerationConfig {
                agent_name: "my agent".to_string(),
                model: String::new(),
                system_prompt_file: Some(PathBuf::from("/nonexistent/prompt.txt")),
                template_dir: None,
            },
            output: FileOutputConfig {
                code_extension: ".py".to_string(),
                ..Default::default()
            },
        };
        let issues = config.validate();
        let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
        assert_eq!(errors, 4);
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::MissingPath { field, .. } if field == "generation.system_prompt_file"
        )));
        // Non-Python extension without custom templates
        assert!(issues.iter().any(|i| i.severity == Severity::Warning));
    }
}
