//! Generation options value objects

use crate::core::error::DomainError;
use crate::spec::ToolSpec;
use crate::spec::entities::is_identifier;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_AGENT_NAME: &str = "MyAgent";
pub const DEFAULT_MODEL: &str = "anthropic/claude-3-5-sonnet-20241022";

/// Where templates come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSource {
    /// Templates compiled into the binary
    #[default]
    Bundled,
    /// A user directory whose templates override the bundled ones by name
    Directory(PathBuf),
}

/// File extensions of the generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactLayout {
    /// Extension of code files (tool modules, entrypoint)
    pub code_extension: String,
    /// Extension of the readme
    pub readme_extension: String,
}

impl Default for ArtifactLayout {
    fn default() -> Self {
        Self {
            code_extension: "py".to_string(),
            readme_extension: "md".to_string(),
        }
    }
}

impl ArtifactLayout {
    pub const TOOLS_DIR: &'static str = "tools";
    pub const ENV_EXAMPLE: &'static str = ".env.example";
    pub const SYSTEM_PROMPT: &'static str = "system_prompt.txt";

    pub fn tool_path(&self, tool: &ToolSpec) -> String {
        format!(
            "{}/{}.{}",
            Self::TOOLS_DIR,
            tool.module_name(),
            self.code_extension
        )
    }

    pub fn tools_package_path(&self) -> String {
        format!("{}/__init__.{}", Self::TOOLS_DIR, self.code_extension)
    }

    pub fn entrypoint_path(&self) -> String {
        format!("agent.{}", self.code_extension)
    }

    pub fn readme_path(&self) -> String {
        format!("README.{}", self.readme_extension)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for ext in [&self.code_extension, &self.readme_extension] {
            if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(DomainError::InvalidExtension(ext.clone()));
            }
        }
        Ok(())
    }
}

/// Project-wide choices that parameterize rendering.
///
/// They never affect parsing or validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub agent_name: String,
    pub model: String,
    /// Contents of the generated `system_prompt.txt`; a default is used when absent
    pub system_prompt: Option<String>,
    pub template_source: TemplateSource,
    pub layout: ArtifactLayout,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            template_source: TemplateSource::Bundled,
            layout: ArtifactLayout::default(),
        }
    }
}

impl GenerationOptions {
    pub fn new(agent_name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_source = TemplateSource::Directory(dir.into());
        self
    }

    pub fn with_layout(mut self, layout: ArtifactLayout) -> Self {
        self.layout = layout;
        self
    }

    /// System prompt text, falling back to a generic one naming the agent.
    pub fn effective_system_prompt(&self) -> String {
        match &self.system_prompt {
            Some(prompt) => prompt.clone(),
            None => format!("You are {}, a helpful AI assistant.\n", self.agent_name),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !is_identifier(&self.agent_name) {
            return Err(DomainError::InvalidAgentName(self.agent_name.clone()));
        }
        if self.model.is_empty()
            || self
                .model
                .chars()
                .any(|c| c.is_whitespace() || c == '"' || c == '\\')
        {
            return Err(DomainError::InvalidModel(self.model.clone()));
        }
        self.layout.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Provenance, ToolSpec};

    #[test]
    fn test_default_paths() {
        let layout = ArtifactLayout::default();
        let tool = ToolSpec::new("SearchLinkedIn", vec![], Provenance::inline(1));
        assert_eq!(layout.tool_path(&tool), "tools/searchlinkedin.py");
        assert_eq!(layout.tools_package_path(), "tools/__init__.py");
        assert_eq!(layout.entrypoint_path(), "agent.py");
        assert_eq!(layout.readme_path(), "README.md");
    }

    #[test]
    fn test_default_options_are_valid() {
        assert!(GenerationOptions::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_options() {
        let options = GenerationOptions::new("my agent", DEFAULT_MODEL);
        assert_eq!(
            options.validate(),
            Err(DomainError::InvalidAgentName("my agent".to_string()))
        );

        let options = GenerationOptions::new("Bot", " ");
        assert!(matches!(options.validate(), Err(DomainError::InvalidModel(_))));

        let options = GenerationOptions::default().with_layout(ArtifactLayout {
            code_extension: ".py".to_string(),
            readme_extension: "md".to_string(),
        });
        assert!(matches!(options.validate(), Err(DomainError::InvalidExtension(_))));
    }

    #[test]
    fn test_template_dir_selects_directory_source() {
        let options = GenerationOptions::default();
        assert_eq!(options.template_source, TemplateSource::Bundled);
        let options = options.with_template_dir("my-templates");
        assert_eq!(
            options.template_source,
            TemplateSource::Directory(PathBuf::from("my-templates"))
        );
    }

    #[test]
    fn test_effective_system_prompt() {
        let options = GenerationOptions::new("NewsBot", DEFAULT_MODEL);
        assert_eq!(
            options.effective_system_prompt(),
            "You are NewsBot, a helpful AI assistant.\n"
        );
        let options = options.with_system_prompt("Summarize news.");
        assert_eq!(options.effective_system_prompt(), "Summarize news.");
    }
}
