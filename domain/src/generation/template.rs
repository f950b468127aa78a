//! Logical template names

use serde::{Deserialize, Serialize};
use std::fmt;

/// The named templates rendered for every project.
///
/// `Tool` is instantiated once per tool; the others once per project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateName {
    Tool,
    Agent,
    Readme,
    ToolsInit,
    EnvExample,
    SystemPrompt,
}

impl TemplateName {
    pub const ALL: [TemplateName; 6] = [
        TemplateName::Tool,
        TemplateName::Agent,
        TemplateName::Readme,
        TemplateName::ToolsInit,
        TemplateName::EnvExample,
        TemplateName::SystemPrompt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateName::Tool => "tool",
            TemplateName::Agent => "agent",
            TemplateName::Readme => "readme",
            TemplateName::ToolsInit => "tools_init",
            TemplateName::EnvExample => "env_example",
            TemplateName::SystemPrompt => "system_prompt",
        }
    }

    /// File name looked up in template directories.
    pub fn file_name(&self) -> String {
        format!("{}.tera", self.as_str())
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(TemplateName::Tool.file_name(), "tool.tera");
        assert_eq!(TemplateName::ToolsInit.file_name(), "tools_init.tera");
    }
}
