//! Template variable contexts
//!
//! Views are plain serializable snapshots of the domain model, shaped for
//! templates: Python annotations and default literals are already rendered
//! to text, and every collection is an ordered list so that contexts
//! serialize identically on every run.

use agentgen_domain::{ArtifactLayout, GenerationOptions, ParameterSpec, ToolSpec};
use serde::Serialize;

/// One parameter as templates see it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterView {
    pub name: String,
    /// Python annotation (`str`, `int`, `Any`, ...)
    pub annotation: String,
    pub required: bool,
    /// Python literal of the default, empty when required
    pub default: String,
    pub description: String,
}

impl ParameterView {
    pub fn from_spec(param: &ParameterSpec) -> Self {
        Self {
            name: param.name().to_string(),
            annotation: param.type_token().as_str().to_string(),
            required: param.is_required(),
            default: param.default().map(|d| d.to_string()).unwrap_or_default(),
            description: format!("The {} parameter", param.name()),
        }
    }
}

/// One tool as templates see it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolView {
    pub name: String,
    pub class_name: String,
    /// Module name, also the registered tool name
    pub module_name: String,
    /// `read blog post`
    pub description: String,
    /// `Read blog post.`
    pub summary: String,
    /// Canonical signature string
    pub signature: String,
    pub path: String,
    pub needs_any: bool,
    pub parameters: Vec<ParameterView>,
}

impl ToolView {
    pub fn from_spec(tool: &ToolSpec, layout: &ArtifactLayout) -> Self {
        let description = tool.generated_description();
        Self {
            name: tool.name().to_string(),
            class_name: tool.class_name(),
            module_name: tool.module_name(),
            summary: sentence(&description),
            description,
            signature: tool.to_string(),
            path: layout.tool_path(tool),
            needs_any: tool
                .parameters()
                .iter()
                .any(|p| p.type_token().needs_typing_import()),
            parameters: tool.parameters().iter().map(ParameterView::from_spec).collect(),
        }
    }
}

/// Project-wide variables shared by every template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectView {
    pub agent_name: String,
    pub model: String,
    pub system_prompt: String,
    pub system_prompt_file: String,
    pub entrypoint: String,
    pub readme: String,
    pub needs_any: bool,
    pub tools: Vec<ToolView>,
}

impl ProjectView {
    pub fn new(tools: &[ToolSpec], options: &GenerationOptions) -> Self {
        let tools: Vec<_> = tools
            .iter()
            .map(|t| ToolView::from_spec(t, &options.layout))
            .collect();
        Self {
            agent_name: options.agent_name.clone(),
            model: options.model.clone(),
            system_prompt: options.effective_system_prompt(),
            system_prompt_file: ArtifactLayout::SYSTEM_PROMPT.to_string(),
            entrypoint: options.layout.entrypoint_path(),
            readme: options.layout.readme_path(),
            needs_any: tools.iter().any(|t| t.needs_any),
            tools,
        }
    }
}

/// Context for the per-tool template: project variables plus `tool`.
#[derive(Debug, Serialize)]
pub struct ToolContext<'a> {
    #[serde(flatten)]
    pub project: &'a ProjectView,
    pub tool: &'a ToolView,
}

fn sentence(words: &str) -> String {
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}
