//! Generate Project use case
//!
//! Sequences loading, validation and rendering into one pipeline:
//!
//! ```text
//! document ─▶ load ─▶ validate ─┬─ errors ─▶ result with report only
//!                               └─ ok ─────▶ render tools ─▶ render project ─▶ result
//! ```
//!
//! Artifacts are returned in memory; writing them is the caller's job.

pub mod context;

use crate::ports::progress::{GenerationProgress, GenerationStage, NoProgress};
use crate::ports::template_renderer::{TemplateRenderError, TemplateRenderer};
use crate::use_cases::validate_spec::ValidateSpecUseCase;
use agentgen_domain::{
    ArtifactLayout, DomainError, GenerationOptions, GenerationResult, RenderedArtifact,
    SpecificationDocument, SpecificationFormatError, TemplateName, ToolSpec,
};
use context::{ProjectView, ToolContext};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that stop a generation run
///
/// Validation problems are not errors here: they are returned in the
/// report of a [`GenerationResult`] with no artifacts.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Format(#[from] SpecificationFormatError),

    #[error("Invalid generation options: {0}")]
    InvalidOptions(#[from] DomainError),

    #[error(transparent)]
    Render(#[from] TemplateRenderError),

    #[error("Failed to build template context: {0}")]
    Context(#[from] serde_json::Error),
}

/// Input for the GenerateProject use case
///
/// `options.template_source` is not read here: build the renderer from it
/// (`TemplateResolver::from_source` in the infrastructure crate) before
/// creating the use case.
#[derive(Debug, Clone)]
pub struct GenerateProjectInput {
    pub document: SpecificationDocument,
    pub options: GenerationOptions,
}

impl GenerateProjectInput {
    pub fn new(document: SpecificationDocument, options: GenerationOptions) -> Self {
        Self { document, options }
    }
}

/// Use case for generating an agent project from a specification
pub struct GenerateProjectUseCase<R: TemplateRenderer> {
    renderer: R,
    validate: ValidateSpecUseCase,
}

impl<R: TemplateRenderer> GenerateProjectUseCase<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            validate: ValidateSpecUseCase::new(),
        }
    }

    pub fn with_validation(mut self, validate: ValidateSpecUseCase) -> Self {
        self.validate = validate;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub fn execute(&self, input: GenerateProjectInput) -> Result<GenerationResult, GenerateError> {
        self.execute_with_progress(input, &NoProgress)
    }

    /// Execute the use case with progress callbacks
    pub fn execute_with_progress(
        &self,
        input: GenerateProjectInput,
        progress: &dyn GenerationProgress,
    ) -> Result<GenerationResult, GenerateError> {
        let GenerateProjectInput { document, options } = input;
        options.validate()?;

        progress.on_stage_start(GenerationStage::Validate, 1);
        let report = self.validate.execute(&document)?;
        progress.on_stage_complete(GenerationStage::Validate);

        if report.has_errors() {
            info!("Generation aborted: {} error(s)", report.error_count());
            return Ok(GenerationResult::rejected(report));
        }

        info!(
            "Generating agent {} with {} tool(s)",
            options.agent_name,
            report.tools().len()
        );
        let artifacts = self.render(report.tools(), &options, progress)?;
        info!("Rendered {} artifact(s)", artifacts.len());

        Ok(GenerationResult { artifacts, report })
    }

    /// Render every artifact for an already validated tool list.
    ///
    /// Order: one module per tool, then the tools package, entrypoint,
    /// readme, `.env.example` and system prompt.
    pub fn render(
        &self,
        tools: &[ToolSpec],
        options: &GenerationOptions,
        progress: &dyn GenerationProgress,
    ) -> Result<Vec<RenderedArtifact>, GenerateError> {
        let project = ProjectView::new(tools, options);
        let mut artifacts = Vec::with_capacity(tools.len() + 5);

        progress.on_stage_start(GenerationStage::RenderTools, project.tools.len());
        for tool in &project.tools {
            let variables = serde_json::to_value(ToolContext {
                project: &project,
                tool,
            })?;
            let content = self.renderer.render(TemplateName::Tool, &variables)?;
            debug!("Rendered {} ({} bytes)", tool.path, content.len());
            progress.on_artifact_rendered(GenerationStage::RenderTools, &tool.path);
            artifacts.push(RenderedArtifact::new(tool.path.clone(), content));
        }
        progress.on_stage_complete(GenerationStage::RenderTools);

        let layout = &options.layout;
        let project_files = [
            (TemplateName::ToolsInit, layout.tools_package_path()),
            (TemplateName::Agent, layout.entrypoint_path()),
            (TemplateName::Readme, layout.readme_path()),
            (TemplateName::EnvExample, ArtifactLayout::ENV_EXAMPLE.to_string()),
            (TemplateName::SystemPrompt, ArtifactLayout::SYSTEM_PROMPT.to_string()),
        ];

        progress.on_stage_start(GenerationStage::RenderProject, project_files.len());
        let variables = serde_json::to_value(&project)?;
        for (template, path) in project_files {
            let content = self.renderer.render(template, &variables)?;
            debug!("Rendered {} ({} bytes)", path, content.len());
            progress.on_artifact_rendered(GenerationStage::RenderProject, &path);
            artifacts.push(RenderedArtifact::new(path, content));
        }
        progress.on_stage_complete(GenerationStage::RenderProject);

        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentgen_domain::{IssueCode, SpecValidator, SpecificationFormat};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Renders a one-line summary of the variables it was given.
    struct EchoRenderer;

    impl TemplateRenderer for EchoRenderer {
        fn render(
            &self,
            template: TemplateName,
            variables: &serde_json::Value,
        ) -> Result<String, TemplateRenderError> {
            let tool = variables["tool"]["class_name"].as_str().unwrap_or("-");
            let tools: Vec<_> = variables["tools"]
                .as_array()
                .map(|tools| {
                    tools
                        .iter()
                        .filter_map(|t| t["name"].as_str())
                        .collect()
                })
                .unwrap_or_default();
            Ok(format!(
                "{} agent={} tool={} tools={}",
                template,
                variables["agent_name"].as_str().unwrap_or("-"),
                tool,
                tools.join(",")
            ))
        }
    }

    struct FailingRenderer;

    impl TemplateRenderer for FailingRenderer {
        fn render(
            &self,
            template: TemplateName,
            _variables: &serde_json::Value,
        ) -> Result<String, TemplateRenderError> {
            Err(TemplateRenderError::MissingVariable {
                template: template.to_string(),
                variable: "nope".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl GenerationProgress for RecordingProgress {
        fn on_stage_start(&self, stage: GenerationStage, total: usize) {
            self.events.lock().unwrap().push(format!("start {:?} {}", stage, total));
        }

        fn on_artifact_rendered(&self, _stage: GenerationStage, relative_path: &str) {
            self.events.lock().unwrap().push(relative_path.to_string());
        }

        fn on_stage_complete(&self, stage: GenerationStage) {
            self.events.lock().unwrap().push(format!("done {:?}", stage));
        }
    }

    fn list_document(signatures: &[&str]) -> SpecificationDocument {
        let text = serde_json::to_string(signatures).unwrap();
        SpecificationDocument::new(SpecificationFormat::List, "tools.json", text)
    }

    fn generate(signatures: &[&str]) -> GenerationResult {
        GenerateProjectUseCase::new(EchoRenderer)
            .execute(GenerateProjectInput::new(
                list_document(signatures),
                GenerationOptions::default(),
            ))
            .unwrap()
    }

    // ==================== Scenarios ====================

    #[test]
    fn test_two_tools_produce_full_project() {
        let result = generate(&[
            "SearchLinkedIn(url: str)",
            "ReadBlogPost(url: str, read_latest_n_posts: int = 3)",
        ]);
        assert!(result.is_success());
        assert_eq!(
            result.paths().collect::<Vec<_>>(),
            vec![
                "tools/searchlinkedin.py",
                "tools/readblogpost.py",
                "tools/__init__.py",
                "agent.py",
                "README.md",
                ".env.example",
                "system_prompt.txt",
            ]
        );
        assert_eq!(
            result.artifact("tools/readblogpost.py").unwrap().content,
            "tool agent=MyAgent tool=ReadBlogPostTool tools=SearchLinkedIn,ReadBlogPost"
        );
        assert_eq!(
            result.artifact("agent.py").unwrap().content,
            "agent agent=MyAgent tool=- tools=SearchLinkedIn,ReadBlogPost"
        );
    }

    #[test]
    fn test_validation_errors_produce_no_artifacts() {
        let result = generate(&["BadTool"]);
        assert!(!result.is_success());
        assert!(result.artifacts.is_empty());
        assert_eq!(result.report.issues_with_code(IssueCode::InvalidSignature).count(), 1);
    }

    #[test]
    fn test_warnings_do_not_block_generation() {
        let result = generate(&["Fetch(limit: int = 10, url: str)"]);
        assert!(result.is_success());
        assert_eq!(result.report.warning_count(), 1);
        assert_eq!(result.artifacts.len(), 6);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let signatures = ["A(x: str)", "B(y: dict = {\"k\": [1, 2]})"];
        assert_eq!(generate(&signatures), generate(&signatures));
    }

    #[test]
    fn test_custom_validation_is_applied() {
        let validator = SpecValidator::new().with_reserved_tool_name("SendMessage");
        let result = GenerateProjectUseCase::new(EchoRenderer)
            .with_validation(ValidateSpecUseCase::with_validator(validator))
            .execute(GenerateProjectInput::new(
                list_document(&["SendMessage(text: str)"]),
                GenerationOptions::default(),
            ))
            .unwrap();
        assert!(!result.is_success());
        assert_eq!(result.report.issues_with_code(IssueCode::ReservedName).count(), 1);
        assert!(result.artifacts.is_empty());
    }

    // ==================== Errors ====================

    #[test]
    fn test_invalid_options_fail_before_loading() {
        let err = GenerateProjectUseCase::new(EchoRenderer)
            .execute(GenerateProjectInput::new(
                list_document(&["A(x: str)"]),
                GenerationOptions::new("not valid", "m"),
            ))
            .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidOptions(_)));
    }

    #[test]
    fn test_format_error_is_fatal() {
        let document =
            SpecificationDocument::new(SpecificationFormat::List, "tools.yml", "tools: []\n");
        let err = GenerateProjectUseCase::new(EchoRenderer)
            .execute(GenerateProjectInput::new(document, GenerationOptions::default()))
            .unwrap_err();
        assert!(matches!(err, GenerateError::Format(_)));
    }

    #[test]
    fn test_render_error_is_fatal() {
        let err = GenerateProjectUseCase::new(FailingRenderer)
            .execute(GenerateProjectInput::new(
                list_document(&["A(x: str)"]),
                GenerationOptions::default(),
            ))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "template `tool` references undefined variable `nope`"
        );
    }

    // ==================== Progress ====================

    #[test]
    fn test_progress_events() {
        let progress = RecordingProgress::default();
        GenerateProjectUseCase::new(EchoRenderer)
            .execute_with_progress(
                GenerateProjectInput::new(list_document(&["A(x: str)"]), GenerationOptions::default()),
                &progress,
            )
            .unwrap();
        let events = progress.events.into_inner().unwrap();
        assert_eq!(events[0], "start Validate 1");
        assert_eq!(events[2], "start RenderTools 1");
        assert_eq!(events[3], "tools/a.py");
        assert_eq!(events.last().unwrap(), "done RenderProject");
    }
}
