//! Console output formatter for reports, plans and examples

use crate::output::examples::EXAMPLES;
use agentgen_domain::{
    FileStatus, GenerationResult, Severity, ToolSpec, ValidationIssue, ValidationReport, WritePlan,
    ConfigIssue,
};
use colored::Colorize;
use std::path::Path;

/// Formats generation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colors on or off for everything formatted afterwards
    pub fn set_color_enabled(enabled: bool) {
        if enabled {
            colored::control::unset_override();
        } else {
            colored::control::set_override(false);
        }
    }

    /// Format a validation report: issues first, then the valid tools.
    pub fn format_report(report: &ValidationReport, source: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} {}\n", "Specification:".cyan().bold(), source));

        if !report.issues().is_empty() {
            output.push_str(&Self::section_header("Issues"));
            for issue in report.issues() {
                output.push_str(&format!("  {}\n", Self::issue_line(issue)));
            }
        }

        if !report.tools().is_empty() {
            output.push_str(&Self::section_header(&format!(
                "Tools ({})",
                report.tools().len()
            )));
            for tool in report.tools() {
                output.push_str(&format!("  • {}\n", Self::tool_line(tool)));
            }
        }

        output.push('\n');
        output.push_str(&Self::summary(report));
        output.push('\n');
        output
    }

    /// Format a validation report as JSON
    pub fn format_report_json(report: &ValidationReport, source: &str) -> String {
        let value = serde_json::json!({
            "source": source,
            "valid": !report.has_errors(),
            "inputs": report.inputs(),
            "tools": report.tools().iter().map(|t| t.to_string()).collect::<Vec<_>>(),
            "issues": report.issues(),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the generation plan: tools table and per-file status.
    pub fn format_plan(result: &GenerationResult, plan: &WritePlan) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Generation Plan"));
        output.push('\n');

        output.push_str(&Self::section_header("Tools to Generate"));
        let width = result
            .report
            .tools()
            .iter()
            .map(|t| t.name().len())
            .max()
            .unwrap_or(0);
        for tool in result.report.tools() {
            let params = tool
                .parameters()
                .iter()
                .map(|p| {
                    let optional = if p.is_required() { "" } else { "?" };
                    format!("{}: {}{}", p.name(), p.type_token(), optional)
                })
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!(
                "  {:<width$}  {}  {}\n",
                tool.name().cyan(),
                if params.is_empty() { "(none)".dimmed().to_string() } else { params.green().to_string() },
                tool.generated_description().yellow(),
                width = width
            ));
        }

        output.push_str(&Self::section_header(&format!(
            "Files ({})",
            plan.output_dir.display()
        )));
        for file in &plan.files {
            let status = match file.status {
                FileStatus::New => "new".green(),
                FileStatus::Changed => "changed".yellow(),
                FileStatus::Unchanged => "unchanged".dimmed(),
            };
            output.push_str(&format!(
                "  {:<10} {} ({} bytes)\n",
                status, file.relative_path, file.bytes
            ));
        }

        output.push_str(&format!(
            "\n{} new, {} changed, {} unchanged\n",
            plan.count(FileStatus::New),
            plan.count(FileStatus::Changed),
            plan.count(FileStatus::Unchanged)
        ));
        if plan.target_not_empty {
            output.push_str(&format!(
                "{}\n",
                "Output directory is not empty; writing requires --force".yellow()
            ));
        }
        output
    }

    /// Format the generation plan as JSON
    pub fn format_plan_json(result: &GenerationResult, plan: &WritePlan) -> String {
        let value = serde_json::json!({
            "valid": result.is_success(),
            "tools": result.report.tools().iter().map(|t| t.to_string()).collect::<Vec<_>>(),
            "issues": result.report.issues(),
            "plan": plan,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Success message with next steps
    pub fn format_success(output_dir: &Path, plan: &WritePlan, tool_count: usize) -> String {
        let mut output = format!(
            "\n{} {} tool(s), {} file(s) written\n\n",
            "✓ Generated".green().bold(),
            tool_count,
            plan.count(FileStatus::New) + plan.count(FileStatus::Changed)
        );
        output.push_str(&format!("{}\n", "Next steps:".bold()));
        let steps = [
            format!("cd {}", output_dir.display()),
            "pip install stanley-ai python-dotenv".to_string(),
            "cp .env.example .env".to_string(),
            "Edit .env with your API keys".to_string(),
            "Edit system_prompt.txt to customize behavior".to_string(),
            "python agent.py".to_string(),
        ];
        for (i, step) in steps.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, step));
        }
        output.push_str(&format!(
            "\n{}\n",
            "Tip: Use --dry-run to preview changes before generating".dimmed()
        ));
        output
    }

    /// Confirmation for `agentgen new`
    pub fn format_created(path: &Path, content: &str) -> String {
        let mut output = format!("{} {}\n", "✓ Created".green().bold(), path.display());
        output.push_str(&Self::section_header(&path.display().to_string()));
        output.push_str(&Self::numbered(content));
        output.push_str(&format!(
            "\n{} agentgen generate {}\n",
            "Next:".bold(),
            path.display()
        ));
        output
    }

    /// All example specifications
    pub fn format_examples() -> String {
        let mut output = String::new();
        for (title, content) in EXAMPLES {
            output.push_str(&Self::section_header(title));
            output.push_str(&Self::numbered(content));
        }
        output
    }

    /// Configuration issues, errors first
    pub fn format_config_issues(issues: &[ConfigIssue]) -> String {
        let mut sorted: Vec<_> = issues.iter().collect();
        sorted.sort_by_key(|i| i.severity != Severity::Error);
        sorted
            .iter()
            .map(|issue| {
                let label = match issue.severity {
                    Severity::Error => "config error:".red().bold(),
                    Severity::Warning => "config warning:".yellow().bold(),
                };
                format!("{} {}\n", label, issue.message)
            })
            .collect()
    }

    fn issue_line(issue: &ValidationIssue) -> String {
        let label = match issue.severity {
            Severity::Error => format!("error[{}]", issue.code).red().bold(),
            Severity::Warning => format!("warning[{}]", issue.code).yellow().bold(),
        };
        match &issue.location {
            Some(location) => format!("{} {}: {}", label, location.to_string().dimmed(), issue.message),
            None => format!("{} {}", label, issue.message),
        }
    }

    fn tool_line(tool: &ToolSpec) -> String {
        let params = tool
            .parameters()
            .iter()
            .map(|p| {
                let optional = if p.is_required() { "" } else { "?" };
                format!("{}: {}{}", p.name(), p.type_token(), optional)
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", tool.name(), params)
    }

    fn summary(report: &ValidationReport) -> String {
        if report.has_errors() {
            format!(
                "{} {} error(s), {} warning(s) in {} signature(s)",
                "✗ Invalid specification:".red().bold(),
                report.error_count(),
                report.warning_count(),
                report.inputs()
            )
        } else if report.warning_count() > 0 {
            format!(
                "{} {} tool(s), {} warning(s)",
                "✓ Valid specification:".green().bold(),
                report.tools().len(),
                report.warning_count()
            )
        } else {
            format!(
                "{} {} tool(s)",
                "✓ Valid specification:".green().bold(),
                report.tools().len()
            )
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn numbered(text: &str) -> String {
        text.lines()
            .enumerate()
            .map(|(i, line)| format!("{} {}\n", format!("{:>3}", i + 1).dimmed(), line))
            .collect()
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
