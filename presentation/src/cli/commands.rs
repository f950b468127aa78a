//! CLI command definitions

use agentgen_domain::{DocumentSyntax, OutputFormat};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Specification file syntax, as named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpecFormat {
    /// YAML list or `tools:` mapping
    Yaml,
    /// JSON array or `{"tools": [...]}` object
    Json,
    /// One signature call per line
    Python,
}

impl From<SpecFormat> for DocumentSyntax {
    fn from(format: SpecFormat) -> Self {
        match format {
            SpecFormat::Yaml => DocumentSyntax::Yaml,
            SpecFormat::Json => DocumentSyntax::Json,
            SpecFormat::Python => DocumentSyntax::Source,
        }
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Text,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(format: OutputFormatArg) -> Self {
        match format {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for agentgen
#[derive(Parser, Debug)]
#[command(name = "agentgen")]
#[command(author, version, about = "Generate Stanley agent projects from tool signatures")]
#[command(long_about = r#"
agentgen turns short tool signatures into a runnable Stanley agent project.

A specification lists one signature per tool:

  SearchLinkedIn(url: str)
  ReadBlogPost(url: str, read_latest_n_posts: int = 3)

Every signature is validated before anything is generated, and all problems
are reported in one pass.

Configuration files are loaded from (in priority order):
1. --config <path>       Explicit config file
2. ./agentgen.toml       Project-level config
3. ~/.config/agentgen/config.toml   Global config

Example:
  agentgen new "SearchWeb(query: str)" "ReadFile(path: str)" -o tools.yml
  agentgen validate tools.yml
  agentgen generate tools.yml -o ./my-agent --name ResearchBot
  agentgen generate tools.yml -o ./my-agent --dry-run
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate an agent project from a specification file
    Generate(GenerateArgs),
    /// Validate a specification file without generating anything
    Validate(ValidateArgs),
    /// Create a new specification file from signatures
    New(NewArgs),
    /// Show example specifications
    Examples,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Specification file (YAML, JSON, or one call per line)
    #[arg(value_name = "SPEC_FILE")]
    pub spec: PathBuf,

    /// Output directory for the generated project
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Name of the agent to generate
    #[arg(short, long)]
    pub name: Option<String>,

    /// LLM model the agent runs on
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// File whose contents become system_prompt.txt
    #[arg(long, value_name = "FILE")]
    pub system_prompt: Option<PathBuf>,

    /// Directory with templates overriding the bundled ones
    #[arg(long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Specification syntax (inferred from the extension by default)
    #[arg(long, value_enum)]
    pub format: Option<SpecFormat>,

    /// Preview the generation plan without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Write into a non-empty output directory
    #[arg(short, long)]
    pub force: bool,

    /// Output format for the plan and report
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormatArg>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Specification file to validate
    #[arg(value_name = "SPEC_FILE")]
    pub spec: PathBuf,

    /// Specification syntax (inferred from the extension by default)
    #[arg(short, long, value_enum)]
    pub format: Option<SpecFormat>,

    /// Output format for the report
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormatArg>,
}

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Tool signatures, e.g. "SearchWeb(query: str)"
    #[arg(value_name = "SIGNATURE", required = true)]
    pub signatures: Vec<String>,

    /// File to create
    #[arg(short, long, value_name = "FILE", default_value = "tools.yml")]
    pub output: PathBuf,

    /// Syntax of the new file
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: SpecFormat,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::parse_from([
            "agentgen", "generate", "tools.yml", "-o", "out", "-n", "NewsBot", "--dry-run", "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Generate(args)) => {
                assert_eq!(args.spec, PathBuf::from("tools.yml"));
                assert_eq!(args.output, PathBuf::from("out"));
                assert_eq!(args.name.as_deref(), Some("NewsBot"));
                assert!(args.dry_run);
                assert!(!args.force);
                assert_eq!(args.model, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_new_with_format() {
        let cli = Cli::parse_from(["agentgen", "new", "A(x: str)", "B()", "--format", "python"]);
        match cli.command {
            Some(Command::New(args)) => {
                assert_eq!(args.signatures, vec!["A(x: str)", "B()"]);
                assert_eq!(DocumentSyntax::from(args.format), DocumentSyntax::Source);
                assert_eq!(args.output, PathBuf::from("tools.yml"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
