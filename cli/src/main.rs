//! CLI entrypoint for agentgen
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use agentgen_application::{
    CreateSpecError, CreateSpecInput, CreateSpecUseCase, GenerateProjectInput,
    GenerateProjectUseCase, ValidateSpecUseCase,
};
use agentgen_domain::{GenerationOptions, OutputFormat, Severity, TemplateSource, ValidationReport};
use agentgen_infrastructure::{
    ArtifactWriter, ConfigLoader, FileConfig, SpecFileReader, TemplateResolver,
    TeraTemplateRenderer,
};
use agentgen_presentation::{
    Cli, Command, ConsoleFormatter, GenerateArgs, NewArgs, ProgressReporter, SimpleProgress,
    ValidateArgs,
};
use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        println!("\nEffective configuration:\n");
        print!("{}", ConfigLoader::render_effective(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    ConsoleFormatter::set_color_enabled(config.output.color);

    let issues = config.validate();
    if !issues.is_empty() {
        eprint!("{}", ConsoleFormatter::format_config_issues(&issues));
        if issues.iter().any(|i| i.severity == Severity::Error) {
            return Ok(ExitCode::FAILURE);
        }
    }

    info!("Starting agentgen");

    match cli.command {
        Some(Command::Generate(args)) => generate(args, &config, cli.quiet, cli.verbose),
        Some(Command::Validate(args)) => validate(args, &config),
        Some(Command::New(args)) => new_spec(args),
        Some(Command::Examples) => {
            print!("{}", ConsoleFormatter::format_examples());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            Cli::command().print_help()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Config file values, overridden by command-line flags
fn generation_options(args: &GenerateArgs, config: &FileConfig) -> Result<GenerationOptions> {
    let mut options = config.generation_options();

    if let Some(name) = &args.name {
        options.agent_name = name.clone();
    }
    if let Some(model) = &args.model {
        options.model = model.clone();
    }
    if let Some(dir) = &args.template_dir {
        options = options.with_template_dir(dir.clone());
    }
    if let TemplateSource::Directory(dir) = &options.template_source {
        if !dir.is_dir() {
            bail!("Template directory does not exist: {}", dir.display());
        }
    }

    let prompt_file = args
        .system_prompt
        .as_ref()
        .or(config.generation.system_prompt_file.as_ref());
    if let Some(path) = prompt_file {
        let prompt = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read system prompt {}", path.display()))?;
        options.system_prompt = Some(prompt);
    }

    Ok(options)
}

fn generate(args: GenerateArgs, config: &FileConfig, quiet: bool, verbose: u8) -> Result<ExitCode> {
    let options = generation_options(&args, config)?;
    let format: OutputFormat = args
        .output_format
        .map(Into::into)
        .unwrap_or(config.output.format);

    let document = SpecFileReader::read(&args.spec, args.format.map(Into::into))?;

    // === Dependency Injection ===
    let resolver = TemplateResolver::from_source(&options.template_source);
    let renderer = TeraTemplateRenderer::new(&resolver)?;
    let use_case = GenerateProjectUseCase::new(renderer);

    let input = GenerateProjectInput::new(document, options);
    let result = if quiet || format == OutputFormat::Json {
        use_case.execute(input)?
    } else if std::io::stderr().is_terminal() {
        use_case.execute_with_progress(input, &ProgressReporter::new())?
    } else {
        use_case.execute_with_progress(input, &SimpleProgress)?
    };

    if !result.is_success() {
        print_report(&result.report, &args.spec.display().to_string(), format);
        return Ok(ExitCode::FAILURE);
    }

    let writer = ArtifactWriter::new(&args.output).with_force(args.force);
    let plan = writer.plan(&result.artifacts)?;

    if format == OutputFormat::Json {
        if !args.dry_run {
            writer.write(&result.artifacts)?;
        }
        println!("{}", ConsoleFormatter::format_plan_json(&result, &plan));
        return Ok(ExitCode::SUCCESS);
    }

    if result.report.warning_count() > 0 {
        print!(
            "{}",
            ConsoleFormatter::format_report(&result.report, &args.spec.display().to_string())
        );
    }

    if args.dry_run || verbose > 0 {
        print!("{}", ConsoleFormatter::format_plan(&result, &plan));
    }
    if args.dry_run {
        println!("\nDry run complete. No files written.");
        return Ok(ExitCode::SUCCESS);
    }

    let plan = writer.write(&result.artifacts)?;
    if !quiet {
        print!(
            "{}",
            ConsoleFormatter::format_success(&args.output, &plan, result.report.tools().len())
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn validate(args: ValidateArgs, config: &FileConfig) -> Result<ExitCode> {
    let format: OutputFormat = args
        .output_format
        .map(Into::into)
        .unwrap_or(config.output.format);
    let document = SpecFileReader::read(&args.spec, args.format.map(Into::into))?;
    let report = ValidateSpecUseCase::new().execute(&document)?;

    print_report(&report, &args.spec.display().to_string(), format);

    if report.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn new_spec(args: NewArgs) -> Result<ExitCode> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            args.output.display()
        );
    }

    let input = CreateSpecInput::new(args.signatures, args.format.into());
    let created = match CreateSpecUseCase::new().execute(input) {
        Ok(created) => created,
        Err(err @ CreateSpecError::Rejected(_)) => {
            print!("{}", ConsoleFormatter::format_report(err.report(), "<arguments>"));
            return Ok(ExitCode::FAILURE);
        }
    };
    for issue in created.report.warnings() {
        warn!("{}", issue);
    }

    std::fs::write(&args.output, &created.content)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    print!("{}", ConsoleFormatter::format_created(&args.output, &created.content));
    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &ValidationReport, source: &str, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", ConsoleFormatter::format_report(report, source)),
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_report_json(report, source)),
    }
}
