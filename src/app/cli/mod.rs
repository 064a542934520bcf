//! CLI Adapter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::app::api::{self, GenerateOptions, GenerationReport, ValidateOutcome};
use crate::app::logging::{LogConfig, init_logging};
use crate::domain::{AppError, GeneratorSettings, LogFormat, ValidationIssue};

#[derive(Parser)]
#[command(name = "payergen")]
#[command(version)]
#[command(
    about = "Validate a payer configuration and generate its deployment bundle",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Log output format
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,
    /// Tool settings file (defaults to ./payergen.toml when present)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a configuration and report every error and warning
    #[clap(visible_alias = "v")]
    Validate {
        /// Configuration file
        config: PathBuf,
        /// Print the validation result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate workflows, infrastructure, docs and schemas for a configuration
    #[clap(visible_alias = "g")]
    Generate {
        /// Configuration file
        config: PathBuf,
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Comma-separated module keys to generate (default: all enabled)
        #[arg(short, long, value_delimiter = ',')]
        modules: Option<Vec<String>>,
        /// Plan the bundle without writing files
        #[arg(long)]
        dry_run: bool,
        /// Overwrite existing files in the output directory
        #[arg(short, long)]
        force: bool,
        /// Print the generation report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Emit an example configuration for a tenant archetype
    #[clap(visible_alias = "tp")]
    Template {
        /// Archetype (medicaid-mco, commercial, attachments-only, infrastructure-only)
        kind: String,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,
    },
    /// List available workflow templates
    #[clap(visible_alias = "ls")]
    List {
        /// List template helpers instead
        #[arg(long, conflicts_with = "archetypes")]
        helpers: bool,
        /// List configuration archetypes instead
        #[arg(long)]
        archetypes: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result = load_settings(cli.settings.as_deref()).and_then(|settings| {
        let mut log_config = LogConfig::from_settings(&settings, cli.verbose);
        if let Some(format) = cli.log_format {
            log_config = log_config.with_format(format);
        }
        init_logging(&log_config);
        dispatch(cli.command, &settings)
    });

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let AppError::ValidationFailed(result) = &e {
                print_issues_to_stderr(&result.errors);
            }
            std::process::exit(e.exit_code());
        }
    }
}

fn load_settings(explicit: Option<&Path>) -> Result<GeneratorSettings, AppError> {
    let cwd = std::env::current_dir()?;
    GeneratorSettings::load(explicit, &cwd)
}

fn dispatch(command: Commands, settings: &GeneratorSettings) -> Result<i32, AppError> {
    match command {
        Commands::Validate { config, json } => run_validate(&config, json),
        Commands::Generate { config, output, modules, dry_run, force, json } => {
            let output = output.unwrap_or_else(|| settings.output.directory.clone());
            let options = GenerateOptions { modules, dry_run, force: force || settings.output.force };
            run_generate(&config, &output, &options, json).map(|_| 0)
        }
        Commands::Template { kind, output, force } => {
            run_template(&kind, output.as_deref(), force).map(|_| 0)
        }
        Commands::List { helpers, archetypes } => run_list(helpers, archetypes).map(|_| 0),
    }
}

fn run_validate(config: &Path, json: bool) -> Result<i32, AppError> {
    let outcome = api::validate(config)?;
    if json {
        print_json(&outcome)?;
    } else {
        print_validation(&outcome);
    }
    Ok(outcome.exit_code())
}

fn print_validation(outcome: &ValidateOutcome) {
    let path = outcome.config_path.display();
    let result = &outcome.result;
    if result.is_valid() {
        println!("✅ {} is valid", path);
    } else {
        println!("❌ {} is invalid: {} error(s)", path, result.errors.len());
        for issue in &result.errors {
            println!("  • {}: {} [{}]", issue.path, issue.message, issue.rule);
        }
    }
    if !result.warnings.is_empty() {
        println!("⚠️  {} warning(s):", result.warnings.len());
        for issue in &result.warnings {
            println!("  • {}: {} [{}]", issue.path, issue.message, issue.rule);
        }
    }
}

fn print_issues_to_stderr(issues: &[ValidationIssue]) {
    for issue in issues {
        eprintln!("  • {}: {} [{}]", issue.path, issue.message, issue.rule);
    }
}

fn run_generate(
    config: &Path,
    output: &Path,
    options: &GenerateOptions,
    json: bool,
) -> Result<GenerationReport, AppError> {
    let report = api::generate(config, output, options)?;
    if json {
        print_json(&report)?;
        return Ok(report);
    }

    for module in &report.skipped_modules {
        println!("⚠️  Skipped module '{}': disabled in the configuration", module);
    }
    if report.dry_run {
        println!(
            "✅ Dry run: {} artifact(s) planned for {} in {}/",
            report.total(),
            report.payer_id,
            report.output_dir.display()
        );
        for artifact in &report.artifacts {
            println!("  {}", artifact.path);
        }
    } else {
        println!(
            "✅ Generated {} artifact(s) for {} in {}/",
            report.total(),
            report.payer_id,
            report.output_dir.display()
        );
    }
    for (kind, count) in report.counts.iter().filter(|(_, count)| **count > 0) {
        println!("  {}: {}", kind, count);
    }
    if report.modules.is_empty() {
        println!("  No modules enabled; infrastructure only");
    } else {
        println!("  Modules: {}", report.modules.join(", "));
    }
    Ok(report)
}

fn run_template(kind: &str, output: Option<&Path>, force: bool) -> Result<(), AppError> {
    let outcome = api::template(kind, output, force)?;
    match &outcome.written_to {
        Some(path) => {
            println!("✅ Wrote {} configuration to {}", outcome.archetype.name, path.display())
        }
        None => print!("{}", outcome.archetype.content),
    }
    Ok(())
}

fn run_list(helpers: bool, archetypes: bool) -> Result<(), AppError> {
    if helpers {
        let (version, helpers) = api::list_helpers()?;
        println!("Template helpers (table version {}):", version);
        for helper in helpers {
            println!("  {:<10} {}", helper.category, helper.signature);
        }
    } else if archetypes {
        println!("Archetypes:");
        for archetype in api::list_archetypes()? {
            println!("  {:<20} {}", archetype.name, archetype.description);
        }
    } else {
        println!("Workflow templates:");
        for workflow in api::list_workflows()? {
            println!("  {:<24} [{}] {}", workflow.name, workflow.module, workflow.description);
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(format!("cannot serialize output: {e}")))?;
    println!("{}", json);
    Ok(())
}
