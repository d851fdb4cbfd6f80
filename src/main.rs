use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use paceplan::config::{AppConfig, OutputFormat};
use paceplan::logging::init_logging;
use paceplan::plan::render_preview;
use paceplan::report::render_table;
use paceplan::{
    analyze_activities, ActivityPayload, AnalysisOutcome, Locale, NotationDecoder, PacePlanError,
    PlanPayload,
};

/// paceplan - running log analysis and workout notation decoding
///
/// Reads activity and plan exports as JSON and prints a training summary,
/// decoded workout notation, or a plan preview.
#[derive(Parser)]
#[command(name = "paceplan")]
#[command(version)]
#[command(about = "Running log analysis and workout notation decoding", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output language (overrides the config file)
    #[arg(short, long, value_enum)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize, classify and advise on an activity export
    Analyze {
        /// Activity JSON file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Decode workout notation strings
    Decode {
        /// Notation strings, one decoded line is printed per string
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print a human-readable preview of a plan export
    Preview {
        /// Plan JSON file
        file: PathBuf,
    },

    /// Show or write the configuration
    Config {
        /// Print the active configuration as TOML
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file to the default location
        #[arg(short, long)]
        init: bool,
    },
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .map_err(PacePlanError::from)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(PacePlanError::from)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<PacePlanError>() {
        Some(inner) => {
            inner.log();
            if err.chain().count() > 1 {
                eprintln!("{} {}: {}", "Error:".red().bold(), err, inner.user_message());
            } else {
                eprintln!("{} {}", "Error:".red().bold(), inner.user_message());
            }
        }
        None => eprintln!("{} {:#}", "Error:".red().bold(), err),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())
        .map_err(|err| PacePlanError::Configuration(format!("{:#}", err)))?;
    config.logging.level = config.logging.level.raised_by(cli.verbose);
    init_logging(&config.logging)?;

    let locale = cli.locale.unwrap_or(config.display.locale);

    match cli.command {
        Commands::Analyze { file, format } => {
            let input = read_input(file.as_deref())?;
            let records = ActivityPayload::parse(&input).context("Invalid activity JSON")?;

            let outcome = analyze_activities(&records, locale);
            match (format.unwrap_or(config.display.default_format), &outcome) {
                (OutputFormat::Table, AnalysisOutcome::Report(report)) => {
                    println!("{}", render_table(report));
                }
                (OutputFormat::Table, AnalysisOutcome::Error(envelope)) => {
                    eprintln!("{}", envelope.error.yellow());
                }
                (OutputFormat::Json, _) => {
                    let json = if config.display.pretty_json {
                        serde_json::to_string_pretty(&outcome)?
                    } else {
                        serde_json::to_string(&outcome)?
                    };
                    println!("{}", json);
                }
            }
        }

        Commands::Decode { names } => {
            let decoder = NotationDecoder::new(locale).map_err(PacePlanError::from)?;
            for name in &names {
                println!("{}", decoder.decode(name));
            }
        }

        Commands::Preview { file } => {
            let input = read_input(Some(&file))?;
            let entries = PlanPayload::parse(&input).context("Invalid plan JSON")?;

            let decoder = NotationDecoder::new(locale).map_err(PacePlanError::from)?;
            let preview =
                render_preview(&entries, &decoder).context("Failed to render plan preview")?;
            print!("{}", preview);
        }

        Commands::Config { show, init } => {
            if init {
                let path = AppConfig::default_config_path();
                AppConfig::default().save_to_file(&path)?;
                eprintln!(
                    "{}",
                    format!("✓ Wrote default configuration to {}", path.display()).green()
                );
            }
            if show || !init {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}
