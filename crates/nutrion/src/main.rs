//! Nutrion CLI - "Tell me about my meal" from the terminal.
//!
//! Sends a food photo with a fixed nutritionist prompt to a hosted Gemini
//! model and prints the itemized calorie breakdown it returns.
//!
//! # Usage
//!
//! ```bash
//! # Analyze one photo
//! nutrion analyze lunch.jpg
//!
//! # Guided mode (no subcommand, on a terminal)
//! nutrion
//!
//! # View configuration
//! nutrion config show
//! ```

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::process::ExitCode;

mod cli;
mod logging;

/// Nutrion - nutrition breakdown of a meal photo via Gemini.
#[derive(Parser, Debug)]
#[command(name = "nutrion")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a meal photo and print the nutrition breakdown
    Analyze(cli::analyze::AnalyzeArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // A missing .env is fine; the key may come from the real environment.
    let dotenv = dotenvy::dotenv();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match nutrion_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `nutrion config path`."
            );
            nutrion_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Nutrion v{}", nutrion_core::VERSION);
    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {e}"),
    }

    // Dispatch to the appropriate command handler
    let result = match cli.command {
        Some(Commands::Analyze(args)) => cli::analyze::execute(args, &config).await,
        Some(Commands::Config(args)) => cli::config::execute(args).await,
        None if std::io::stdin().is_terminal() => cli::interactive::run(&config).await,
        None => {
            eprintln!("No command given. Run `nutrion analyze <IMAGE>` or `nutrion --help`.");
            return ExitCode::FAILURE;
        }
    };

    report(result)
}

/// Turn a command result into the process exit status, printing failures.
fn report(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_line(&e));
            ExitCode::FAILURE
        }
    }
}

/// The single line shown for a failed command.
fn error_line(err: &anyhow::Error) -> String {
    format!("Error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_line_prefixes_message() {
        let err = anyhow::Error::new(nutrion_core::AnalysisError::EmptyUpload);
        assert_eq!(error_line(&err), "Error: Uploaded file is empty or unreadable.");
    }

    #[test]
    fn report_maps_outcome_to_exit_code() {
        assert_eq!(report(Ok(())), ExitCode::SUCCESS);
        assert_eq!(report(Err(anyhow::anyhow!("boom"))), ExitCode::FAILURE);
    }

    #[test]
    fn cli_parses_analyze_with_global_flags() {
        let cli = Cli::parse_from(["nutrion", "-v", "analyze", "lunch.png"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Analyze(_))));
    }

    #[test]
    fn cli_without_subcommand_is_accepted() {
        let cli = Cli::parse_from(["nutrion"]);
        assert!(cli.command.is_none());
    }
}
