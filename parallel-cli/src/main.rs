// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Parallel CLI - web search and page extraction from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Search with a single objective
//! parallel search "latest tokio release notes"
//!
//! # Many objectives from stdin, three at a time
//! cat objectives.txt | parallel search --stdin --concurrency 3
//!
//! # Extract full page content as text
//! parallel extract https://example.com --full-content --format text
//!
//! # Store an API key
//! parallel config set-key <KEY>
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use parallel_fetch::FetchError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{config, extract, search, UsageError};

// ============================================================================
// CLI Definition
// ============================================================================

/// Parallel CLI - search the web and extract pages.
#[derive(Parser)]
#[command(name = "parallel")]
#[command(about = "Command-line client for the Parallel search and extract API")]
#[command(long_about = r#"
Runs web searches and page extractions against the Parallel API.

Every objective or URL becomes its own request. Requests run concurrently,
transient failures are retried, and one failure never stops the others.

The API key is read from PARALLEL_API_KEY, then from the config file
(see `parallel config path`).

Examples:
  parallel search "rust async runtimes"
  parallel search --stdin < objectives.txt
  parallel extract https://example.com --full-content
  parallel config set-key <KEY>
"#)]
#[command(version)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no logs, no error messages).
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search the web for one or more objectives.
    #[command(visible_alias = "s")]
    Search(search::SearchArgs),

    /// Extract content from one or more URLs.
    #[command(visible_alias = "e")]
    Extract(extract::ExtractArgs),

    /// Manage the stored API key.
    Config(config::ConfigArgs),
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Every request succeeded.
    Success = 0,
    /// Fatal error before or outside the batch.
    Error = 1,
    /// At least one request in the batch failed.
    PartialFailure = 2,
    /// Bad arguments or input.
    Usage = 3,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

/// Picks the exit code for a failed command.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if err.downcast_ref::<UsageError>().is_some() {
        return ExitCode::Usage;
    }
    match err.downcast_ref::<FetchError>() {
        Some(FetchError::Validation(_) | FetchError::EmptyBatch) => ExitCode::Usage,
        _ => ExitCode::Error,
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let default = if verbose {
        "parallel=debug,info"
    } else {
        "parallel=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::Usage
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            return code.into();
        }
    };

    setup_logging(cli.verbose, cli.quiet);

    let result: Result<ExitCode> = match &cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::Extract(args) => extract::run(args).await,
        Commands::Config(args) => config::run(args).await,
    };

    match result {
        Ok(code) => code.into(),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e}");
            }
            exit_code_for(&e).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code_for(&anyhow::Error::new(UsageError::new("bad"))),
            ExitCode::Usage
        );
        assert_eq!(
            exit_code_for(&anyhow::Error::new(FetchError::Validation("bad url".into()))),
            ExitCode::Usage
        );
        assert_eq!(
            exit_code_for(&anyhow::Error::new(FetchError::NoCredential)),
            ExitCode::Error
        );
        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), ExitCode::Error);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["parallel", "search", "x", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["parallel", "-v", "-q", "config", "path"]).is_err());
    }
}
