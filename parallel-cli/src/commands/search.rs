//! Search command - one search request per objective.

use anyhow::Result;
use clap::{Args, ValueEnum};
use parallel_core::{SearchMode, SearchRequest};
use parallel_fetch::{ApiClient, DEFAULT_CONCURRENCY};
use tracing::info;

use super::{gather_inputs, print_outcomes, UsageError};
use crate::output::OutputFormat;
use crate::ExitCode;

/// Arguments for the search command.
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Objective to search for.
    pub objective: Option<String>,

    /// Objective to search for (in addition to the positional one).
    #[arg(long = "objective", value_name = "TEXT")]
    pub objective_flag: Option<String>,

    /// Keyword query to guide the search. Repeatable.
    #[arg(long = "query", value_name = "TEXT")]
    pub queries: Vec<String>,

    /// Search mode.
    #[arg(long, value_enum, default_value_t = ModeArg::OneShot)]
    pub mode: ModeArg,

    /// Maximum results per objective.
    #[arg(long, default_value_t = 10)]
    pub max_results: u32,

    /// Maximum excerpt characters per result.
    #[arg(long, default_value_t = 6000)]
    pub excerpt_chars: u32,

    /// Requests in flight at once (1-50).
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Output format.
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Read additional objectives from stdin, one per line.
    #[arg(long)]
    pub stdin: bool,
}

/// Search mode as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Single pass.
    OneShot,
    /// Multi-step.
    Agentic,
}

impl From<ModeArg> for SearchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::OneShot => SearchMode::OneShot,
            ModeArg::Agentic => SearchMode::Agentic,
        }
    }
}

impl SearchArgs {
    /// Objectives given as arguments, positional first.
    fn listed_objectives(&self) -> Vec<String> {
        self.objective
            .iter()
            .chain(self.objective_flag.iter())
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect()
    }

    /// Builds one request per objective.
    pub fn build_requests(&self, objectives: &[String]) -> Result<Vec<SearchRequest>, UsageError> {
        if objectives.is_empty() {
            return Err(UsageError::new(
                "No objectives provided. Use --objective or --stdin",
            ));
        }

        Ok(objectives
            .iter()
            .map(|objective| {
                SearchRequest::for_objective(objective.as_str())
                    .with_mode(self.mode.into())
                    .with_queries(self.queries.clone())
                    .with_max_results(self.max_results)
                    .with_excerpt_chars(self.excerpt_chars)
            })
            .collect())
    }
}

/// Runs the search command.
pub async fn run(args: &SearchArgs) -> Result<ExitCode> {
    let objectives = gather_inputs(args.listed_objectives(), args.stdin).await?;
    let requests = args.build_requests(&objectives)?;

    let client = ApiClient::from_env()?;
    client.check_credentials().await?;

    info!(count = requests.len(), "Running searches");
    let outcomes = client.dispatch_all(&requests, args.concurrency).await?;

    print_outcomes(&outcomes, &objectives, args.format, args.pretty)
}
