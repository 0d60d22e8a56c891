//! CLI command implementations.

pub mod config;
pub mod extract;
pub mod search;

use anyhow::{Context, Result};
use parallel_fetch::{BatchSummary, Outcome};
use thiserror::Error;
use tokio::io::AsyncReadExt;

use crate::output::{render_outcomes, OutputFormat, Render};
use crate::ExitCode;

/// Bad arguments or input.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UsageError(String);

impl UsageError {
    /// Creates a usage error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Splits text into trimmed, non-blank lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads all of stdin as trimmed, non-blank lines.
async fn read_stdin_lines() -> Result<Vec<String>> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read stdin")?;
    Ok(split_lines(&text))
}

/// Appends stdin lines to `inputs` when `use_stdin` is set.
async fn gather_inputs(mut inputs: Vec<String>, use_stdin: bool) -> Result<Vec<String>> {
    if use_stdin {
        inputs.extend(read_stdin_lines().await?);
    }
    Ok(inputs)
}

/// Exit code for a finished batch.
pub fn batch_exit_code(summary: &BatchSummary) -> ExitCode {
    if summary.all_failed() || summary.partially_failed() {
        ExitCode::PartialFailure
    } else {
        ExitCode::Success
    }
}

/// Prints every outcome to stdout and returns the batch exit code.
fn print_outcomes<T: Render>(
    outcomes: &[Outcome<T>],
    inputs: &[String],
    format: OutputFormat,
    pretty: bool,
) -> Result<ExitCode> {
    let rendered = render_outcomes(outcomes, inputs, format, pretty)?;
    print!("{rendered}");
    Ok(batch_exit_code(&BatchSummary::of(outcomes)))
}
