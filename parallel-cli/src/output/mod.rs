//! Output formatting for CLI.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use anyhow::Result;
use clap::ValueEnum;
use parallel_core::{ExtractResponse, SearchResponse};
use parallel_fetch::Outcome;
use serde::Serialize;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// One JSON document per request.
    #[default]
    Json,
    /// Human-readable text.
    Text,
}

/// A response that can be printed in either format.
pub trait Render: Serialize {
    /// Renders the response as text.
    fn render_text(&self, formatter: &TextFormatter) -> String;
}

impl Render for SearchResponse {
    fn render_text(&self, formatter: &TextFormatter) -> String {
        formatter.format_search(self)
    }
}

impl Render for ExtractResponse {
    fn render_text(&self, formatter: &TextFormatter) -> String {
        formatter.format_extract(self)
    }
}

/// Renders every outcome in input order.
///
/// `inputs[i]` is the objective or URL that produced the outcome at index
/// `i`; failures are labelled with it.
pub fn render_outcomes<T: Render>(
    outcomes: &[Outcome<T>],
    inputs: &[String],
    format: OutputFormat,
    pretty: bool,
) -> Result<String> {
    let input_for = |index: usize| inputs.get(index).map_or("", String::as_str);

    match format {
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(pretty);
            let mut docs = Vec::with_capacity(outcomes.len());
            for outcome in outcomes {
                let doc = match &outcome.result {
                    Ok(response) => formatter.format(response)?,
                    Err(e) => formatter.format_failure(input_for(outcome.index), e)?,
                };
                docs.push(doc);
            }
            Ok(format!("{}\n", docs.join("\n")))
        }
        OutputFormat::Text => {
            let formatter = TextFormatter::new();
            let mut out = String::new();
            for outcome in outcomes {
                let block = match &outcome.result {
                    Ok(response) => response.render_text(&formatter),
                    Err(e) => formatter.format_failure(input_for(outcome.index), e),
                };
                out.push_str(&block);
                out.push_str("\n\n");
            }
            Ok(out)
        }
    }
}
