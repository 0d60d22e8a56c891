//! Extract command - one extract request per URL.

use anyhow::Result;
use clap::Args;
use parallel_core::ExtractRequest;
use parallel_fetch::{ApiClient, FetchError, DEFAULT_CONCURRENCY};
use tracing::info;

use super::{gather_inputs, print_outcomes, UsageError};
use crate::output::OutputFormat;
use crate::ExitCode;

/// Arguments for the extract command.
#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// URLs to extract.
    pub urls: Vec<String>,

    /// Focus excerpts on this objective.
    #[arg(long, value_name = "TEXT")]
    pub objective: Option<String>,

    /// Do not request excerpts (only honoured with --full-content).
    #[arg(long)]
    pub no_excerpts: bool,

    /// Request the full page content.
    #[arg(long)]
    pub full_content: bool,

    /// Requests in flight at once (1-50).
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Output format.
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Read additional URLs from stdin, one per line.
    #[arg(long)]
    pub stdin: bool,
}

impl ExtractArgs {
    fn listed_urls(&self) -> Vec<String> {
        self.urls
            .iter()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .collect()
    }

    /// Builds one request per URL.
    ///
    /// Every URL is validated before any request is built, so a bad URL
    /// fails the whole command.
    pub fn build_requests(&self, urls: &[String]) -> Result<Vec<ExtractRequest>> {
        if urls.is_empty() {
            return Err(UsageError::new(
                "No URLs provided. Provide URLs as arguments or use --stdin",
            )
            .into());
        }

        let objective = self
            .objective
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string);

        urls.iter()
            .map(|url| -> Result<ExtractRequest> {
                let request = ExtractRequest::for_url(url).map_err(FetchError::from)?;
                Ok(request
                    .with_objective(objective.clone())
                    .with_content(!self.no_excerpts, self.full_content))
            })
            .collect()
    }
}

/// Runs the extract command.
pub async fn run(args: &ExtractArgs) -> Result<ExitCode> {
    let urls = gather_inputs(args.listed_urls(), args.stdin).await?;
    let requests = args.build_requests(&urls)?;

    let client = ApiClient::from_env()?;
    client.check_credentials().await?;

    info!(count = requests.len(), "Running extractions");
    let outcomes = client.dispatch_all(&requests, args.concurrency).await?;

    print_outcomes(&outcomes, &urls, args.format, args.pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ExtractArgs,
    }

    fn parse(argv: &[&str]) -> ExtractArgs {
        let mut full = vec!["extract"];
        full.extend_from_slice(argv);
        Harness::try_parse_from(full).unwrap().args
    }

    fn body(request: &ExtractRequest) -> serde_json::Value {
        serde_json::to_value(request).unwrap()
    }

    #[test]
    fn test_defaults_request_excerpts_only() {
        let args = parse(&["https://example.com"]);
        let requests = args.build_requests(&args.listed_urls()).unwrap();
        assert_eq!(
            body(&requests[0]),
            serde_json::json!({
                "urls": ["https://example.com"],
                "excerpts": true,
                "full_content": false
            })
        );
    }

    #[test]
    fn test_full_content_without_excerpts() {
        let args = parse(&["https://example.com", "--no-excerpts", "--full-content"]);
        let requests = args.build_requests(&args.listed_urls()).unwrap();
        assert_eq!(requests[0].excerpts, Some(false));
        assert_eq!(requests[0].full_content, Some(true));
    }

    #[test]
    fn test_no_excerpts_alone_still_requests_excerpts() {
        let args = parse(&["https://example.com", "--no-excerpts"]);
        let requests = args.build_requests(&args.listed_urls()).unwrap();
        assert_eq!(requests[0].excerpts, Some(true));
        assert_eq!(requests[0].full_content, Some(false));
    }

    #[test]
    fn test_objective_is_shared() {
        let args = parse(&["https://a.com", "https://b.com", "--objective", "pricing"]);
        let requests = args.build_requests(&args.listed_urls()).unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests
            .iter()
            .all(|r| r.objective.as_deref() == Some("pricing")));
        assert_eq!(requests[1].urls, ["https://b.com"]);
    }

    #[test]
    fn test_invalid_url_fails_whole_command() {
        let args = parse(&["https://ok.com", "ftp://nope.com"]);
        let err = args.build_requests(&args.listed_urls()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::Validation(_))
        ));
    }

    #[test]
    fn test_no_urls_is_usage_error() {
        let args = parse(&[]);
        let err = args.build_requests(&[]).unwrap_err();
        assert!(err.downcast_ref::<UsageError>().is_some());
        assert_eq!(
            err.to_string(),
            "No URLs provided. Provide URLs as arguments or use --stdin"
        );
    }
}
