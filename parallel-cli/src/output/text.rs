//! Text output formatting.

use parallel_core::{ExtractResponse, SearchResponse, Warning};
use parallel_fetch::FetchError;

/// Characters of each excerpt shown in text output.
const EXCERPT_PREVIEW_CHARS: usize = 200;

/// Text formatter.
pub struct TextFormatter {
    excerpt_chars: usize,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new() -> Self {
        Self {
            excerpt_chars: EXCERPT_PREVIEW_CHARS,
        }
    }

    /// Set the excerpt preview length.
    #[allow(dead_code)]
    pub fn with_excerpt_chars(mut self, chars: usize) -> Self {
        self.excerpt_chars = chars;
        self
    }

    /// Formats a search response.
    pub fn format_search(&self, response: &SearchResponse) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Search ID: {}", response.search_id));
        lines.push(format!("Results: {}", response.results.len()));
        lines.push(String::new());

        for result in &response.results {
            lines.push(format!("Title: {}", title_or_default(result.title.as_deref())));
            lines.push(format!("URL: {}", result.url));
            self.push_excerpts(&mut lines, &result.excerpts);
            lines.push(String::new());
        }

        push_warnings(&mut lines, response.warnings.as_deref());
        lines.join("\n")
    }

    /// Formats an extract response.
    pub fn format_extract(&self, response: &ExtractResponse) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Extract ID: {}", response.extract_id));
        lines.push(format!("Results: {}", response.results.len()));
        lines.push(String::new());

        for result in &response.results {
            lines.push(format!("Title: {}", title_or_default(result.title.as_deref())));
            lines.push(format!("URL: {}", result.url));
            if let Some(date) = &result.publish_date {
                lines.push(format!("Published: {date}"));
            }
            if let Some(excerpts) = &result.excerpts {
                self.push_excerpts(&mut lines, excerpts);
            }
            if let Some(content) = &result.full_content {
                lines.push(format!(
                    "Full Content: {} characters",
                    content.chars().count()
                ));
            }
            lines.push(String::new());
        }

        if let Some(errors) = response.errors.as_deref().filter(|e| !e.is_empty()) {
            lines.push("Errors:".to_string());
            for error in errors {
                lines.push(format!("  {}: {}", error.url, error.message));
            }
        }

        push_warnings(&mut lines, response.warnings.as_deref());
        lines.join("\n")
    }

    /// Formats a failed request.
    pub fn format_failure(&self, input: &str, err: &FetchError) -> String {
        format!("Error ({input}): {err}")
    }

    fn push_excerpts(&self, lines: &mut Vec<String>, excerpts: &[String]) {
        if excerpts.is_empty() {
            return;
        }
        lines.push("Excerpts:".to_string());
        for excerpt in excerpts {
            lines.push(format!("  {}...", truncate_chars(excerpt, self.excerpt_chars)));
        }
    }
}

fn title_or_default(title: Option<&str>) -> &str {
    title.unwrap_or("(untitled)")
}

fn push_warnings(lines: &mut Vec<String>, warnings: Option<&[Warning]>) {
    if let Some(warnings) = warnings.filter(|w| !w.is_empty()) {
        lines.push("Warnings:".to_string());
        for warning in warnings {
            lines.push(format!("  {}: {}", warning.kind, warning.message));
        }
    }
}

/// Returns at most `max` characters of `s`, cut on a char boundary.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
