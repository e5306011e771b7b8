//! Output formatting for find results.
//!
//! Provides functions to format a [`FindResult`] into Markdown, plain text, or JSON.

use crate::{FindResult, FinderError, FoundEntry};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::Path;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Text,
    Json,
}

impl OutputFormat {
    /// Returns the conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// Formats the find result into a string.
pub fn format_result(result: &FindResult, format: OutputFormat, pretty: bool) -> Result<String, FinderError> {
    match format {
        OutputFormat::Markdown => Ok(format_markdown(result)),
        OutputFormat::Text => Ok(format_text(result)),
        OutputFormat::Json => format_json(result, pretty),
    }
}

/// Writes the formatted result to a file.
pub fn write_result_to_file(
    result: &FindResult,
    format: OutputFormat,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), FinderError> {
    let content = format_result(result, format, pretty)?;
    fs::write(&path, content).map_err(|e| FinderError::io(path.as_ref(), e))?;
    Ok(())
}

// ----------------------- Internal formatting -----------------------

fn format_markdown(result: &FindResult) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(&format!(
        "## `{}` in {}\n\n",
        result.pattern,
        result.directory.display()
    ));
    out.push_str("| Name | Type | Length | Last write (UTC) | Attributes |\n");
    out.push_str("|------|------|-------:|------------------|------------|\n");
    for entry in &result.entries {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            entry.name.replace('|', "\\|"),
            kind(entry),
            entry.length,
            timestamp(entry.last_write_time),
            attribute_names(entry),
        ));
    }
    out.push_str(&format!("\n{} matches\n", result.entries.len()));
    out
}

fn format_text(result: &FindResult) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(&format!(
        "Directory: {}\nPattern: {}\n\n",
        result.directory.display(),
        result.pattern
    ));
    for entry in &result.entries {
        out.push_str(&format!(
            "{:<5} {:>12} {:<24} {}\n",
            kind(entry),
            entry.length,
            timestamp(entry.last_write_time),
            entry.path.display()
        ));
    }
    out.push_str(&format!("\n{} matches\n", result.entries.len()));
    out
}

fn format_json(result: &FindResult, pretty: bool) -> Result<String, FinderError> {
    let json = if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    };
    json.map_err(|e| FinderError::io(&result.directory, e.into()))
}

fn kind(entry: &FoundEntry) -> &'static str {
    if entry.is_directory { "dir" } else { "file" }
}

fn timestamp(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "-".to_string())
}

fn attribute_names(entry: &FoundEntry) -> String {
    let names: Vec<&str> = entry.attributes.iter_names().map(|(name, _)| name).collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}
