//! Shared output formatting for audit results.

use anyhow::Result;
use sitelint_core::report::{render_compact, render_text, Headings};
use sitelint_core::LintResult;
use std::path::Path;

use crate::OutputFormat;

/// Print audit results in the specified format.
pub fn print(
    result: &LintResult,
    format: OutputFormat,
    display_root: &Path,
    headings: &Headings,
) -> Result<()> {
    println!("{}", render(result, format, display_root, headings)?);
    Ok(())
}

fn render(
    result: &LintResult,
    format: OutputFormat,
    display_root: &Path,
    headings: &Headings,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(result, display_root, headings),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Compact if result.is_clean() => headings.ok_line.clone(),
        OutputFormat::Compact => render_compact(result, display_root),
    })
}
