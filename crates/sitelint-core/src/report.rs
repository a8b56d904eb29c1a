//! Plain-text rendering of audit results.
//!
//! The layouts here are what the audit commands print on stdout. Both
//! renderers return the report without a trailing newline.

use crate::types::{Detail, LintResult, Violation};
use std::fmt::Write as _;
use std::path::Path;

/// Wording of a text report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headings {
    /// Single line printed when there is nothing to report.
    pub ok_line: String,
    /// First line of a non-empty report.
    pub header: String,
}

impl Headings {
    /// Creates headings from the two lines.
    #[must_use]
    pub fn new(ok_line: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            ok_line: ok_line.into(),
            header: header.into(),
        }
    }
}

/// Renders the human-readable report.
///
/// Reference findings print as `- attr="value" in <file>`. Consecutive
/// missing-tag findings for one file collapse into `- <file>` followed by
/// `  missing: a, b`. Everything else prints as `- <file>: <message>`.
/// Files are shown joined onto `display_root`.
#[must_use]
pub fn render_text(result: &LintResult, display_root: &Path, headings: &Headings) -> String {
    if result.is_clean() {
        return headings.ok_line.clone();
    }

    let mut out = headings.header.clone();
    let violations = &result.violations;
    let mut i = 0;
    while i < violations.len() {
        let v = &violations[i];
        let file = display_root.join(&v.file);
        match &v.detail {
            Some(Detail::Reference {
                attribute, value, ..
            }) => {
                let _ = write!(out, "\n- {attribute}=\"{value}\" in {}", file.display());
                i += 1;
            }
            Some(Detail::MissingTag { .. }) => {
                let group: Vec<&str> = violations[i..]
                    .iter()
                    .take_while(|w| w.file == v.file)
                    .map_while(missing_tag)
                    .collect();
                let _ = write!(
                    out,
                    "\n- {}\n  missing: {}",
                    file.display(),
                    group.join(", ")
                );
                i += group.len();
            }
            _ => {
                let _ = write!(out, "\n- {}: {}", file.display(), v.message);
                i += 1;
            }
        }
    }
    out
}

fn missing_tag(v: &Violation) -> Option<&str> {
    match &v.detail {
        Some(Detail::MissingTag { tag }) => Some(tag),
        _ => None,
    }
}

/// Renders one `<file>[:<line>]: <severity> [<code>] <message>` line per
/// violation, files joined onto `display_root`.
#[must_use]
pub fn render_compact(result: &LintResult, display_root: &Path) -> String {
    result
        .violations
        .iter()
        .map(|v| {
            let mut shown = v.clone();
            shown.file = display_root.join(&v.file);
            shown.to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
