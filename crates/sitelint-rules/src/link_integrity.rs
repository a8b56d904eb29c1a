//! Rule checking that internal references resolve to files under the site.
//!
//! # Detected Patterns
//!
//! - HTML: `href="..."` and `src="..."` (double-quoted)
//! - CSS: `url(...)`, bare or with one quote stripped at each end
//!
//! External references (web URLs, `mailto:`, `tel:`, `data:`,
//! `javascript:`, in-page `#anchors`) are never checked. Query strings and
//! fragments are dropped before resolution.

use sitelint_core::resolve::{Reference, ReferenceKind};
use sitelint_core::utils::LazyRegex;
use sitelint_core::{Detail, FileContext, FileKind, Rule, RuleError, Severity, Violation};
use tracing::debug;

/// Rule code for link-integrity.
pub const CODE: &str = "SL020";

/// Rule name for link-integrity.
pub const NAME: &str = "link-integrity";

static HTML_ATTR: LazyRegex = LazyRegex::new(r#"(href|src)="([^"]+)""#);
static CSS_URL: LazyRegex = LazyRegex::new(r"url\(([^)]+)\)");

/// Reports `href`, `src` and `url()` references whose target file is missing.
#[derive(Debug, Clone)]
pub struct LinkIntegrity {
    /// Severity level.
    pub severity: Severity,
}

impl Default for LinkIntegrity {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkIntegrity {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Extracts every reference from the file, external ones included.
///
/// # Errors
///
/// Returns an error only if a built-in pattern fails to compile.
pub fn extract_references(ctx: &FileContext) -> Result<Vec<Reference>, RuleError> {
    let mut refs = Vec::new();
    match ctx.kind {
        FileKind::Html => {
            for caps in HTML_ATTR.get()?.captures_iter(ctx.content) {
                if let (Some(attr), Some(value)) = (caps.get(1), caps.get(2)) {
                    refs.push(Reference::new(
                        ctx.path,
                        attr.as_str(),
                        value.as_str(),
                        value.start(),
                    ));
                }
            }
        }
        FileKind::Css => {
            for caps in CSS_URL.get()?.captures_iter(ctx.content) {
                if let Some(inner) = caps.get(1) {
                    refs.push(Reference::new(
                        ctx.path,
                        "url",
                        strip_quotes(inner.as_str().trim()),
                        inner.start(),
                    ));
                }
            }
        }
    }
    Ok(refs)
}

/// Drops at most one leading and one trailing quote character.
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}

impl Rule for LinkIntegrity {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Internal links and asset references point at existing files"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn file_kinds(&self) -> &[FileKind] {
        &[FileKind::Html, FileKind::Css]
    }

    fn check(&self, ctx: &FileContext) -> Result<Vec<Violation>, RuleError> {
        let mut violations = Vec::new();
        for reference in extract_references(ctx)? {
            if reference.kind == ReferenceKind::External {
                continue;
            }
            let target = reference.resolve(ctx.root);
            if target.is_satisfied() {
                continue;
            }
            debug!(
                file = %ctx.relative_path.display(),
                value = %reference.value,
                "unresolved reference"
            );
            violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.relative_path.clone(),
                    format!(
                        "missing reference {}=\"{}\"",
                        reference.attribute, reference.value
                    ),
                )
                .at_line(ctx.line_of(reference.offset))
                .with_detail(Detail::Reference {
                    attribute: reference.attribute,
                    value: reference.value,
                    resolved: target.absolute_path,
                }),
            );
        }
        Ok(violations)
    }
}
