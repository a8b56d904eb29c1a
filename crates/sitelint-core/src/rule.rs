//! Rule trait for defining audit rules.

use crate::context::{FileContext, FileKind};
use crate::types::{Severity, Violation};

/// Errors a rule can raise while evaluating a file.
///
/// The analyzer never aborts on these; it turns them into a violation
/// tagged with the failing rule.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A regular expression failed to compile.
    #[error("invalid pattern `{pattern}`: {message}")]
    Pattern {
        /// Pattern source.
        pattern: String,
        /// Compiler message.
        message: String,
    },

    /// Any other evaluation failure.
    #[error("{0}")]
    Evaluation(String),
}

/// A per-file audit rule.
///
/// A rule has two halves: a selector ([`Rule::applies_to`]) deciding whether
/// the file contains the markup the rule is about, and [`Rule::check`]
/// producing the violations. `check` is only called when the selector
/// matched, so a page without `<img>` can never fail an image rule.
///
/// # Example
///
/// ```ignore
/// use sitelint_core::{FileContext, Rule, RuleError, Severity, Violation};
///
/// pub struct NoInlineStyle;
///
/// impl Rule for NoInlineStyle {
///     fn name(&self) -> &str { "no-inline-style" }
///     fn code(&self) -> &str { "SL900" }
///
///     fn check(&self, ctx: &FileContext) -> Result<Vec<Violation>, RuleError> {
///         if ctx.content.contains("style=\"") {
///             return Ok(vec![Violation::new(
///                 self.code(),
///                 self.name(),
///                 Severity::Warning,
///                 ctx.relative_path.clone(),
///                 self.name(),
///             )]);
///         }
///         Ok(vec![])
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "img-alt").
    fn name(&self) -> &str;

    /// Returns the rule code (e.g., "SL001").
    fn code(&self) -> &str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// File kinds this rule audits.
    fn file_kinds(&self) -> &[FileKind] {
        &[FileKind::Html]
    }

    /// Selector: whether the file contains anything this rule is about.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot be evaluated.
    fn applies_to(&self, _ctx: &FileContext) -> Result<bool, RuleError> {
        Ok(true)
    }

    /// Checks a single file and returns any violations found.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule cannot be evaluated against this file.
    fn check(&self, ctx: &FileContext) -> Result<Vec<Violation>, RuleError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
