//! Lazily compiled regular expressions.

use crate::rule::RuleError;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// A regular expression compiled on first use.
///
/// Built-in rules declare their patterns as `static` values; declarative
/// rules build them from configuration. Either way a compile failure
/// surfaces as [`RuleError::Pattern`] at evaluation time instead of a panic.
///
/// ```ignore
/// static IMG_TAG: LazyRegex = LazyRegex::new(r"(?i)<img\b");
///
/// if IMG_TAG.get()?.is_match(ctx.content) { /* ... */ }
/// ```
#[derive(Debug, Clone)]
pub struct LazyRegex {
    source: Cow<'static, str>,
    compiled: OnceLock<Result<Regex, String>>,
}

impl LazyRegex {
    /// Creates a pattern from a static source string.
    #[must_use]
    pub const fn new(source: &'static str) -> Self {
        Self {
            source: Cow::Borrowed(source),
            compiled: OnceLock::new(),
        }
    }

    /// Creates a pattern from an owned source string.
    #[must_use]
    pub fn owned(source: impl Into<String>) -> Self {
        Self {
            source: Cow::Owned(source.into()),
            compiled: OnceLock::new(),
        }
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the compiled regex, compiling it on first call.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::Pattern`] if the source is not a valid regex.
    pub fn get(&self) -> Result<&Regex, RuleError> {
        let compiled = self
            .compiled
            .get_or_init(|| Regex::new(&self.source).map_err(|e| e.to_string()));
        match compiled {
            Ok(re) => Ok(re),
            Err(message) => Err(RuleError::Pattern {
                pattern: self.source.to_string(),
                message: message.clone(),
            }),
        }
    }

    /// Shorthand for `get()?.is_match(haystack)`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::Pattern`] if the source is not a valid regex.
    pub fn is_match(&self, haystack: &str) -> Result<bool, RuleError> {
        Ok(self.get()?.is_match(haystack))
    }
}
