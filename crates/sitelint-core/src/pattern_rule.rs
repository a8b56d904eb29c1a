//! Selector/requirement rules over raw markup.
//!
//! A [`PatternRule`] fires when its selector matches somewhere in the file
//! and its requirement does not match inside the configured [`Scope`]. This
//! is a document-level check: one matching element anywhere satisfies it.

use crate::context::FileContext;
use crate::rule::{Rule, RuleError};
use crate::types::{Severity, Violation};
use crate::utils::{head_block, LazyRegex};
use serde::{Deserialize, Serialize};

/// Where the requirement is searched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// The whole file.
    #[default]
    Document,
    /// The first `<head>...</head>` block. A file without one fails.
    Head,
}

/// A named selector/requirement pair.
#[derive(Debug, Clone)]
pub struct PatternRule {
    name: String,
    code: String,
    description: String,
    message: Option<String>,
    severity: Severity,
    scope: Scope,
    selector: LazyRegex,
    require: LazyRegex,
}

impl PatternRule {
    /// Creates a document-scoped rule with `Severity::Error`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        selector: LazyRegex,
        require: LazyRegex,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            description: String::new(),
            message: None,
            severity: Severity::Error,
            scope: Scope::Document,
            selector,
            require,
        }
    }

    /// Sets the search scope for the requirement.
    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets the description shown by `list-rules`.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the violation message (default: the rule name).
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn is_satisfied(&self, content: &str) -> Result<bool, RuleError> {
        let haystack = match self.scope {
            Scope::Document => Some(content),
            Scope::Head => head_block(content)?,
        };
        match haystack {
            Some(text) => self.require.is_match(text),
            None => Ok(false),
        }
    }
}

impl Rule for PatternRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn applies_to(&self, ctx: &FileContext) -> Result<bool, RuleError> {
        self.selector.is_match(ctx.content)
    }

    fn check(&self, ctx: &FileContext) -> Result<Vec<Violation>, RuleError> {
        if self.is_satisfied(ctx.content)? {
            return Ok(Vec::new());
        }
        let message = self.message.as_deref().unwrap_or(&self.name);
        Ok(vec![Violation::new(
            &self.code,
            &self.name,
            self.severity,
            ctx.relative_path.clone(),
            message,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FileKind;
    use std::path::Path;

    fn ctx(content: &str) -> FileContext<'_> {
        FileContext::new(
            Path::new("/site/page.html"),
            content,
            Path::new("/site"),
            FileKind::Html,
        )
    }

    fn favicon_rule() -> PatternRule {
        PatternRule::new(
            "has-favicon",
            "SLD001",
            LazyRegex::new(r"(?i)<head\b"),
            LazyRegex::new(r#"(?i)<link[^>]+rel="icon""#),
        )
        .scope(Scope::Head)
    }

    #[test]
    fn selector_gates_the_rule() {
        let rule = favicon_rule();
        assert!(!rule.applies_to(&ctx("<body></body>")).unwrap());
        assert!(rule.applies_to(&ctx("<head></head>")).unwrap());
    }

    #[test]
    fn requirement_inside_head_passes() {
        let rule = favicon_rule();
        let html = r#"<head><link rel="icon" href="f.ico"></head>"#;
        assert!(rule.check(&ctx(html)).unwrap().is_empty());
    }

    #[test]
    fn requirement_outside_head_fails() {
        let rule = favicon_rule().message("page has no favicon");
        let html = r#"<head></head><body><link rel="icon" href="f.ico"></body>"#;
        let violations = rule.check(&ctx(html)).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "has-favicon");
        assert_eq!(violations[0].message, "page has no favicon");
        assert_eq!(violations[0].file, Path::new("page.html"));
    }

    #[test]
    fn message_defaults_to_rule_name() {
        let rule = favicon_rule();
        let violations = rule.check(&ctx("<head></head>")).unwrap();
        assert_eq!(violations[0].message, "has-favicon");
    }

    #[test]
    fn invalid_requirement_is_a_rule_error() {
        let rule = PatternRule::new(
            "broken",
            "SLD001",
            LazyRegex::new("a"),
            LazyRegex::owned("(b"),
        );
        assert!(matches!(
            rule.check(&ctx("a")),
            Err(RuleError::Pattern { .. })
        ));
    }
}
