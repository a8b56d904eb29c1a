//! Rule requiring the standard SEO and social-card tags in `<head>`.
//!
//! Every HTML file is checked. A file without a head block is missing
//! every tag.

use sitelint_core::utils::{head_block, LazyRegex};
use sitelint_core::{Detail, FileContext, Rule, RuleError, Severity, Violation};

/// Rule code for seo-tags.
pub const CODE: &str = "SL010";

/// Rule name for seo-tags.
pub const NAME: &str = "seo-tags";

/// Required tags, in report order.
static REQUIRED: [(&str, LazyRegex); 12] = [
    ("title", LazyRegex::new(r"(?i)<title>[\s\S]*?</title>")),
    (
        "description",
        LazyRegex::new(r#"(?i)<meta[^>]+name=["']description["'][^>]*>"#),
    ),
    (
        "ogTitle",
        LazyRegex::new(r#"(?i)<meta[^>]+property=["']og:title["'][^>]*>"#),
    ),
    (
        "ogDesc",
        LazyRegex::new(r#"(?i)<meta[^>]+property=["']og:description["'][^>]*>"#),
    ),
    (
        "ogType",
        LazyRegex::new(r#"(?i)<meta[^>]+property=["']og:type["'][^>]*>"#),
    ),
    (
        "ogUrl",
        LazyRegex::new(r#"(?i)<meta[^>]+property=["']og:url["'][^>]*>"#),
    ),
    (
        "ogImage",
        LazyRegex::new(r#"(?i)<meta[^>]+property=["']og:image["'][^>]*>"#),
    ),
    (
        "twitterCard",
        LazyRegex::new(r#"(?i)<meta[^>]+name=["']twitter:card["'][^>]*>"#),
    ),
    (
        "twitterTitle",
        LazyRegex::new(r#"(?i)<meta[^>]+name=["']twitter:title["'][^>]*>"#),
    ),
    (
        "twitterDesc",
        LazyRegex::new(r#"(?i)<meta[^>]+name=["']twitter:description["'][^>]*>"#),
    ),
    (
        "twitterImage",
        LazyRegex::new(r#"(?i)<meta[^>]+name=["']twitter:image["'][^>]*>"#),
    ),
    (
        "canonical",
        LazyRegex::new(r#"(?i)<link[^>]+rel=["']canonical["'][^>]*>"#),
    ),
];

/// Requires title, description, Open Graph, Twitter card and canonical tags.
#[derive(Debug, Clone)]
pub struct SeoTags {
    /// Severity level.
    pub severity: Severity,
}

impl Default for SeoTags {
    fn default() -> Self {
        Self::new()
    }
}

impl SeoTags {
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

    /// Keys of the required tags, in report order.
    pub fn required_keys() -> impl Iterator<Item = &'static str> {
        REQUIRED.iter().map(|(key, _)| *key)
    }
}

impl Rule for SeoTags {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Pages carry title, description, Open Graph, Twitter card and canonical tags"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext) -> Result<Vec<Violation>, RuleError> {
        let head = head_block(ctx.content)?.unwrap_or("");

        let mut violations = Vec::new();
        for (key, pattern) in &REQUIRED {
            if pattern.is_match(head)? {
                continue;
            }
            violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.relative_path.clone(),
                    format!("missing {key}"),
                )
                .with_detail(Detail::MissingTag {
                    tag: (*key).to_string(),
                }),
            );
        }
        Ok(violations)
    }
}
