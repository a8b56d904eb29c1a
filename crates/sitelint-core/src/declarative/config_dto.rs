//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to [`PatternRule`](crate::pattern_rule::PatternRule)s
//! via the loader.

use serde::Deserialize;

/// Raw TOML representation of declarative rules.
///
/// Lives next to the base `Config` keys in the same file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeclarativeConfigDto {
    /// Selector/requirement rules.
    #[serde(rename = "pattern-rule", default)]
    pub pattern_rule: Vec<PatternRuleDto>,
}

/// TOML representation of a `[[pattern-rule]]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternRuleDto {
    /// Rule name (e.g., "has-favicon").
    pub name: String,
    /// Rule code (default: "SLD001").
    #[serde(default)]
    pub code: Option<String>,
    /// Regex deciding whether the file is in scope.
    pub selector: String,
    /// Regex that must match for the file to pass.
    pub require: String,
    /// Where `require` is searched: "document" or "head".
    #[serde(default = "default_scope_str")]
    pub scope: String,
    /// Violation message (default: the rule name).
    #[serde(default)]
    pub message: Option<String>,
    /// One-line description for `list-rules`.
    #[serde(default)]
    pub description: Option<String>,
    /// Severity (default: "error").
    #[serde(default = "default_severity_str")]
    pub severity: String,
}

fn default_scope_str() -> String {
    "document".to_string()
}

fn default_severity_str() -> String {
    "error".to_string()
}
