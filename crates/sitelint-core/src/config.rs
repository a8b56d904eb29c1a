//! Configuration types for sitelint.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Site root used when neither the CLI nor a config file names one.
pub const DEFAULT_ROOT: &str = "HTML_TEMPLATE";

/// Top-level configuration for sitelint.
///
/// Declarative `[[pattern-rule]]` sections live in the same file but are
/// loaded separately by [`crate::declarative::load_rules_from_toml`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Lowest severity that fails the run (default: "info", i.e. any violation).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Severity threshold that makes the run fail.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Info)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Site root to audit; [`DEFAULT_ROOT`] when unset.
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Glob patterns (relative to the root) to leave out of the audit.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Worker threads for file evaluation (default: rayon's global pool).
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl AnalyzerConfig {
    /// The configured site root, or [`DEFAULT_ROOT`].
    #[must_use]
    pub fn site_root(&self) -> &Path {
        self.root.as_deref().unwrap_or(Path::new(DEFAULT_ROOT))
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analyzer.root, None);
        assert_eq!(config.analyzer.site_root(), Path::new("HTML_TEMPLATE"));
        assert!(config.analyzer.exclude.is_empty());
        assert!(config.rules.is_empty());
        assert_eq!(config.fail_on(), Severity::Info);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
fail_on = "warning"

[analyzer]
root = "./public"
exclude = ["vendor/**"]
parallelism = 2

[rules.img-alt]
enabled = false

[rules.seo-tags]
severity = "warning"

[rules.theme-asset-variants]
markers = ["data-theme-toggle"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.site_root(), Path::new("./public"));
        assert_eq!(config.analyzer.parallelism, Some(2));
        assert_eq!(config.fail_on(), Severity::Warning);
        assert!(!config.is_rule_enabled("img-alt"));
        assert!(config.is_rule_enabled("lang-attr"));
        assert_eq!(config.rule_severity("seo-tags"), Some(Severity::Warning));

        let theme = config.rules.get("theme-asset-variants").unwrap();
        assert_eq!(theme.get_str_array("markers"), vec!["data-theme-toggle"]);
    }

    #[test]
    fn test_pattern_rule_sections_are_ignored_here() {
        let toml = r#"
[[pattern-rule]]
name = "x"
selector = "a"
require = "b"
"#;
        assert!(Config::parse(toml).is_ok());
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("fail_on = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
