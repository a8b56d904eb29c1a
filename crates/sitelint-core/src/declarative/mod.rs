//! Declarative rules driven by TOML configuration.
//!
//! Site owners can add selector/requirement checks without writing Rust:
//!
//! ```toml
//! [[pattern-rule]]
//! name = "has-favicon"
//! selector = "(?i)<head\\b"
//! require = "(?i)<link[^>]+rel=\"icon\""
//! scope = "head"
//! message = "page has no favicon"
//! severity = "warning"
//! ```
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! config_dto types
//!   ↓ validate + convert
//! Vec<PatternRule>
//!   ↓ load_rules_from_toml()
//! Vec<RuleBox>
//! ```

pub mod config_dto;
pub mod loader;

use crate::rule::RuleBox;

/// Errors from parsing TOML and loading declarative rules.
#[derive(Debug, thiserror::Error)]
pub enum LoadRulesError {
    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Rule validation failed.
    #[error("{0}")]
    Load(#[from] loader::LoadError),
}

/// Parses TOML content and creates all declarative rules.
///
/// Returns `Ok(vec![])` if no `[[pattern-rule]]` sections are present.
///
/// # Errors
///
/// Returns an error if TOML parsing or rule validation fails.
pub fn load_rules_from_toml(content: &str) -> Result<Vec<RuleBox>, LoadRulesError> {
    let dto: config_dto::DeclarativeConfigDto = toml::from_str(content)?;
    let rules = loader::load(dto)?;
    Ok(rules
        .into_iter()
        .map(|rule| Box::new(rule) as RuleBox)
        .collect())
}
