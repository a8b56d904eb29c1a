//! DTO → [`PatternRule`] conversion with validation.
//!
//! Patterns are not compiled here. A broken regex surfaces per file as a
//! `rule_error` violation, the same way built-in rules report failures.

use std::collections::HashSet;

use crate::pattern_rule::{PatternRule, Scope};
use crate::types::Severity;
use crate::utils::LazyRegex;

use super::config_dto::{DeclarativeConfigDto, PatternRuleDto};

/// Code given to declarative rules that do not set one.
pub const DEFAULT_CODE: &str = "SLD001";

/// Errors during DTO → rule conversion.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A rule has an empty name.
    #[error("pattern-rule[{index}]: name must not be empty")]
    EmptyName {
        /// Position of the section in the file.
        index: usize,
    },

    /// Two rules share a name.
    #[error("pattern-rule '{name}' is defined more than once")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// Unknown severity string.
    #[error("{context}: unknown severity `{value}`, expected: error, warning, info")]
    UnknownSeverity {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// Unknown scope string.
    #[error("{context}: unknown scope `{value}`, expected: document, head")]
    UnknownScope {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },
}

/// Converts a `DeclarativeConfigDto` to pattern rules.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: DeclarativeConfigDto) -> Result<Vec<PatternRule>, LoadError> {
    let mut seen = HashSet::new();
    dto.pattern_rule
        .into_iter()
        .enumerate()
        .map(|(i, rule)| {
            if rule.name.trim().is_empty() {
                return Err(LoadError::EmptyName { index: i });
            }
            if !seen.insert(rule.name.clone()) {
                return Err(LoadError::DuplicateName { name: rule.name });
            }
            convert_pattern_rule(rule)
        })
        .collect()
}

fn convert_pattern_rule(dto: PatternRuleDto) -> Result<PatternRule, LoadError> {
    let context = format!("pattern-rule '{}'", dto.name);
    let severity = parse_severity(&dto.severity, &context)?;
    let scope = parse_scope(&dto.scope, &context)?;

    let mut rule = PatternRule::new(
        dto.name,
        dto.code.unwrap_or_else(|| DEFAULT_CODE.to_string()),
        LazyRegex::owned(dto.selector),
        LazyRegex::owned(dto.require),
    )
    .scope(scope)
    .severity(severity);

    if let Some(message) = dto.message {
        rule = rule.message(message);
    }
    if let Some(description) = dto.description {
        rule = rule.description(description);
    }
    Ok(rule)
}

fn parse_severity(s: &str, context: &str) -> Result<Severity, LoadError> {
    s.parse().map_err(|_| LoadError::UnknownSeverity {
        context: context.to_string(),
        value: s.to_string(),
    })
}

fn parse_scope(s: &str, context: &str) -> Result<Scope, LoadError> {
    match s.to_ascii_lowercase().as_str() {
        "document" => Ok(Scope::Document),
        "head" => Ok(Scope::Head),
        _ => Err(LoadError::UnknownScope {
            context: context.to_string(),
            value: s.to_string(),
        }),
    }
}
