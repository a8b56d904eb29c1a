//! # sitelint-core
//!
//! Core framework for auditing a directory of generated HTML and CSS.
//!
//! This crate provides the building blocks the built-in rules and the CLI
//! are made of:
//!
//! - [`walk()`] to enumerate the site tree
//! - [`resolve()`] to map a raw `href`/`src`/`url()` value onto the site root
//! - [`Rule`] trait, with [`PatternRule`] for selector/requirement checks
//! - [`Analyzer`] for orchestrating an audit
//! - [`report`] for the plain-text report layouts
//!
//! Markup is pattern-matched, never parsed into a DOM.
//!
//! ## Example
//!
//! ```ignore
//! use sitelint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("HTML_TEMPLATE")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
pub mod declarative;
mod pattern_rule;
pub mod report;
pub mod resolve;
mod rule;
mod types;
mod walk;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, READ_FILE_CODE, READ_FILE_RULE};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, DEFAULT_ROOT};
pub use context::{FileContext, FileKind};
pub use pattern_rule::{PatternRule, Scope};
pub use resolve::{resolve, Reference, ReferenceKind, ResolvedTarget};
pub use rule::{Rule, RuleBox, RuleError};
pub use types::{Detail, LintResult, Severity, Violation};
pub use walk::{walk, WalkError};
