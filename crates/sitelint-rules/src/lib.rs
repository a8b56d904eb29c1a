//! # sitelint-rules
//!
//! Built-in audit rules for sitelint.
//!
//! ## Available Rules
//!
//! | Code | Name | Files | Description |
//! |------|------|-------|-------------|
//! | SL001 | `img-alt` | html | Pages with images have at least one `alt` |
//! | SL002 | `lang-attr` | html | `<html>` declares a non-empty `lang` |
//! | SL003 | `viewport` | html | `<head>` has a viewport meta tag |
//! | SL004 | `title` | html | `<head>` has a `<title>` |
//! | SL005 | `label-for` | html | Pages with labels have at least one `for` |
//! | SL010 | `seo-tags` | html | Title, description, Open Graph, Twitter and canonical tags |
//! | SL020 | `link-integrity` | html, css | Internal references point at existing files |
//! | SL030 | `theme-asset-variants` | html | `-dark`/`-light` images come in pairs |
//! | SL101 | `img-alt-strict` | html | Every `<img>` has `alt` (opt-in) |
//! | SL105 | `label-for-strict` | html | Every `<label>` has `for` (opt-in) |
//!
//! ## Usage
//!
//! ```ignore
//! use sitelint_core::{Analyzer, Config};
//! use sitelint_rules::Audit;
//!
//! let config = Config::default();
//! let analyzer = Analyzer::builder()
//!     .root("HTML_TEMPLATE")
//!     .rules(Audit::A11y.rules(false, &config))
//!     .config(config)
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod a11y;
mod link_integrity;
mod presets;
mod seo_tags;
pub mod strict;
pub mod theme_assets;

pub use link_integrity::{extract_references, LinkIntegrity};
pub use presets::{all_rules, default_rules, select_rules, strict_rules, Audit, UnknownRule};
pub use seo_tags::SeoTags;
pub use theme_assets::{variant_name, ThemeAssetVariants};

/// Re-export core types for convenience.
pub use sitelint_core::{Rule, Severity, Violation};
