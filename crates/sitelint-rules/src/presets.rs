//! Rule sets behind the audit commands.

use crate::a11y;
use crate::strict;
use crate::{LinkIntegrity, SeoTags, ThemeAssetVariants};
use sitelint_core::report::Headings;
use sitelint_core::{Config, RuleBox};

/// A named audit: which rules run and how the text report is worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audit {
    /// Internal links and asset references.
    Links,
    /// Basic accessibility checks.
    A11y,
    /// Standard SEO and social-card tags.
    Seo,
    /// Dark/light image pairs on theme-switching pages.
    ThemeAssets,
    /// Every default rule.
    All,
}

impl Audit {
    /// All audits, in the order the CLI lists them.
    pub const ALL: [Self; 5] = [
        Self::Links,
        Self::A11y,
        Self::Seo,
        Self::ThemeAssets,
        Self::All,
    ];

    /// Command name of this audit.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Links => "links",
            Self::A11y => "a11y",
            Self::Seo => "seo",
            Self::ThemeAssets => "theme-assets",
            Self::All => "all",
        }
    }

    /// Returns the rules for this audit.
    ///
    /// `strict` adds the element-scoped accessibility rules to `a11y` and
    /// `all`. Rule options (e.g. theme markers) come from `config`.
    #[must_use]
    pub fn rules(self, strict: bool, config: &Config) -> Vec<RuleBox> {
        let mut rules = match self {
            Self::Links => vec![Box::new(LinkIntegrity::new()) as RuleBox],
            Self::A11y => a11y_rules(),
            Self::Seo => vec![Box::new(SeoTags::new()) as RuleBox],
            Self::ThemeAssets => vec![theme_rule(config)],
            Self::All => default_rules(config),
        };
        if strict && matches!(self, Self::A11y | Self::All) {
            rules.extend(strict_rules());
        }
        rules
    }

    /// Line printed when the audit finds nothing.
    #[must_use]
    pub fn ok_line(self) -> &'static str {
        match self {
            Self::Links => "OK: No missing internal assets or links found.",
            Self::A11y => "OK: Basic accessibility checks passed.",
            Self::Seo => "OK: All pages have standard SEO tags.",
            Self::ThemeAssets => "OK: Theme assets heuristic passed.",
            Self::All => "OK: No violations found.",
        }
    }

    /// First line of a report with `count` violations.
    #[must_use]
    pub fn header(self, count: usize) -> String {
        match self {
            Self::Links => format!("Found {count} missing references:"),
            Self::A11y => "Accessibility check report:".to_string(),
            Self::Seo => "SEO check report:".to_string(),
            Self::ThemeAssets => "Theme assets check report:".to_string(),
            Self::All => format!("Site audit report: {count} violation(s)"),
        }
    }

    /// Report wording for `count` violations.
    #[must_use]
    pub fn headings(self, count: usize) -> Headings {
        Headings::new(self.ok_line(), self.header(count))
    }
}

impl std::fmt::Display for Audit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Audit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|audit| audit.name() == s)
            .ok_or_else(|| format!("unknown audit `{s}`"))
    }
}

/// A rule name or code that matches no built-in rule.
#[derive(Debug, thiserror::Error)]
#[error("unknown rule `{0}` (see `sitelint list-rules`)")]
pub struct UnknownRule(pub String);

fn a11y_rules() -> Vec<RuleBox> {
    vec![
        Box::new(a11y::img_alt()),
        Box::new(a11y::lang_attr()),
        Box::new(a11y::viewport()),
        Box::new(a11y::title()),
        Box::new(a11y::label_for()),
    ]
}

fn theme_rule(config: &Config) -> RuleBox {
    Box::new(ThemeAssetVariants::from_config(
        config.rules.get(crate::theme_assets::NAME),
    ))
}

/// Returns the rules that run by default.
///
/// Includes:
/// - the five accessibility rules (SL001-SL005)
/// - `seo-tags` (SL010)
/// - `link-integrity` (SL020)
/// - `theme-asset-variants` (SL030)
#[must_use]
pub fn default_rules(config: &Config) -> Vec<RuleBox> {
    let mut rules = a11y_rules();
    rules.push(Box::new(SeoTags::new()));
    rules.push(Box::new(LinkIntegrity::new()));
    rules.push(theme_rule(config));
    rules
}

/// Returns the opt-in element-scoped rules (SL101, SL105).
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    vec![
        Box::new(strict::img_alt_strict()),
        Box::new(strict::label_for_strict()),
    ]
}

/// Returns every built-in rule.
#[must_use]
pub fn all_rules(config: &Config) -> Vec<RuleBox> {
    let mut rules = default_rules(config);
    rules.extend(strict_rules());
    rules
}

/// Picks built-in rules by name or code, in the order requested.
///
/// # Errors
///
/// Returns [`UnknownRule`] for the first selector that matches nothing.
pub fn select_rules<S: AsRef<str>>(
    selectors: &[S],
    config: &Config,
) -> Result<Vec<RuleBox>, UnknownRule> {
    let mut available = all_rules(config);
    let mut picked: Vec<RuleBox> = Vec::new();

    for selector in selectors {
        let selector = selector.as_ref().trim();
        let matches =
            |r: &RuleBox| r.name() == selector || r.code().eq_ignore_ascii_case(selector);
        if let Some(i) = available.iter().position(&matches) {
            picked.push(available.remove(i));
        } else if !picked.iter().any(&matches) {
            return Err(UnknownRule(selector.to_string()));
        }
    }

    Ok(picked)
}
