//! Rule pairing dark and light image variants on theme-switching pages.
//!
//! A page opts in by containing a theme-switch marker (by default the
//! literal `themeswitch` or `themeSwitch`). For every `src="..."` on such a
//! page the `-dark` and `-light` siblings are looked up; if either exists,
//! both must.

use sitelint_core::resolve::{clean_reference, classify, resolve, ReferenceKind};
use sitelint_core::utils::LazyRegex;
use sitelint_core::{
    Detail, FileContext, Rule, RuleConfig, RuleError, Severity, Violation,
};

/// Rule code for theme-asset-variants.
pub const CODE: &str = "SL030";

/// Rule name for theme-asset-variants.
pub const NAME: &str = "theme-asset-variants";

/// Markers used when the configuration names none.
pub const DEFAULT_MARKERS: &[&str] = &["themeswitch", "themeSwitch"];

static SRC_ATTR: LazyRegex = LazyRegex::new(r#"\bsrc="([^"]+)""#);

/// Requires `-dark`/`-light` image variants to come in pairs.
#[derive(Debug, Clone)]
pub struct ThemeAssetVariants {
    /// Severity level.
    pub severity: Severity,
    /// Literal substrings marking a theme-switching page.
    pub markers: Vec<String>,
}

impl Default for ThemeAssetVariants {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeAssetVariants {
    /// Creates a new rule with the default markers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            markers: DEFAULT_MARKERS.iter().map(|m| (*m).to_string()).collect(),
        }
    }

    /// Creates the rule from `[rules.theme-asset-variants]` options.
    ///
    /// `markers = [...]` replaces the default marker list when non-empty.
    #[must_use]
    pub fn from_config(config: Option<&RuleConfig>) -> Self {
        let mut rule = Self::new();
        if let Some(config) = config {
            let markers = config.get_str_array("markers");
            if !markers.is_empty() {
                rule.markers = markers;
            }
        }
        rule
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Replaces the marker list.
    #[must_use]
    pub fn markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers = markers.into_iter().map(Into::into).collect();
        self
    }
}

/// Inserts `-<variant>` before the extension of the last path segment.
///
/// A segment without an extension gets the suffix appended.
///
/// ```ignore
/// assert_eq!(variant_name("img/logo.png", "dark"), "img/logo-dark.png");
/// assert_eq!(variant_name("img/logo", "light"), "img/logo-light");
/// ```
#[must_use]
pub fn variant_name(source: &str, variant: &str) -> String {
    let segment_start = source.rfind('/').map_or(0, |i| i + 1);
    match source[segment_start..].rfind('.') {
        Some(dot) if dot > 0 => {
            let split = segment_start + dot;
            format!("{}-{variant}{}", &source[..split], &source[split..])
        }
        _ => format!("{source}-{variant}"),
    }
}

impl Rule for ThemeAssetVariants {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Dark and light image variants exist in pairs on theme-switching pages"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn applies_to(&self, ctx: &FileContext) -> Result<bool, RuleError> {
        Ok(self.markers.iter().any(|m| ctx.content.contains(m.as_str())))
    }

    fn check(&self, ctx: &FileContext) -> Result<Vec<Violation>, RuleError> {
        let mut violations = Vec::new();

        for caps in SRC_ATTR.get()?.captures_iter(ctx.content) {
            let Some(src) = caps.get(1) else { continue };
            if classify(src.as_str()) == ReferenceKind::External {
                continue;
            }
            let cleaned = clean_reference(src.as_str());
            if cleaned.is_empty() {
                continue;
            }

            let dark = variant_name(cleaned, "dark");
            let light = variant_name(cleaned, "light");
            let dark_exists = resolve(ctx.root, ctx.path, &dark).exists;
            let light_exists = resolve(ctx.root, ctx.path, &light).exists;

            let (label, missing) = match (dark_exists, light_exists) {
                (true, false) => ("light", light),
                (false, true) => ("dark", dark),
                _ => continue,
            };
            violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.relative_path.clone(),
                    format!("missing {label} variant for {}", src.as_str()),
                )
                .at_line(ctx.line_of(src.start()))
                .with_detail(Detail::ThemeVariant {
                    source: src.as_str().to_string(),
                    missing,
                }),
            );
        }

        Ok(violations)
    }
}
