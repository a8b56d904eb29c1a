//! Element-scoped variants of the accessibility rules.
//!
//! Where `img-alt` and `label-for` are satisfied by one good element
//! anywhere in the page, these check every opening tag and report each
//! offender with its line. They are opt-in (`--strict`).

use sitelint_core::utils::LazyRegex;
use sitelint_core::{FileContext, Rule, RuleError, Severity, Violation};

/// Rule code for img-alt-strict.
pub const IMG_ALT_STRICT_CODE: &str = "SL101";
/// Rule name for img-alt-strict.
pub const IMG_ALT_STRICT: &str = "img-alt-strict";

/// Rule code for label-for-strict.
pub const LABEL_FOR_STRICT_CODE: &str = "SL105";
/// Rule name for label-for-strict.
pub const LABEL_FOR_STRICT: &str = "label-for-strict";

/// Every opening tag matched by `tag` must also match `attribute`.
#[derive(Debug, Clone)]
pub struct ElementAttribute {
    name: &'static str,
    code: &'static str,
    description: &'static str,
    message: &'static str,
    severity: Severity,
    tag: LazyRegex,
    attribute: LazyRegex,
}

impl ElementAttribute {
    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Every `<img>` carries `alt="..."` (empty allowed).
#[must_use]
pub fn img_alt_strict() -> ElementAttribute {
    ElementAttribute {
        name: IMG_ALT_STRICT,
        code: IMG_ALT_STRICT_CODE,
        description: "Every img element has an alt attribute",
        message: "<img> without alt attribute",
        severity: Severity::Error,
        tag: LazyRegex::new(r"(?i)<img\b[^>]*>"),
        attribute: LazyRegex::new(r#"(?i)\balt=\s*"[^"]*""#),
    }
}

/// Every `<label>` carries a non-empty `for="..."`.
#[must_use]
pub fn label_for_strict() -> ElementAttribute {
    ElementAttribute {
        name: LABEL_FOR_STRICT,
        code: LABEL_FOR_STRICT_CODE,
        description: "Every label element is bound to a control",
        message: "<label> without for attribute",
        severity: Severity::Error,
        tag: LazyRegex::new(r"(?i)<label\b[^>]*>"),
        attribute: LazyRegex::new(r#"(?i)\bfor=\s*"[^"]+""#),
    }
}

impl Rule for ElementAttribute {
    fn name(&self) -> &'static str {
        self.name
    }

    fn code(&self) -> &'static str {
        self.code
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn applies_to(&self, ctx: &FileContext) -> Result<bool, RuleError> {
        self.tag.is_match(ctx.content)
    }

    fn check(&self, ctx: &FileContext) -> Result<Vec<Violation>, RuleError> {
        let attribute = self.attribute.get()?;
        Ok(self
            .tag
            .get()?
            .find_iter(ctx.content)
            .filter(|tag| !attribute.is_match(tag.as_str()))
            .map(|tag| {
                Violation::new(
                    self.code,
                    self.name,
                    self.severity,
                    ctx.relative_path.clone(),
                    self.message,
                )
                .at_line(ctx.line_of(tag.start()))
            })
            .collect())
    }
}
