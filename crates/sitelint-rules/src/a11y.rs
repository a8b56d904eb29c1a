//! Basic accessibility rules.
//!
//! Each rule is a [`PatternRule`]: it applies when its selector matches and
//! passes when its requirement matches anywhere in the document. One good
//! element is enough, so a page with two `<img>` tags passes `img-alt` as
//! long as one of them has `alt`. The element-scoped checks live in
//! [`crate::strict`].

use sitelint_core::utils::LazyRegex;
use sitelint_core::{PatternRule, Scope};

/// Rule code for img-alt.
pub const IMG_ALT_CODE: &str = "SL001";
/// Rule name for img-alt.
pub const IMG_ALT: &str = "img-alt";

/// Rule code for lang-attr.
pub const LANG_ATTR_CODE: &str = "SL002";
/// Rule name for lang-attr.
pub const LANG_ATTR: &str = "lang-attr";

/// Rule code for viewport.
pub const VIEWPORT_CODE: &str = "SL003";
/// Rule name for viewport.
pub const VIEWPORT: &str = "viewport";

/// Rule code for title.
pub const TITLE_CODE: &str = "SL004";
/// Rule name for title.
pub const TITLE: &str = "title";

/// Rule code for label-for.
pub const LABEL_FOR_CODE: &str = "SL005";
/// Rule name for label-for.
pub const LABEL_FOR: &str = "label-for";

const HEAD_BLOCK: &str = r"(?i)<head[\s\S]*?</head>";

/// Pages with images carry at least one `alt="..."` (an empty value counts).
#[must_use]
pub fn img_alt() -> PatternRule {
    PatternRule::new(
        IMG_ALT,
        IMG_ALT_CODE,
        LazyRegex::new(r"(?i)<img\b"),
        LazyRegex::new(r#"(?i)<img\b[^>]*\balt=\s*"[^"]*""#),
    )
    .description("Pages with images have at least one alt attribute")
    .message(IMG_ALT)
}

/// The `<html>` tag declares a non-empty `lang`.
#[must_use]
pub fn lang_attr() -> PatternRule {
    PatternRule::new(
        LANG_ATTR,
        LANG_ATTR_CODE,
        LazyRegex::new(r"(?i)<html\b"),
        LazyRegex::new(r#"(?i)<html\b[^>]*\blang=\s*"[^"]+""#),
    )
    .description("The html element declares a language")
    .message(LANG_ATTR)
}

/// The head block has a viewport meta tag.
#[must_use]
pub fn viewport() -> PatternRule {
    PatternRule::new(
        VIEWPORT,
        VIEWPORT_CODE,
        LazyRegex::new(HEAD_BLOCK),
        LazyRegex::new(r#"(?i)<meta[^>]+name=\s*"viewport""#),
    )
    .scope(Scope::Head)
    .description("The head declares a viewport meta tag")
    .message(VIEWPORT)
}

/// The head block has a `<title>`.
#[must_use]
pub fn title() -> PatternRule {
    PatternRule::new(
        TITLE,
        TITLE_CODE,
        LazyRegex::new(HEAD_BLOCK),
        LazyRegex::new(r"(?i)<title>[\s\S]*?</title>"),
    )
    .scope(Scope::Head)
    .description("The head contains a title element")
    .message(TITLE)
}

/// Pages with labels carry at least one non-empty `for="..."`.
#[must_use]
pub fn label_for() -> PatternRule {
    PatternRule::new(
        LABEL_FOR,
        LABEL_FOR_CODE,
        LazyRegex::new(r"(?i)<label\b"),
        LazyRegex::new(r#"(?i)<label\b[^>]*\bfor=\s*"[^"]+""#),
    )
    .description("Pages with labels have at least one label bound to a control")
    .message(LABEL_FOR)
}
