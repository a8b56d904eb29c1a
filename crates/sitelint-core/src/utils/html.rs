//! Markup helpers shared by rules.
//!
//! These are pattern matches over raw text, not a parser.

use super::pattern::LazyRegex;
use crate::rule::RuleError;

static HEAD_BLOCK: LazyRegex = LazyRegex::new(r"(?i)<head[\s\S]*?</head>");

/// Returns the first `<head ...> ... </head>` block, tags included.
///
/// # Errors
///
/// Returns an error only if the built-in pattern fails to compile.
pub fn head_block(content: &str) -> Result<Option<&str>, RuleError> {
    Ok(HEAD_BLOCK.get()?.find(content).map(|m| m.as_str()))
}
