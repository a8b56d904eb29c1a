//! Utility functions for rule implementations.

pub mod html;
pub mod pattern;

#[doc(inline)]
pub use html::head_block;
#[doc(inline)]
pub use pattern::LazyRegex;
