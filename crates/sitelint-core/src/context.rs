//! Context types for rule execution.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Kind of file a rule can audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// `.html` documents.
    Html,
    /// `.css` stylesheets.
    Css,
}

impl FileKind {
    /// Detects the kind from the file extension (case-insensitive).
    ///
    /// Returns `None` for files that are never audited (images, fonts, ...).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("html") {
            Some(Self::Html)
        } else if ext.eq_ignore_ascii_case("css") {
            Some(Self::Css)
        } else {
            None
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Css => write!(f, "css"),
        }
    }
}

/// Context provided to rules for one audited file.
///
/// The content is read once by the analyzer and shared by every rule that
/// runs against the file.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Site root the audit runs against.
    pub root: &'a Path,
    /// Path relative to the site root.
    pub relative_path: PathBuf,
    /// Detected file kind.
    pub kind: FileKind,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &'a Path, kind: FileKind) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            root,
            relative_path,
            kind,
        }
    }

    /// Returns the 1-indexed line containing `offset`.
    ///
    /// Offsets past the end map to the last line.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        let end = offset.min(self.content.len());
        self.content.as_bytes()[..end]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(
            FileKind::from_path(Path::new("a/index.html")),
            Some(FileKind::Html)
        );
        assert_eq!(
            FileKind::from_path(Path::new("a/INDEX.HTML")),
            Some(FileKind::Html)
        );
        assert_eq!(
            FileKind::from_path(Path::new("css/site.css")),
            Some(FileKind::Css)
        );
        assert_eq!(FileKind::from_path(Path::new("img/logo.png")), None);
        assert_eq!(FileKind::from_path(Path::new("LICENSE")), None);
    }

    #[test]
    fn test_relative_path() {
        let root = Path::new("/site");
        let path = Path::new("/site/pages/about.html");
        let ctx = FileContext::new(path, "", root, FileKind::Html);
        assert_eq!(ctx.relative_path, PathBuf::from("pages/about.html"));
    }

    #[test]
    fn test_line_of() {
        let ctx = FileContext::new(
            Path::new("/site/a.html"),
            "line1\nline2\nline3",
            Path::new("/site"),
            FileKind::Html,
        );
        assert_eq!(ctx.line_of(0), 1);
        assert_eq!(ctx.line_of(6), 2);
        assert_eq!(ctx.line_of(13), 3);
        assert_eq!(ctx.line_of(999), 3);
    }
}
