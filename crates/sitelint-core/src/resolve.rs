//! Reference resolution against the virtual site root.
//!
//! Resolution is a pure function of `(site_root, source_file, raw)` plus the
//! filesystem state at check time. Nothing is cached.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Scheme prefixes that never name a file on disk.
const EXTERNAL_PREFIXES: &[&str] = &[
    "http:",
    "https:",
    "mailto:",
    "tel:",
    "data:",
    "javascript:",
    "#",
];

/// Whether a reference points inside the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// Web URL, email, phone, inline data, script or in-page anchor.
    External,
    /// A path under the site root.
    Internal,
}

/// A reference extracted from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// File the reference was found in.
    pub source: PathBuf,
    /// Context it came from (`href`, `src`, `url`).
    pub attribute: String,
    /// Value exactly as written.
    pub value: String,
    /// Classification of `value`.
    pub kind: ReferenceKind,
    /// Byte offset of the value in the source file.
    pub offset: usize,
}

impl Reference {
    /// Creates a reference and classifies it.
    #[must_use]
    pub fn new(
        source: impl Into<PathBuf>,
        attribute: impl Into<String>,
        value: impl Into<String>,
        offset: usize,
    ) -> Self {
        let value = value.into();
        let kind = classify(&value);
        Self {
            source: source.into(),
            attribute: attribute.into(),
            value,
            kind,
            offset,
        }
    }

    /// Resolves the value relative to the file it was found in.
    #[must_use]
    pub fn resolve(&self, site_root: &Path) -> ResolvedTarget {
        resolve(site_root, &self.source, &self.value)
    }
}

/// Outcome of resolving one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Classification of the raw value.
    pub kind: ReferenceKind,
    /// Absolute target path; `None` for external and same-page references.
    pub absolute_path: Option<PathBuf>,
    /// Whether the target is an existing regular file.
    pub exists: bool,
}

impl ResolvedTarget {
    /// External references and existing targets are both fine.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.kind == ReferenceKind::External || self.exists
    }
}

/// Classifies a raw reference value.
///
/// Scheme matching is case-insensitive and anchored at the first character.
#[must_use]
pub fn classify(raw: &str) -> ReferenceKind {
    let external = EXTERNAL_PREFIXES.iter().any(|prefix| {
        raw.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    });
    if external {
        ReferenceKind::External
    } else {
        ReferenceKind::Internal
    }
}

/// Drops the fragment, then the query, then surrounding whitespace.
#[must_use]
pub fn clean_reference(raw: &str) -> &str {
    let no_fragment = raw.split('#').next().unwrap_or("");
    let no_query = no_fragment.split('?').next().unwrap_or("");
    no_query.trim()
}

/// Maps a cleaned, non-empty reference to an absolute path.
///
/// A leading `/` makes it root-relative; anything else is relative to the
/// directory holding `source_file`. `.` and `..` segments are collapsed.
#[must_use]
pub fn target_path(site_root: &Path, source_file: &Path, cleaned: &str) -> PathBuf {
    if let Some(rooted) = cleaned.strip_prefix('/') {
        normalize_path(&site_root.join(rooted.trim_start_matches('/')))
    } else {
        let base = source_file.parent().unwrap_or(site_root);
        normalize_path(&base.join(cleaned))
    }
}

/// Resolves `raw` as written in `source_file`.
#[must_use]
pub fn resolve(site_root: &Path, source_file: &Path, raw: &str) -> ResolvedTarget {
    let kind = classify(raw);
    if kind == ReferenceKind::External {
        return ResolvedTarget {
            kind,
            absolute_path: None,
            exists: false,
        };
    }

    let cleaned = clean_reference(raw);
    if cleaned.is_empty() {
        // Same-page reference such as `?tab=2`.
        return ResolvedTarget {
            kind,
            absolute_path: None,
            exists: true,
        };
    }

    let path = target_path(site_root, source_file, cleaned);
    let exists = is_regular_file(&path);
    ResolvedTarget {
        kind,
        absolute_path: Some(path),
        exists,
    }
}

/// True when `path` names an existing regular file (symlinks followed).
#[must_use]
pub fn is_regular_file(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_file())
}

/// Lexically collapses `.` and `..` without touching the filesystem.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut has_root = false;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => {
                has_root = true;
                out.push(Component::RootDir.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                _ if has_root => {}
                _ => out.push(".."),
            },
            Component::Normal(part) => out.push(part),
        }
    }

    out
}
