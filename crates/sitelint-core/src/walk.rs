//! Site tree enumeration.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Errors raised while enumerating the site tree.
///
/// All of them are fatal for the audit.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// The root does not exist.
    #[error("site root {} does not exist", .0.display())]
    NotFound(PathBuf),

    /// The root exists but is not a directory.
    #[error("site root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// A directory below the root could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Entry that failed.
        path: PathBuf,
        /// Underlying walk error.
        #[source]
        source: walkdir::Error,
    },
}

/// Recursively lists every non-hidden file under `root`.
///
/// Entries whose name starts with `.` are skipped together with everything
/// below them. Traversal is depth-first with siblings sorted by file name,
/// so two walks of an unchanged tree return the same sequence. Anything
/// that is not a directory (regular files, symlinks) is returned.
///
/// # Errors
///
/// Returns [`WalkError`] if `root` is missing, is not a directory, or a
/// directory below it cannot be read.
pub fn walk(root: &Path) -> Result<Vec<PathBuf>, WalkError> {
    let meta = std::fs::metadata(root).map_err(|_| WalkError::NotFound(root.to_path_buf()))?;
    if !meta.is_dir() {
        return Err(WalkError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(|source| WalkError::Io {
            path: source
                .path()
                .map_or_else(|| root.to_path_buf(), Path::to_path_buf),
            source,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        files.push(entry.into_path());
    }

    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn lists_nested_files_in_sorted_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b.html");
        touch(tmp.path(), "a/z.css");
        touch(tmp.path(), "a/b/c.png");

        let files = walk(tmp.path()).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a/b/c.png"),
                PathBuf::from("a/z.css"),
                PathBuf::from("b.html"),
            ]
        );
    }

    #[test]
    fn skips_hidden_files_and_directories() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "index.html");
        touch(tmp.path(), ".DS_Store");
        touch(tmp.path(), ".git/config");
        touch(tmp.path(), "css/.cache/x.css");

        let files = walk(tmp.path()).unwrap();
        assert_eq!(files, vec![tmp.path().join("index.html")]);
    }

    #[test]
    fn hidden_root_itself_is_walked() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join(".site");
        touch(&root, "index.html");

        let files = walk(&root).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = walk(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, WalkError::NotFound(_)));
    }

    #[test]
    fn file_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "index.html");
        let err = walk(&tmp.path().join("index.html")).unwrap_err();
        assert!(matches!(err, WalkError::NotADirectory(_)));
    }
}
