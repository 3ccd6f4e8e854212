//! Directory traversal for the export pipeline.
//!
//! Uses the `ignore` crate's walker with its standard filters disabled:
//! inclusion and exclusion are decided entirely by [`FilterConfig`], so runs
//! behave identically inside and outside a git checkout. Hidden directories
//! are pruned before descent when hidden-exclusion is on; their contents are
//! never visited.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use thiserror::Error;

use crate::filter::FilterConfig;

/// Errors that can occur before or during directory walking.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("root not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Collect all files under `root` admitted by the filter, as paths relative
/// to `root`. Traversal order is unspecified; callers sort.
///
/// Unreadable subtrees are skipped rather than failing the run; only a bad
/// root is fatal.
pub fn collect_files(root: &Path, filter: &FilterConfig) -> Result<Vec<PathBuf>, WalkError> {
    if !root.exists() {
        return Err(WalkError::NotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(WalkError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(std::ffi::OsStr::cmp);

    let prune_root = root.to_path_buf();
    let prune_filter = filter.clone();
    builder.filter_entry(move |entry| {
        let Ok(rel) = entry.path().strip_prefix(&prune_root) else {
            return true;
        };
        if rel.as_os_str().is_empty() {
            return true; // the root itself
        }
        if entry.file_type().is_some_and(|ft| ft.is_dir()) {
            return !prune_filter.prunes_dir(rel);
        }
        true
    });

    let mut files = Vec::new();
    for entry in builder.build().filter_map(|r| r.ok()) {
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        if filter.admits_file(rel) {
            files.push(rel.to_path_buf());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.py"), "print('hi')\n").unwrap();
        fs::write(dir.path().join("README.md"), "# Readme\n").unwrap();
        fs::write(dir.path().join(".env"), "KEY=1\n").unwrap();
        dir
    }

    #[test]
    fn collects_admitted_files() {
        let dir = create_test_dir();
        let files = collect_files(dir.path(), &FilterConfig::with_defaults()).unwrap();

        assert!(files.iter().any(|p| p.ends_with("src/main.py")));
        assert!(files.iter().any(|p| p.ends_with("README.md")));
        // Hidden files are included by default.
        assert!(files.iter().any(|p| p.ends_with(".env")));
    }

    #[test]
    fn nonexistent_root_fails() {
        let result = collect_files(Path::new("/nonexistent/path"), &FilterConfig::with_defaults());
        assert!(matches!(result, Err(WalkError::NotFound { .. })));
    }

    #[test]
    fn file_root_fails() {
        let dir = create_test_dir();
        let result = collect_files(&dir.path().join("README.md"), &FilterConfig::with_defaults());
        assert!(matches!(result, Err(WalkError::NotADirectory { .. })));
    }

    #[test]
    fn default_ignores_drop_git_contents() {
        let dir = create_test_dir();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git/config"), "[core]\n").unwrap();

        let files = collect_files(dir.path(), &FilterConfig::with_defaults()).unwrap();
        assert!(!files.iter().any(|p| p.starts_with(".git")));
    }

    #[test]
    fn hidden_dirs_are_pruned_when_excluded() {
        let dir = create_test_dir();
        fs::create_dir_all(dir.path().join(".secrets")).unwrap();
        // A non-hidden file inside a hidden dir must also be absent.
        fs::write(dir.path().join(".secrets/plain.txt"), "x\n").unwrap();

        let filter = FilterConfig::new::<&str>(&[], true, &[]);
        let files = collect_files(dir.path(), &filter).unwrap();

        assert!(!files.iter().any(|p| p.starts_with(".secrets")));
        assert!(!files.iter().any(|p| p.ends_with(".env")));
        assert!(files.iter().any(|p| p.ends_with("README.md")));
    }

    #[test]
    fn user_ignore_patterns_apply() {
        let dir = create_test_dir();
        fs::write(dir.path().join("debug.log"), "log\n").unwrap();

        let filter = FilterConfig::new(&["*.log"], false, &[]);
        let files = collect_files(dir.path(), &filter).unwrap();
        assert!(!files.iter().any(|p| p.ends_with("debug.log")));
    }
}
