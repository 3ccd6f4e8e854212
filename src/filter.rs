//! Path filtering: ignore patterns, hidden-file policy, extension whitelist.
//!
//! Patterns are fnmatch-style globs matched against the `/`-normalized
//! relative path. Evaluation is pure: it depends only on the path text and
//! the compiled configuration.

use std::path::{Component, Path};

use glob::Pattern;

/// Ignore patterns applied on every run, before any user-supplied ones.
pub const DEFAULT_IGNORES: &[&str] = &[
    ".git/**",
    ".hg/**",
    ".svn/**",
    "__pycache__/**",
    ".mypy_cache/**",
    ".pytest_cache/**",
    "node_modules/**",
    "dist/**",
    "build/**",
    ".venv/**",
    "venv/**",
    ".DS_Store",
];

/// Immutable filter configuration built once at the boundary and threaded
/// through the pipeline as a value.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    patterns: Vec<Pattern>,
    exclude_hidden: bool,
    /// Extension whitelist, stored without leading dots. Empty = admit all.
    only_extensions: Vec<String>,
}

impl FilterConfig {
    /// Build a config from user patterns, always unioned with
    /// [`DEFAULT_IGNORES`]. Blank patterns are dropped; patterns that fail to
    /// compile are skipped rather than aborting the run.
    pub fn new<S: AsRef<str>>(
        user_patterns: &[S],
        exclude_hidden: bool,
        only_extensions: &[S],
    ) -> Self {
        let patterns = DEFAULT_IGNORES
            .iter()
            .copied()
            .map(String::from)
            .chain(user_patterns.iter().map(|p| p.as_ref().to_string()))
            .filter_map(|p| {
                let trimmed = p.trim();
                if trimmed.is_empty() {
                    return None;
                }
                Pattern::new(trimmed).ok()
            })
            .collect();

        let only_extensions = only_extensions
            .iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();

        Self {
            patterns,
            exclude_hidden,
            only_extensions,
        }
    }

    /// Default ignores only, hidden files included, no whitelist.
    pub fn with_defaults() -> Self {
        Self::new::<&str>(&[], false, &[])
    }

    /// Whether hidden entries are excluded.
    pub fn excludes_hidden(&self) -> bool {
        self.exclude_hidden
    }

    /// Does any ignore pattern match this relative path?
    pub fn is_ignored(&self, rel: &Path) -> bool {
        let normalized = normalize(rel);
        self.patterns.iter().any(|p| p.matches(&normalized))
    }

    /// Should this directory be pruned before descending into it?
    ///
    /// A directory is pruned when its own path matches an ignore pattern, or
    /// when it is hidden and hidden-exclusion is on. Contents-only patterns
    /// like `.git/**` do not prune the directory itself; their files are
    /// dropped individually.
    pub fn prunes_dir(&self, rel: &Path) -> bool {
        if self.is_ignored(rel) {
            return true;
        }
        self.exclude_hidden
            && rel
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'))
    }

    /// Full admission check for a file at the given relative path.
    pub fn admits_file(&self, rel: &Path) -> bool {
        if self.is_ignored(rel) {
            return false;
        }
        if self.exclude_hidden && is_hidden(rel) {
            return false;
        }
        if !self.only_extensions.is_empty() {
            // Dockerfile is always admitted regardless of the whitelist.
            if rel.file_name().and_then(|n| n.to_str()) == Some("Dockerfile") {
                return true;
            }
            let ext = rel.extension().and_then(|e| e.to_str()).unwrap_or("");
            return self.only_extensions.iter().any(|e| e == ext);
        }
        true
    }
}

/// A path is hidden if any normal segment starts with a dot.
pub fn is_hidden(rel: &Path) -> bool {
    rel.components().any(|c| match c {
        Component::Normal(part) => part.to_str().is_some_and(|s| s.starts_with('.')),
        _ => false,
    })
}

/// Join path components with `/` regardless of platform separator.
pub fn normalize(rel: &Path) -> String {
    let parts: Vec<&str> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();
    parts.join("/")
}
