//! Fluent pipeline API: scan a root directory into immutable records, then
//! render the document.
//!
//! The whole run is strictly sequential, file by file. Records carry no
//! shared state and are sorted case-insensitively by relative path before
//! any aggregate is computed, so output is deterministic regardless of
//! traversal order.

use std::path::{Path, PathBuf};

use crate::deps::{sniff_dependencies, ManifestEntry};
use crate::document::{assemble, DocumentOptions, MarkdownPolicy};
use crate::errors::MonodocError;
use crate::filter::{normalize, FilterConfig};
use crate::imports::{python_imports, ImportGraph};
use crate::language::Lang;
use crate::loader::read_text_capped;
use crate::metrics::{compute, Metrics};
use crate::walker::{collect_files, WalkError};

/// Default per-file byte cap.
pub const DEFAULT_MAX_BYTES: usize = 300_000;

/// One included file: created once during the traversal pass, immutable
/// thereafter.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Path relative to the scanned root.
    pub path: PathBuf,
    pub lang: Lang,
    /// Decoded text; empty for binary or unreadable files.
    pub text: String,
    pub truncated: bool,
    /// Original on-disk size, before any truncation.
    pub nbytes: u64,
    pub metrics: Metrics,
}

impl FileRecord {
    /// The `/`-normalized relative path used everywhere in the document.
    pub fn path_str(&self) -> String {
        normalize(&self.path)
    }
}

/// Result of a scan: everything the assembler needs, already sorted.
#[derive(Debug)]
pub struct Export {
    /// Resolved root directory.
    pub root: PathBuf,
    /// Records in ascending case-insensitive path order.
    pub records: Vec<FileRecord>,
    pub dependencies: Vec<ManifestEntry>,
    pub import_graph: ImportGraph,
}

impl Export {
    /// Render the document with a generation stamp of now.
    pub fn to_markdown(&self, options: &DocumentOptions) -> String {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        assemble(self, options, &now)
    }
}

/// Builder for a project export.
///
/// # Examples
///
/// ```no_run
/// use monodoc::builder::Exporter;
///
/// let markdown = Exporter::new("./my-project")
///     .exclude_hidden(true)
///     .ignore("*.log")
///     .export()
///     .unwrap();
/// ```
pub struct Exporter {
    root: PathBuf,
    ignore_patterns: Vec<String>,
    exclude_hidden: bool,
    max_bytes: usize,
    only_extensions: Vec<String>,
    options: DocumentOptions,
}

impl Exporter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore_patterns: Vec::new(),
            exclude_hidden: false,
            max_bytes: DEFAULT_MAX_BYTES,
            only_extensions: Vec::new(),
            options: DocumentOptions::default(),
        }
    }

    /// Add one ignore pattern (unioned with the built-in defaults).
    pub fn ignore(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_patterns.push(pattern.into());
        self
    }

    /// Add several ignore patterns.
    pub fn ignores<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Drop hidden files and prune hidden directories.
    pub fn exclude_hidden(mut self, exclude: bool) -> Self {
        self.exclude_hidden = exclude;
        self
    }

    /// Per-file byte cap; larger files are truncated and marked.
    pub fn max_bytes_per_file(mut self, max: usize) -> Self {
        self.max_bytes = max;
        self
    }

    /// Restrict to these extensions (plus any file named `Dockerfile`).
    pub fn only_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only_extensions.extend(extensions.into_iter().map(Into::into));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.options.title = Some(title.into());
        self
    }

    pub fn md_policy(mut self, policy: MarkdownPolicy) -> Self {
        self.options.md_policy = policy;
        self
    }

    pub fn top_n(mut self, n: usize) -> Self {
        self.options.top_n = n;
        self
    }

    pub fn with_metrics(mut self, on: bool) -> Self {
        self.options.with_metrics = on;
        self
    }

    pub fn with_summaries(mut self, on: bool) -> Self {
        self.options.with_summaries = on;
        self
    }

    pub fn import_graph(mut self, on: bool) -> Self {
        self.options.import_graph = on;
        self
    }

    /// Run the traversal and per-file analysis.
    pub fn scan(&self) -> Result<Export, MonodocError> {
        let root = self
            .root
            .canonicalize()
            .map_err(|_| MonodocError::RootNotFound(self.root.clone()))?;

        let filter = FilterConfig::new(
            &self.ignore_patterns,
            self.exclude_hidden,
            &self.only_extensions,
        );

        let paths = collect_files(&root, &filter).map_err(|e| match e {
            WalkError::NotFound { path } => MonodocError::RootNotFound(path),
            WalkError::NotADirectory { path } => MonodocError::NotADirectory(path),
            other => MonodocError::Walk(other),
        })?;

        let mut records: Vec<FileRecord> = paths
            .into_iter()
            .map(|rel| analyze_file(&root, rel, self.max_bytes))
            .collect();

        // Case-insensitive path order, raw path as tie-break. This ordering
        // is the contract for the TOC, tree, and per-file sections.
        records.sort_by(|a, b| {
            let (a, b) = (a.path_str(), b.path_str());
            a.to_lowercase().cmp(&b.to_lowercase()).then(a.cmp(&b))
        });

        let dependencies = sniff_dependencies(&root);

        let mut import_graph = ImportGraph::new();
        for record in &records {
            if record.lang != Lang::Python || record.text.is_empty() {
                continue;
            }
            let modules = python_imports(&record.text);
            if !modules.is_empty() {
                import_graph.insert(record.path_str(), modules);
            }
        }

        Ok(Export {
            root,
            records,
            dependencies,
            import_graph,
        })
    }

    /// Scan and render in one step.
    pub fn export(&self) -> Result<String, MonodocError> {
        Ok(self.scan()?.to_markdown(&self.options))
    }

    /// Document options as currently configured.
    pub fn document_options(&self) -> &DocumentOptions {
        &self.options
    }
}

fn analyze_file(root: &Path, rel: PathBuf, max_bytes: usize) -> FileRecord {
    let abs = root.join(&rel);
    let lang = Lang::from_path(&rel);
    let loaded = read_text_capped(&abs, max_bytes);
    let metrics = compute(&loaded.text, lang, &abs);
    FileRecord {
        path: rel,
        lang,
        text: loaded.text,
        truncated: loaded.truncated,
        nbytes: loaded.nbytes,
        metrics,
    }
}
