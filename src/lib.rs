//! Monodoc - dump a project tree into one Markdown document.
//!
//! Monodoc walks a directory, classifies and measures every included file,
//! and assembles a single deterministically ordered Markdown document
//! (overview, metrics, tree, table of contents, per-file content) suitable
//! for external review or as language-model context.
//!
//! # Quick Start
//!
//! ```no_run
//! use monodoc::builder::Exporter;
//!
//! let markdown = Exporter::new("./my-project")
//!     .exclude_hidden(true)
//!     .title("My Export")
//!     .export()
//!     .unwrap();
//!
//! std::fs::write("export.md", markdown).unwrap();
//! ```
//!
//! # Modules
//!
//! - [`filter`] - Glob ignore patterns, hidden-file policy, extension whitelist
//! - [`walker`] - Single-pass directory traversal with directory pruning
//! - [`loader`] - Capped reads with binary detection
//! - [`language`] - Content-type classification
//! - [`metrics`] - Line counts, marker comments, digests, Python heuristics
//! - [`summary`] - Brief descriptions and one-line auto-summaries
//! - [`deps`] - Best-effort manifest sniffing
//! - [`imports`] - Textual Python import graph
//! - [`tree`] - Included-subset project tree
//! - [`document`] - Section-by-section document assembly
//! - [`builder`] - Fluent API for the whole pipeline

pub mod builder;
pub mod deps;
pub mod document;
pub mod errors;
pub mod filter;
pub mod imports;
pub mod language;
pub mod loader;
pub mod metrics;
pub mod summary;
pub mod tree;
pub mod walker;

// Re-export key types at crate root for convenience
pub use builder::{Export, Exporter, FileRecord, DEFAULT_MAX_BYTES};
pub use deps::ManifestEntry;
pub use document::{DocumentOptions, MarkdownPolicy, HEADING_DEMOTION};
pub use errors::MonodocError;
pub use filter::FilterConfig;
pub use imports::ImportGraph;
pub use language::Lang;
pub use metrics::{Metrics, PythonStats};
pub use walker::WalkError;
