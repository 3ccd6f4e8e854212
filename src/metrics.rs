//! Per-file metrics: line counts, marker comments, content digest, and the
//! Python-only structural heuristics.
//!
//! SLOC is an approximation (non-blank lines not starting with the tag's
//! single-line comment marker), not a lexical analysis. The complexity score
//! is a keyword-occurrence count, not control-flow-graph cyclomatic
//! complexity; its exact definition is part of the output contract and must
//! not be "improved".

use std::cell::RefCell;
use std::path::Path;
use std::sync::OnceLock;

use chrono::{DateTime, Local};
use regex::Regex;
use sha2::{Digest, Sha256};
use tree_sitter::{Node, Parser};

use crate::language::Lang;

/// Structural stats computed only for Python files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PythonStats {
    /// Count of `def` nodes anywhere in the tree (nested included).
    pub functions: usize,
    /// Count of `class` nodes anywhere in the tree.
    pub classes: usize,
    /// 1 + occurrences of branching keywords, matched textually. Zero when
    /// there is no text.
    pub complexity: usize,
}

/// Metrics for one file.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total line count.
    pub loc: usize,
    /// Significant (non-blank, non-comment) line count.
    pub sloc: usize,
    /// TODO/FIXME/XXX occurrences, case-insensitive.
    pub todos: usize,
    /// SHA-256 of the decoded text, hex. Empty when there is no text.
    pub digest: String,
    /// Last-modified timestamp, `%Y-%m-%d %H:%M:%S`. Empty if unavailable.
    pub modified: String,
    /// Present for every Python file; zero-valued when there is no text.
    pub python: Option<PythonStats>,
}

fn todo_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bTODO\b|FIXME|XXX").expect("static regex"))
}

fn complexity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(if|elif|for|while|and|or|try|except|with|case)\b").expect("static regex")
    })
}

// Thread-local cached parser, re-used across files. Grammar load can fail;
// library code stays panic-free and degrades to zero counts.
thread_local! {
    static PY_PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

fn with_python_parser<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Parser) -> R,
{
    PY_PARSER.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            let mut p = Parser::new();
            p.set_language(&tree_sitter_python::LANGUAGE.into()).ok()?;
            *slot = Some(p);
        }
        slot.as_mut().map(f)
    })
}

/// Compute all metrics for one file's decoded text.
///
/// `path` is used only for the modification timestamp; a failed stat leaves
/// the timestamp empty rather than failing.
pub fn compute(text: &str, lang: Lang, path: &Path) -> Metrics {
    let loc = text.lines().count();
    let sloc = significant_lines(text, lang);
    let todos = if text.is_empty() {
        0
    } else {
        todo_regex().find_iter(text).count()
    };
    let digest = if text.is_empty() {
        String::new()
    } else {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    };
    let modified = modified_timestamp(path);

    let python = if lang == Lang::Python {
        Some(python_stats(text))
    } else {
        None
    };

    Metrics {
        loc,
        sloc,
        todos,
        digest,
        modified,
        python,
    }
}

/// Non-blank lines that do not start (after trimming) with the tag's
/// single-line comment marker.
pub fn significant_lines(text: &str, lang: Lang) -> usize {
    let prefix = lang.comment_prefix();
    text.lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            match prefix {
                Some(p) => !trimmed.starts_with(p),
                None => true,
            }
        })
        .count()
}

fn modified_timestamp(path: &Path) -> String {
    path.metadata()
        .and_then(|m| m.modified())
        .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn python_stats(text: &str) -> PythonStats {
    if text.is_empty() {
        return PythonStats {
            functions: 0,
            classes: 0,
            complexity: 0,
        };
    }
    let (functions, classes) = count_definitions(text).unwrap_or((0, 0));
    let complexity = 1 + complexity_regex().find_iter(text).count();
    PythonStats {
        functions,
        classes,
        complexity,
    }
}

/// Best-effort definition count via tree-sitter. `None` when the parser
/// cannot be initialized or the parse yields nothing; callers read that as
/// zero-valued metrics, not an error.
fn count_definitions(text: &str) -> Option<(usize, usize)> {
    with_python_parser(|parser| {
        let tree = parser.parse(text, None)?;
        let mut functions = 0;
        let mut classes = 0;
        count_in_node(tree.root_node(), &mut functions, &mut classes);
        Some((functions, classes))
    })?
}

fn count_in_node(node: Node, functions: &mut usize, classes: &mut usize) {
    match node.kind() {
        "function_definition" => *functions += 1,
        "class_definition" => *classes += 1,
        _ => {}
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        count_in_node(child, functions, classes);
    }
}
