//! Language-aware brief descriptions and one-line auto-summaries.
//!
//! All heuristics are deterministic text scans: a Python docstring block, a
//! run of leading comment lines, a markdown heading, or simply the first
//! lines of the file. Empty text yields empty output, never an error.

use std::sync::OnceLock;

use regex::Regex;

use crate::language::Lang;

/// Lines kept from a docstring or leading comment run.
const BRIEF_MAX_LINES: usize = 5;
/// Character budget for auto-summaries.
const SUMMARY_MAX_CHARS: usize = 200;

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*#+\s+(.*)").expect("static regex"))
}

fn def_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*def\s+\w+\(").expect("static regex"))
}

fn class_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*class\s+\w+\(").expect("static regex"))
}

/// Extract the content of a module-leading triple-quoted string, if any.
fn python_docstring(text: &str) -> Option<&str> {
    let t = text.trim_start();
    let quote = if t.starts_with(r#"""""#) {
        r#"""""#
    } else if t.starts_with("'''") {
        "'''"
    } else {
        return None;
    };
    let body = &t[3..];
    body.find(quote).map(|end| &body[..end])
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Multi-line brief description for one file.
///
/// Order: Python docstring block (capped at [`BRIEF_MAX_LINES`]), then a
/// contiguous run of leading single-line comments (interior blanks kept),
/// then the first two lines verbatim.
pub fn brief_description(text: &str, lang: Lang) -> String {
    if lang == Lang::Python {
        if let Some(doc) = python_docstring(text) {
            return doc
                .trim()
                .lines()
                .take(BRIEF_MAX_LINES)
                .collect::<Vec<_>>()
                .join("\n");
        }
    }

    if let Some(prefix) = lang.comment_prefix() {
        let mut collected: Vec<String> = Vec::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with(prefix) {
                collected.push(trimmed[prefix.len()..].trim_start().to_string());
                if collected.len() >= BRIEF_MAX_LINES {
                    break;
                }
            } else if trimmed.is_empty() {
                // Blank lines inside the run are preserved; leading blanks
                // before any comment are not.
                if !collected.is_empty() {
                    collected.push(String::new());
                }
            } else {
                break;
            }
        }
        let joined = collected.join("\n");
        let out = joined.trim();
        if !out.is_empty() {
            return out.to_string();
        }
    }

    text.lines().take(2).collect::<Vec<_>>().join("\n").trim().to_string()
}

/// Deterministic one-line summary, capped at [`SUMMARY_MAX_CHARS`] chars.
///
/// Markdown: first heading text. Python: first docstring line, else a
/// synthesized sentence from textual def/class counts. Anything else: first
/// non-blank line.
pub fn auto_summary(text: &str, lang: Lang) -> String {
    if text.is_empty() {
        return String::new();
    }

    if lang == Lang::Markdown {
        for line in text.lines() {
            if let Some(caps) = heading_regex().captures(line) {
                if let Some(m) = caps.get(1) {
                    return truncate_chars(m.as_str().trim(), SUMMARY_MAX_CHARS);
                }
            }
        }
    }

    if lang == Lang::Python {
        if let Some(doc) = python_docstring(text) {
            if let Some(first) = doc.trim().lines().next() {
                return truncate_chars(first, SUMMARY_MAX_CHARS);
            }
        }
        let funcs = def_regex().find_iter(text).count();
        let classes = class_regex().find_iter(text).count();
        return truncate_chars(
            &format!("Python module with {funcs} functions and {classes} classes."),
            SUMMARY_MAX_CHARS,
        );
    }

    for line in text.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return truncate_chars(trimmed, SUMMARY_MAX_CHARS);
        }
    }
    String::new()
}
