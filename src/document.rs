//! Markdown document assembly.
//!
//! Renders the collected records into the fixed section order: generation
//! marker, title, overview, language mix, dependencies, largest/longest
//! listings, project tree, table of contents, optional import graph, then
//! one anchored entry per file. Assembly performs no recovery of its own;
//! upstream components have already degraded failures into empty values.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::builder::{Export, FileRecord};
use crate::language::Lang;
use crate::tree::render_tree;

/// Heading levels added when rendering embedded markdown.
pub const HEADING_DEMOTION: usize = 3;

/// Cap on packages listed per manifest entry.
const DEPS_LIST_CAP: usize = 50;

/// How embedded markdown files are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkdownPolicy {
    /// Fence the source verbatim as a code block.
    #[default]
    Fence,
    /// Inline the markdown with headings demoted by [`HEADING_DEMOTION`].
    Render,
    /// Omit the content entirely.
    Skip,
}

/// Options controlling document assembly.
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Top-level title; defaults to `Project Export: <root name>`.
    pub title: Option<String>,
    pub md_policy: MarkdownPolicy,
    /// N for the largest/longest listings.
    pub top_n: usize,
    /// Per-file metrics line and overview totals line.
    pub with_metrics: bool,
    /// Auto-summary blocks.
    pub with_summaries: bool,
    /// Emit the mermaid import-graph section.
    pub import_graph: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            title: None,
            md_policy: MarkdownPolicy::Fence,
            top_n: 12,
            with_metrics: true,
            with_summaries: true,
            import_graph: false,
        }
    }
}

fn heading_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)(#+)\s*(.*)$").expect("static regex"))
}

fn slug_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9/_\-.]+").expect("static regex"))
}

/// Deterministic anchor for a relative path: runs of disallowed characters
/// collapse to `-`, then separators become `-`. Pure function of the path.
pub fn slugify(path: &str) -> String {
    let s = slug_regex().replace_all(path, "-");
    let s = s.trim_matches('-').replace('/', "-");
    if s.is_empty() {
        "file".to_string()
    } else {
        s
    }
}

/// One anchor per path, in order. Paths whose slugs collide (e.g. `a b.md`
/// and `a-b.md`) get a numeric suffix, so anchors are unique per document
/// while staying a pure function of the path set.
fn unique_anchors(paths: &[String]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let base = slugify(path);
            let mut anchor = base.clone();
            let mut n = 1;
            while !taken.insert(anchor.clone()) {
                n += 1;
                anchor = format!("{base}-{n}");
            }
            anchor
        })
        .collect()
}

/// Re-emit every heading with its level increased by `levels`; non-heading
/// lines pass through verbatim.
pub fn demote_headings(text: &str, levels: usize) -> String {
    if levels == 0 {
        return text.to_string();
    }
    let out: Vec<String> = text
        .lines()
        .map(|line| match heading_line_regex().captures(line) {
            Some(caps) => {
                let hashes = "#".repeat(caps[2].len() + levels);
                format!("{}{} {}", &caps[1], hashes, &caps[3])
            }
            None => line.to_string(),
        })
        .collect();
    out.join("\n")
}

/// Assemble the full document. `generated_at` is the only non-deterministic
/// input; everything else is a pure function of the export.
pub fn assemble(export: &Export, options: &DocumentOptions, generated_at: &str) -> String {
    let records = &export.records;
    let mut lines: Vec<String> = Vec::with_capacity(records.len() * 16 + 64);

    let root_name = export
        .root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| export.root.to_string_lossy().into_owned());
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| format!("Project Export: {root_name}"));

    let rel_paths: Vec<String> = records.iter().map(|r| r.path_str()).collect();
    let anchors = unique_anchors(&rel_paths);

    lines.push(format!("<!-- GENERATED at {generated_at} -->"));
    lines.push(format!("# {title}\n"));

    push_overview(&mut lines, export, options);
    push_language_mix(&mut lines, records);
    push_dependencies(&mut lines, export);
    push_top_lists(&mut lines, records, options.top_n);

    lines.push("### Project tree (included subset)".to_string());
    lines.push(render_tree(&root_name, &rel_paths));
    lines.push(String::new());

    push_toc(&mut lines, records, &anchors);
    if options.import_graph {
        push_import_graph(&mut lines, export);
    }

    lines.push("---\n".to_string());
    lines.push("## Files\n".to_string());
    for (i, record) in records.iter().enumerate() {
        push_file_entry(&mut lines, record, &anchors[i], i + 1, options);
    }

    lines.join("\n")
}

fn push_overview(lines: &mut Vec<String>, export: &Export, options: &DocumentOptions) {
    let records = &export.records;
    let total_bytes: u64 = records.iter().map(|r| r.nbytes).sum();

    lines.push("## Overview\n".to_string());
    lines.push(format!("- Root: `{}`", export.root.display()));
    lines.push(format!("- Files: **{}**", records.len()));
    lines.push(format!("- Total size: **{total_bytes} bytes**"));
    if options.with_metrics {
        let loc: usize = records.iter().map(|r| r.metrics.loc).sum();
        let sloc: usize = records.iter().map(|r| r.metrics.sloc).sum();
        let todos: usize = records.iter().map(|r| r.metrics.todos).sum();
        lines.push(format!("- Total LOC: {loc} | SLOC: {sloc} | TODOs: {todos}"));
    }
    lines.push(String::new());
}

fn push_language_mix(lines: &mut Vec<String>, records: &[FileRecord]) {
    if records.is_empty() {
        return;
    }
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in records {
        let label = record.lang.label();
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }
    // Most common first; ties resolve alphabetically for determinism.
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    lines.push("### Language mix".to_string());
    for (label, count) in counts {
        lines.push(format!("- {label}: {count}"));
    }
    lines.push(String::new());
}

fn push_dependencies(lines: &mut Vec<String>, export: &Export) {
    if export.dependencies.is_empty() {
        return;
    }
    lines.push("### Detected dependencies (best-effort)".to_string());
    for entry in &export.dependencies {
        lines.push(format!("- **{}** ({}):", entry.source, entry.packages.len()));
        for package in entry.packages.iter().take(DEPS_LIST_CAP) {
            lines.push(format!("  - {package}"));
        }
        if entry.packages.len() > DEPS_LIST_CAP {
            lines.push("  - ...".to_string());
        }
    }
    lines.push(String::new());
}

fn push_top_lists(lines: &mut Vec<String>, records: &[FileRecord], top_n: usize) {
    let mut largest: Vec<&FileRecord> = records.iter().collect();
    largest.sort_by(|a, b| b.nbytes.cmp(&a.nbytes));
    largest.truncate(top_n);

    let mut longest: Vec<&FileRecord> = records.iter().collect();
    longest.sort_by(|a, b| b.metrics.loc.cmp(&a.metrics.loc));
    longest.truncate(top_n);

    if !largest.is_empty() {
        lines.push(format!("### Top {} largest files (bytes)", largest.len()));
        for record in &largest {
            lines.push(format!("- `{}` — {} bytes", record.path_str(), record.nbytes));
        }
        lines.push(String::new());
    }
    if !longest.is_empty() {
        lines.push(format!("### Top {} longest files (LOC)", longest.len()));
        for record in &longest {
            lines.push(format!("- `{}` — {} LOC", record.path_str(), record.metrics.loc));
        }
        lines.push(String::new());
    }
}

fn push_toc(lines: &mut Vec<String>, records: &[FileRecord], anchors: &[String]) {
    lines.push("## Table of contents (files)\n".to_string());
    for (idx, record) in records.iter().enumerate() {
        let path = record.path_str();
        lines.push(format!("- {}. [{path}](#{})", idx + 1, anchors[idx]));
    }
    lines.push(String::new());
}

fn push_import_graph(lines: &mut Vec<String>, export: &Export) {
    if export.import_graph.is_empty() {
        return;
    }
    lines.push("## Python import graph (naive)\n".to_string());
    lines.push("```mermaid".to_string());
    lines.push("graph LR".to_string());
    for (path, modules) in &export.import_graph {
        let file_node = slugify(path);
        for module in modules {
            let mod_node = slugify(&format!("mod-{module}"));
            lines.push(format!("  {file_node}[\"{path}\"] --> {mod_node}[\"{module}\"]"));
        }
    }
    lines.push("```".to_string());
    lines.push(String::new());
}

fn push_file_entry(
    lines: &mut Vec<String>,
    record: &FileRecord,
    anchor: &str,
    index: usize,
    options: &DocumentOptions,
) {
    let path = record.path_str();

    lines.push(format!("<a id=\"{anchor}\"></a>"));
    lines.push(format!("### {index}. `{path}`"));

    if options.with_metrics {
        let m = &record.metrics;
        let digest: String = m.digest.chars().take(12).collect();
        let mut meta = vec![
            format!("Size: {} bytes", record.nbytes),
            format!("LOC: {}", m.loc),
            format!("SLOC: {}", m.sloc),
            format!("TODOs: {}", m.todos),
            format!("Modified: {}", m.modified),
            format!("SHA256: {digest}"),
        ];
        if let Some(py) = &m.python {
            meta.push(format!(
                "Py: funcs={} classes={} complexity≈{}",
                py.functions, py.classes, py.complexity
            ));
        }
        lines.push(format!("- {}", meta.join(" | ")));
    } else {
        lines.push(format!("- Size: {} bytes", record.nbytes));
    }

    if !record.text.is_empty() {
        let brief = crate::summary::brief_description(&record.text, record.lang);
        if !brief.is_empty() {
            lines.push("\n#### Brief".to_string());
            lines.push(brief);
        }
        if options.with_summaries {
            let summary = crate::summary::auto_summary(&record.text, record.lang);
            if !summary.is_empty() {
                lines.push("\n#### Auto Summary".to_string());
                lines.push(summary);
            }
        }
        lines.push(String::new());
    }

    if record.lang == Lang::Markdown {
        match options.md_policy {
            MarkdownPolicy::Skip => {
                lines.push("_Skipped per --md-policy=skip_".to_string());
                lines.push(String::new());
                return;
            }
            MarkdownPolicy::Fence => {
                lines.push("#### Content (verbatim)\n".to_string());
                lines.push("```markdown".to_string());
                lines.push(record.text.trim_end().to_string());
                if record.truncated {
                    lines.push("\n<!-- [TRUNCATED due to max-bytes-per-file] -->".to_string());
                }
                lines.push("```".to_string());
                lines.push(String::new());
                return;
            }
            MarkdownPolicy::Render => {
                lines.push("#### Content (rendered, headings demoted)\n".to_string());
                let demoted = demote_headings(&record.text, HEADING_DEMOTION);
                lines.push(demoted.trim_end().to_string());
                if record.truncated {
                    lines.push("\n<!-- [TRUNCATED due to max-bytes-per-file] -->".to_string());
                }
                lines.push(String::new());
                return;
            }
        }
    }

    lines.push("#### Content\n".to_string());
    let fence = record.lang.fence_label();
    lines.push(format!("```{fence}").trim_end().to_string());
    if !record.text.is_empty() {
        lines.push(record.text.trim_end().to_string());
    }
    if record.truncated {
        lines.push("\n# [TRUNCATED due to max-bytes-per-file]".to_string());
    }
    lines.push("```".to_string());
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_normalizes_punctuation() {
        assert_eq!(slugify("src/main.py"), "src-main.py");
        assert_eq!(slugify("a b/c!.md"), "a-b-c-.md");
        assert_eq!(slugify("!!!"), "file");
    }

    #[test]
    fn slugify_is_pure_and_stable() {
        assert_eq!(slugify("x/y.py"), slugify("x/y.py"));
    }

    #[test]
    fn colliding_slugs_get_numeric_suffixes() {
        let paths = vec!["a b.md".to_string(), "a-b.md".to_string()];
        assert_eq!(unique_anchors(&paths), vec!["a-b.md", "a-b.md-2"]);
    }

    #[test]
    fn distinct_slugs_pass_through_unsuffixed() {
        let paths = vec!["src/main.py".to_string(), "README.md".to_string()];
        assert_eq!(unique_anchors(&paths), vec!["src-main.py", "README.md"]);
    }

    #[test]
    fn demote_adds_exact_offset() {
        let src = "# One\ntext\n  ## Two\n";
        let out = demote_headings(src, 3);
        assert_eq!(out, "#### One\ntext\n  ##### Two");
    }

    #[test]
    fn demote_zero_is_identity() {
        assert_eq!(demote_headings("# H\nbody", 0), "# H\nbody");
    }
}
