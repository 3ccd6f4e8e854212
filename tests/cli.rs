use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn run_monodoc(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_monodoc"))
        .args(args)
        .output()
        .unwrap()
}

fn export(root: &Path, out: &Path, extra: &[&str]) -> String {
    let mut args = vec![
        "--root",
        root.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    let output = run_monodoc(&args);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    fs::read_to_string(out).unwrap()
}

#[test]
fn basic_run_generates_output() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    write_file(
        &proj.join("a.py"),
        "\"\"\"doc\"\"\"\nimport os\n\ndef add(a, b):\n    return a + b\n",
    );
    write_file(&proj.join("README.md"), "# Title\n\nSome text.");
    write_file(&proj.join(".hidden"), "secret");

    let out = dir.path().join("out.md");
    let txt = export(&proj, &out, &["--title", "My Export"]);

    assert!(txt.contains("<!-- GENERATED"));
    assert!(txt.contains("# My Export"));
    assert!(txt.contains("## Overview"));
    assert!(txt.contains("## Table of contents"));
    assert!(txt.contains("## Files"));
    // Hidden files are included by default.
    assert!(txt.contains("`.hidden`"));
    assert!(txt.contains("```python"));
    assert!(txt.contains("`a.py`"));
    assert!(txt.contains("def add("));
}

#[test]
fn per_file_entry_reports_python_stats_and_doc_brief() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    write_file(
        &proj.join("a.py"),
        "\"\"\"Adds numbers.\"\"\"\n\ndef add(a, b):\n    return a + b\n",
    );
    write_file(&proj.join("README.md"), "# Project Title\n\nBody.\n");

    let out = dir.path().join("out.md");
    let txt = export(&proj, &out, &[]);

    assert!(txt.contains("funcs=1"));
    assert!(txt.contains("classes=0"));
    assert!(txt.contains("#### Brief\nAdds numbers."));
    // Markdown auto-summary is the heading text.
    assert!(txt.contains("#### Auto Summary\nProject Title"));
}

#[test]
fn empty_python_file_keeps_its_stats_segment() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    write_file(&proj.join("pkg/__init__.py"), "");
    write_file(&proj.join("pkg/mod.py"), "def f():\n    pass\n");

    let out = dir.path().join("out.md");
    let txt = export(&proj, &out, &[]);

    assert!(txt.contains("Py: funcs=0 classes=0 complexity≈0"));
    assert!(txt.contains("Py: funcs=1 classes=0 complexity≈1"));
}

#[test]
fn toc_order_is_case_insensitive() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    write_file(&proj.join("a.py"), "x = 1\n");
    write_file(&proj.join("README.md"), "# T\n");

    let out = dir.path().join("out.md");
    let txt = export(&proj, &out, &[]);

    // Lowercased byte-wise sort: a.py before README.md.
    assert!(txt.contains("- 1. [a.py](#a.py)"));
    assert!(txt.contains("- 2. [README.md](#README.md)"));
}

#[test]
fn exclude_hidden_and_only_ext() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    write_file(&proj.join(".secret.txt"), "x");
    write_file(&proj.join("keep.txt"), "keep");
    write_file(&proj.join("skip.py"), "print('x')");
    write_file(&proj.join("Dockerfile"), "FROM scratch\n");

    let out = dir.path().join("out.md");
    let txt = export(
        &proj,
        &out,
        &["--exclude-hidden", "--only-ext", ".txt"],
    );

    assert!(txt.contains("`keep.txt`"));
    assert!(!txt.contains(".secret.txt"));
    assert!(!txt.contains("skip.py"));
    // Dockerfile passes the whitelist regardless of extension.
    assert!(txt.contains("`Dockerfile`"));
}

#[test]
fn truncation_marker_appears_only_past_the_cap() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    write_file(&proj.join("big.txt"), &"line\n".repeat(100));
    write_file(&proj.join("small.txt"), "ok\n");

    let out = dir.path().join("out.md");
    let txt = export(&proj, &out, &["--max-bytes-per-file", "50"]);

    // Exactly one marker: big.txt's content block and nothing else.
    assert!(txt.contains("# [TRUNCATED due to max-bytes-per-file]"));
    assert_eq!(txt.matches("TRUNCATED").count(), 1);
}

#[test]
fn md_policy_render_demotes_headings() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    write_file(&proj.join("README.md"), "# Top\n\n## Sub\n\nbody\n");

    let out = dir.path().join("out.md");
    let txt = export(&proj, &out, &["--md-policy", "render"]);

    assert!(txt.contains("#### Content (rendered, headings demoted)"));
    assert!(txt.contains("\n#### Top\n"));
    assert!(txt.contains("\n##### Sub\n"));
    assert!(!txt.contains("```markdown"));
}

#[test]
fn md_policy_skip_omits_content() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    write_file(&proj.join("README.md"), "# Top\n\nsecret body\n");

    let out = dir.path().join("out.md");
    let txt = export(&proj, &out, &["--md-policy", "skip"]);

    assert!(txt.contains("_Skipped per --md-policy=skip_"));
    assert!(!txt.contains("secret body"));
}

#[test]
fn import_graph_section_requires_flag_and_edges() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    write_file(&proj.join("a.py"), "import os\nfrom sys import argv\n");

    let out = dir.path().join("out.md");
    let txt = export(&proj, &out, &[]);
    assert!(!txt.contains("Python import graph"));

    let txt = export(&proj, &out, &["--mermaid-import-graph"]);
    assert!(txt.contains("## Python import graph (naive)"));
    assert!(txt.contains("```mermaid"));
    assert!(txt.contains("a.py[\"a.py\"] --> mod-os[\"os\"]"));
}

#[test]
fn binary_files_are_listed_without_content() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    fs::create_dir_all(&proj).unwrap();
    fs::write(proj.join("blob.bin"), b"\x00\x01\x02\x03").unwrap();
    write_file(&proj.join("a.txt"), "text\n");

    let out = dir.path().join("out.md");
    let txt = export(&proj, &out, &[]);

    assert!(txt.contains("`blob.bin`"));
    assert!(txt.contains("Size: 4 bytes"));
}

#[test]
fn no_metrics_reduces_per_file_line_to_size() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    write_file(&proj.join("a.py"), "x = 1\n");

    let out = dir.path().join("out.md");
    let txt = export(&proj, &out, &["--no-metrics"]);

    assert!(txt.contains("- Size: 6 bytes"));
    assert!(!txt.contains("SLOC:"));
    assert!(!txt.contains("Total LOC:"));
}

#[test]
fn repeated_runs_are_identical_modulo_timestamp() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    write_file(&proj.join("a.py"), "import os\nx = 1\n");
    write_file(&proj.join("docs/guide.md"), "# Guide\n");

    let strip_stamp = |s: String| -> String {
        s.lines()
            .filter(|l| !l.starts_with("<!-- GENERATED"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let out1 = dir.path().join("one.md");
    let out2 = dir.path().join("two.md");
    let a = strip_stamp(export(&proj, &out1, &["--mermaid-import-graph"]));
    let b = strip_stamp(export(&proj, &out2, &["--mermaid-import-graph"]));
    assert_eq!(a, b);
}

#[test]
fn missing_root_exits_nonzero_without_output() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    let out = dir.path().join("out.md");

    let output = run_monodoc(&[
        "--root",
        missing.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
    assert!(!out.exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("root not found"));
}

#[test]
fn ignore_patterns_drop_matching_files() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    write_file(&proj.join("keep.py"), "x = 1\n");
    write_file(&proj.join("noise.log"), "log\n");
    write_file(&proj.join("vendor/lib.py"), "y = 2\n");

    let out = dir.path().join("out.md");
    let txt = export(&proj, &out, &["--ignore", "*.log", "--ignore", "vendor/**"]);

    assert!(txt.contains("`keep.py`"));
    assert!(!txt.contains("noise.log"));
    assert!(!txt.contains("vendor/lib.py"));
}
