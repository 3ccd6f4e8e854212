//! Indentation tree over the included subset of files.
//!
//! Covers only directories that contain at least one included file, plus the
//! files themselves. Pure: built from relative path text, no filesystem
//! access, so rendering is reproducible for a given record list.

use std::collections::BTreeSet;

const DIR_BRANCH: &str = "├─ ";
const FILE_BRANCH: &str = "└─ ";

fn split(path: &str) -> Vec<String> {
    path.split('/').map(String::from).collect()
}

/// Render the fenced project tree for `/`-normalized relative file paths.
pub fn render_tree(root_name: &str, files: &[String]) -> String {
    // Every ancestor directory of an included file appears once.
    let mut dirs: BTreeSet<Vec<String>> = BTreeSet::new();
    for file in files {
        let parts = split(file);
        for depth in 1..parts.len() {
            dirs.insert(parts[..depth].to_vec());
        }
    }

    let mut file_parts: Vec<Vec<String>> = files.iter().map(|f| split(f)).collect();
    file_parts.sort();

    let mut lines = vec![format!("{root_name}/")];
    for parts in dirs.iter() {
        push_entry(&mut lines, parts, true);
    }
    for parts in &file_parts {
        push_entry(&mut lines, parts, false);
    }

    format!("```\n{}\n```", lines.join("\n"))
}

fn push_entry(lines: &mut Vec<String>, parts: &[String], is_dir: bool) {
    let indent = "  ".repeat(parts.len().saturating_sub(1));
    let branch = if is_dir { DIR_BRANCH } else { FILE_BRANCH };
    let name = parts.last().map(String::as_str).unwrap_or_default();
    let suffix = if is_dir { "/" } else { "" };
    lines.push(format!("{indent}{branch}{name}{suffix}"));
}
