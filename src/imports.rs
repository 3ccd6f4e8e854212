//! Textual Python import extraction for the optional import-graph section.
//!
//! A best-effort line scan for the two plain import forms; it does not
//! resolve conditional imports, aliasing, or re-exports. Only the top-level
//! module (first dotted segment) is kept.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;

/// File path (relative, `/`-normalized) to the set of modules it references.
pub type ImportGraph = BTreeMap<String, BTreeSet<String>>;

fn from_import_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^from\s+([A-Za-z0-9_\.]+)\s+import\s+").expect("static regex"))
}

fn import_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^import\s+([A-Za-z0-9_\.]+)").expect("static regex"))
}

fn top_level(module: &str) -> &str {
    module.split('.').next().unwrap_or(module)
}

/// Collect the top-level modules referenced by one Python source file.
pub fn python_imports(text: &str) -> BTreeSet<String> {
    let mut modules = BTreeSet::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(caps) = from_import_regex().captures(line) {
            modules.insert(top_level(&caps[1]).to_string());
            continue;
        }
        if let Some(caps) = import_regex().captures(line) {
            // `import a, b` contributes only the first clause.
            modules.insert(top_level(&caps[1]).to_string());
        }
    }
    modules
}
