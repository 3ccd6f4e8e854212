//! Best-effort dependency sniffing from well-known manifest files.
//!
//! Purely textual: nothing is resolved or fetched. A manifest that is
//! missing, unreadable, or malformed simply contributes no entry.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// Cap on entries taken from the naive pyproject key=value scan.
const PYPROJECT_PREVIEW_CAP: usize = 50;

/// One sniffed manifest: a source label and its declared packages, in the
/// order they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub source: String,
    pub packages: Vec<String>,
}

fn keyvalue_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^\s*([A-Za-z0-9_.-]+)\s*=\s*["']?([^"']+)["']?"#).expect("static regex")
    })
}

/// Sniff all known manifests under `root`. Absent manifests produce no
/// entry; per-manifest parse failures are swallowed.
pub fn sniff_dependencies(root: &Path) -> Vec<ManifestEntry> {
    let mut entries = Vec::new();

    if let Some(packages) = sniff_requirements(&root.join("requirements.txt")) {
        entries.push(ManifestEntry {
            source: "python_requirements".to_string(),
            packages,
        });
    }

    if let Some(packages) = sniff_pyproject(&root.join("pyproject.toml")) {
        entries.push(ManifestEntry {
            source: "pyproject_toml_preview".to_string(),
            packages,
        });
    }

    for (section, packages) in sniff_package_json(&root.join("package.json")) {
        entries.push(ManifestEntry {
            source: format!("npm_{section}"),
            packages,
        });
    }

    entries
}

/// Line-based package list: blanks and `#` comments dropped.
fn sniff_requirements(path: &Path) -> Option<Vec<String>> {
    let text = std::fs::read_to_string(path).ok()?;
    let packages: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect();
    if packages.is_empty() {
        None
    } else {
        Some(packages)
    }
}

/// Naive key=value scan, capped. Not a TOML parse on purpose: this is a
/// preview, and the cap keeps pathological files bounded.
fn sniff_pyproject(path: &Path) -> Option<Vec<String>> {
    let text = std::fs::read_to_string(path).ok()?;
    let packages: Vec<String> = keyvalue_regex()
        .captures_iter(&text)
        .take(PYPROJECT_PREVIEW_CAP)
        .map(|caps| format!("{}={}", &caps[1], &caps[2]))
        .collect();
    if packages.is_empty() {
        None
    } else {
        Some(packages)
    }
}

/// Structured scan of package.json dependency sections.
fn sniff_package_json(path: &Path) -> Vec<(&'static str, Vec<String>)> {
    let Ok(text) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) else {
        return Vec::new();
    };

    let mut sections = Vec::new();
    for section in ["dependencies", "devDependencies", "peerDependencies"] {
        let Some(map) = value.get(section).and_then(|v| v.as_object()) else {
            continue;
        };
        let packages: Vec<String> = map
            .iter()
            .map(|(name, version)| {
                format!("{name}@{}", version.as_str().unwrap_or_default())
            })
            .collect();
        if !packages.is_empty() {
            sections.push((section, packages));
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn no_manifests_means_no_entries() {
        let dir = TempDir::new().unwrap();
        assert!(sniff_dependencies(dir.path()).is_empty());
    }

    #[test]
    fn requirements_skips_blanks_and_comments() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("requirements.txt"),
            "# pinned\nrequests==2.31\n\nflask>=2\n",
        )
        .unwrap();

        let entries = sniff_dependencies(dir.path());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source, "python_requirements");
        assert_eq!(entries[0].packages, vec!["requests==2.31", "flask>=2"]);
    }

    #[test]
    fn pyproject_preview_is_capped() {
        let dir = TempDir::new().unwrap();
        let mut body = String::from("[tool.poetry.dependencies]\n");
        for i in 0..60 {
            body.push_str(&format!("pkg{i} = \"1.0\"\n"));
        }
        fs::write(dir.path().join("pyproject.toml"), body).unwrap();

        let entries = sniff_dependencies(dir.path());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source, "pyproject_toml_preview");
        assert_eq!(entries[0].packages.len(), 50);
        assert_eq!(entries[0].packages[0], "pkg0=1.0");
    }

    #[test]
    fn package_json_sections_become_entries() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"react": "^18.0"}, "devDependencies": {"vitest": "1.0"}}"#,
        )
        .unwrap();

        let entries = sniff_dependencies(dir.path());
        let sources: Vec<&str> = entries.iter().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec!["npm_dependencies", "npm_devDependencies"]);
        assert_eq!(entries[0].packages, vec!["react@^18.0"]);
    }

    #[test]
    fn corrupt_package_json_is_swallowed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{not json").unwrap();
        assert!(sniff_dependencies(dir.path()).is_empty());
    }
}
