//! Content-type classification.
//!
//! Maps a path to a closed [`Lang`] tag via a static extension table, with a
//! special case for the bare filename `Dockerfile`. The tag drives fence
//! labels, comment-prefix lookup for SLOC, and summarizer heuristics. Unknown
//! extensions degrade to [`Lang::Plain`]; classification never fails.

use std::path::Path;

/// Content-type tag for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    Python,
    Javascript,
    Jsx,
    Typescript,
    Tsx,
    Json,
    Yaml,
    Toml,
    Ini,
    Bash,
    Powershell,
    Ruby,
    Go,
    Rust,
    Java,
    Kotlin,
    Swift,
    Php,
    C,
    Cpp,
    ObjectiveC,
    CSharp,
    Sql,
    Markdown,
    Html,
    Css,
    Scss,
    Less,
    Vue,
    Svelte,
    Xml,
    Groovy,
    Dockerfile,
    #[default]
    Plain,
}

impl Lang {
    /// Classify a path. `Dockerfile` by name wins over extension lookup.
    /// The table is case-sensitive: `A.PY` stays plain.
    pub fn from_path(path: &Path) -> Self {
        if path.file_name().and_then(|n| n.to_str()) == Some("Dockerfile") {
            return Lang::Dockerfile;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("py") => Lang::Python,
            Some("ipynb") | Some("json") => Lang::Json,
            Some("js") => Lang::Javascript,
            Some("jsx") => Lang::Jsx,
            Some("ts") => Lang::Typescript,
            Some("tsx") => Lang::Tsx,
            Some("yml") | Some("yaml") => Lang::Yaml,
            Some("toml") => Lang::Toml,
            Some("ini") | Some("cfg") => Lang::Ini,
            Some("sh") | Some("zsh") | Some("bash") => Lang::Bash,
            Some("ps1") => Lang::Powershell,
            Some("rb") => Lang::Ruby,
            Some("go") => Lang::Go,
            Some("rs") => Lang::Rust,
            Some("java") => Lang::Java,
            Some("kt") => Lang::Kotlin,
            Some("swift") => Lang::Swift,
            Some("php") => Lang::Php,
            Some("c") | Some("h") => Lang::C,
            Some("hpp") | Some("hh") | Some("cpp") | Some("cc") => Lang::Cpp,
            Some("m") | Some("mm") => Lang::ObjectiveC,
            Some("cs") => Lang::CSharp,
            Some("sql") => Lang::Sql,
            Some("md") => Lang::Markdown,
            Some("html") | Some("htm") => Lang::Html,
            Some("css") => Lang::Css,
            Some("scss") => Lang::Scss,
            Some("less") => Lang::Less,
            Some("vue") => Lang::Vue,
            Some("svelte") => Lang::Svelte,
            Some("xml") => Lang::Xml,
            Some("gradle") | Some("groovy") => Lang::Groovy,
            Some("dockerfile") => Lang::Dockerfile,
            _ => Lang::Plain,
        }
    }

    /// Label used for fenced code blocks. Empty for plain files.
    pub fn fence_label(self) -> &'static str {
        match self {
            Lang::Python => "python",
            Lang::Javascript => "javascript",
            Lang::Jsx => "jsx",
            Lang::Typescript => "typescript",
            Lang::Tsx => "tsx",
            Lang::Json => "json",
            Lang::Yaml => "yaml",
            Lang::Toml => "toml",
            Lang::Ini => "ini",
            Lang::Bash => "bash",
            Lang::Powershell => "powershell",
            Lang::Ruby => "ruby",
            Lang::Go => "go",
            Lang::Rust => "rust",
            Lang::Java => "java",
            Lang::Kotlin => "kotlin",
            Lang::Swift => "swift",
            Lang::Php => "php",
            Lang::C => "c",
            Lang::Cpp => "cpp",
            Lang::ObjectiveC => "objectivec",
            Lang::CSharp => "csharp",
            Lang::Sql => "sql",
            Lang::Markdown => "markdown",
            Lang::Html => "html",
            Lang::Css => "css",
            Lang::Scss => "scss",
            Lang::Less => "less",
            Lang::Vue => "vue",
            Lang::Svelte => "svelte",
            Lang::Xml => "xml",
            Lang::Groovy => "groovy",
            Lang::Dockerfile => "dockerfile",
            Lang::Plain => "",
        }
    }

    /// Name shown in the language-mix table.
    pub fn label(self) -> &'static str {
        match self {
            Lang::Plain => "(plain)",
            other => other.fence_label(),
        }
    }

    /// Single-line comment marker used for SLOC and brief extraction.
    /// Tags without a usable whole-line marker return `None`.
    pub fn comment_prefix(self) -> Option<&'static str> {
        match self {
            Lang::Python | Lang::Bash | Lang::Ruby | Lang::Yaml | Lang::Toml | Lang::Dockerfile => {
                Some("#")
            }
            Lang::Ini => Some(";"),
            Lang::Javascript
            | Lang::Typescript
            | Lang::Tsx
            | Lang::Jsx
            | Lang::Java
            | Lang::C
            | Lang::Cpp
            | Lang::CSharp
            | Lang::Go
            | Lang::Rust
            | Lang::Php
            | Lang::Swift
            | Lang::Kotlin
            | Lang::ObjectiveC
            | Lang::Groovy => Some("//"),
            Lang::Sql => Some("--"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
