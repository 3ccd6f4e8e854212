//! Monodoc CLI - dump a project into one Markdown document.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{generate, Shell};
use monodoc::builder::{Exporter, DEFAULT_MAX_BYTES};
use monodoc::document::MarkdownPolicy;
use monodoc::errors::{exit_code, MonodocError};

#[derive(Parser)]
#[command(name = "monodoc")]
#[command(about = "Extract project files into one Markdown document for LLM discussion")]
#[command(version)]
struct Cli {
    /// Project root directory
    #[arg(short, long, required_unless_present = "completions")]
    root: Option<PathBuf>,

    /// Output markdown file (default: <project>_<timestamp>.md)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Ignore patterns (glob, supports **); repeatable
    #[arg(long = "ignore")]
    ignore: Vec<String>,

    /// Exclude hidden files/dirs (those starting with a dot)
    #[arg(long)]
    exclude_hidden: bool,

    /// Max bytes per file to include
    #[arg(long, default_value_t = DEFAULT_MAX_BYTES)]
    max_bytes_per_file: usize,

    /// Whitelist extensions (repeatable)
    #[arg(long = "only-ext")]
    only_ext: Vec<String>,

    /// Top-level title in markdown
    #[arg(long)]
    title: Option<String>,

    /// How to include project .md files
    #[arg(long, value_enum, default_value = "fence")]
    md_policy: MdPolicyArg,

    /// Show top-N largest/longest files
    #[arg(long, default_value_t = 12)]
    top_n_largest: usize,

    /// Emit Mermaid graph for Python imports
    #[arg(long)]
    mermaid_import_graph: bool,

    /// Omit per-file metrics lines
    #[arg(long)]
    no_metrics: bool,

    /// Omit auto-summary blocks
    #[arg(long)]
    no_summaries: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum)]
    completions: Option<Shell>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MdPolicyArg {
    /// Fence as code
    Fence,
    /// Render with demoted headings
    Render,
    /// Skip entirely
    Skip,
}

impl From<MdPolicyArg> for MarkdownPolicy {
    fn from(arg: MdPolicyArg) -> Self {
        match arg {
            MdPolicyArg::Fence => MarkdownPolicy::Fence,
            MdPolicyArg::Render => MarkdownPolicy::Render,
            MdPolicyArg::Skip => MarkdownPolicy::Skip,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        generate(shell, &mut Cli::command(), "monodoc", &mut std::io::stdout());
        return;
    }

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(exit_code(&e));
    }
}

fn run(cli: Cli) -> Result<(), MonodocError> {
    let Some(root) = cli.root else {
        // clap enforces this unless --completions was given.
        return Err(MonodocError::RootNotFound(PathBuf::new()));
    };

    let exporter = Exporter::new(&root)
        .ignores(cli.ignore)
        .exclude_hidden(cli.exclude_hidden)
        .max_bytes_per_file(cli.max_bytes_per_file)
        .only_extensions(cli.only_ext)
        .md_policy(cli.md_policy.into())
        .top_n(cli.top_n_largest)
        .import_graph(cli.mermaid_import_graph)
        .with_metrics(!cli.no_metrics)
        .with_summaries(!cli.no_summaries);

    let exporter = match cli.title {
        Some(title) => exporter.title(title),
        None => exporter,
    };

    let markdown = exporter.export()?;

    let out_path = cli.output.unwrap_or_else(|| default_output_name(&root));
    std::fs::write(&out_path, markdown)?;
    println!("[OK] Wrote: {}", out_path.display());

    Ok(())
}

/// `<project>_<YYYYMMDD_HHMMSS>.md`, from the root's directory name.
fn default_output_name(root: &PathBuf) -> PathBuf {
    let name = root
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "project".to_string());
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("{name}_{stamp}.md"))
}
