mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::Project;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "chapterlist",
    about = "Regenerate a book site's chapter list from its markdown chapter files",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from chapterlist.yaml or .git/)
    #[arg(long, global = true, env = "CHAPTERLIST_ROOT")]
    root: Option<PathBuf>,

    /// Directory holding chapter<N>.md files (default: translate/)
    #[arg(long, global = true)]
    chapters_dir: Option<PathBuf>,

    /// HTML document containing the chapter list (default: index.html)
    #[arg(long, global = true)]
    document: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite the document's chapter list (default)
    Update,

    /// Fail if the document's chapter list is out of date; never writes
    Check,

    /// Print the discovered chapters
    List,

    /// Write an mdBook SUMMARY.md for the chapters
    Summary {
        /// Output file (default: SUMMARY.md inside the chapters directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = Project::load(&root, cli.chapters_dir.as_deref(), cli.document.as_deref())
        .and_then(|project| match cli.command.unwrap_or(Commands::Update) {
            Commands::Update => cmd::update::run(&project, cli.json),
            Commands::Check => cmd::check::run(&project, cli.json),
            Commands::List => cmd::list::run(&project, cli.json),
            Commands::Summary { output } => {
                cmd::summary::run(&project, output.as_deref(), cli.json)
            }
        });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
