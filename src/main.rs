use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use swiper::headless::{self, OutputFormat};
use swiper_core::config::Config;
use swiper_tui::TextDocument;

#[derive(Parser)]
#[command(name = "swiper", about = "Incremental multi-term search in a single document")]
struct Cli {
    /// File to open.
    file: PathBuf,

    /// Open with the search already running on this word.
    #[arg(long, conflicts_with = "query")]
    word: Option<String>,

    /// Print the matches for this query and exit instead of opening the viewer.
    #[arg(long)]
    query: Option<String>,

    /// With --query, print one JSON object per match.
    #[arg(long, requires = "query")]
    json: bool,

    /// Write debug logs to /tmp/swiper-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/swiper-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("swiper debug log started, tail -f /tmp/swiper-debug.log");
    }

    if let Some(query) = cli.query.as_deref() {
        let document = TextDocument::open(&cli.file)?;
        let matches = headless::run_query(&document, query);
        tracing::debug!(query, matches = matches.len(), "headless search");
        let format = if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Plain
        };
        return headless::write_matches(&mut std::io::stdout().lock(), &matches, format)
            .context("writing matches");
    }

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "invalid config, using defaults");
        Config::defaults()
    });
    swiper_tui::run(&cli.file, config, cli.word.as_deref())
}
