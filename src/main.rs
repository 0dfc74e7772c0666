mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use engram::config::EngramConfig;
use engram::memory::MemoryKind;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "engram", version, about = "Tiered memory engine for conversational agents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Remember a new observation
    Remember {
        /// Text to remember
        content: String,
        /// episodic, semantic, procedural, working or emotional
        #[arg(long, default_value = "episodic")]
        kind: MemoryKind,
        /// Free-form tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Rank memories against a query (counts as an access)
    Recall {
        query: String,
        #[arg(long)]
        kind: Option<MemoryKind>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show store statistics
    Stats,
    /// Show working memory
    Context,
    /// Run one consolidation pass now
    Consolidate,
    /// Keep a consolidation scheduler running and remember stdin lines until ctrl-c
    Run,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = EngramConfig::load()?;

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.logging.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Remember { content, kind, tags } => cli::remember::remember(&config, &content, kind, tags)?,
        Command::Recall { query, kind, limit } => cli::recall::recall(&config, &query, kind, limit)?,
        Command::Stats => cli::stats::stats(&config)?,
        Command::Context => cli::context::context(&config)?,
        Command::Consolidate => cli::maintenance::consolidate(&config)?,
        Command::Run => cli::run::run(config).await?,
    }

    Ok(())
}
