//! lru-shell - line-oriented command shell over an LRU cache

mod command;
mod handler;
mod shell;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lrucache::SharedLruCache;
use tokio::io::BufReader;
use tracing::info;

use crate::handler::CommandHandler;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = 10)]
    capacity: usize,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Echo each command before its reply
    #[arg(long)]
    echo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so replies on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting lru-shell v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);

    let cache = SharedLruCache::new(args.capacity).context("invalid --capacity")?;
    let handler = CommandHandler::new(cache.clone());
    let mut stdout = tokio::io::stdout();

    let executed = match &args.script {
        Some(path) => {
            info!("Reading commands from {}", path.display());
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open {}", path.display()))?;
            shell::run(BufReader::new(file), &mut stdout, &handler, args.echo).await?
        }
        None => {
            shell::run(
                BufReader::new(tokio::io::stdin()),
                &mut stdout,
                &handler,
                args.echo,
            )
            .await?
        }
    };

    let stats = cache.stats();
    info!(
        executed,
        entries = cache.len(),
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        "session finished"
    );

    Ok(())
}
