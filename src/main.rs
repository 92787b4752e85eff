mod config;
mod error;
mod library;
mod lrc;
mod lyrics;
mod pipeline;
mod song;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Overrides, Settings};
use crate::error::FetchError;
use crate::lyrics::{ArtistFallback, ProviderKind, QueryStrategy};
use crate::pipeline::Outcome;
use crate::song::SongDescriptor;

/// Reads the current song as JSON on stdin (e.g. `rmpc song | fetch-lyrics`)
/// and saves its synced lyrics as an LRC file in the music library.
#[derive(Debug, Parser)]
#[command(name = "fetch-lyrics", version, about)]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Directory the LRC file is written to (default: ~/Music/Music).
    #[arg(long)]
    library_root: Option<std::path::PathBuf>,

    /// Lyrics service to query.
    #[arg(long, value_enum)]
    provider: Option<ProviderKind>,

    /// Which artist field goes into the query.
    #[arg(long, value_enum)]
    strategy: Option<QueryStrategy>,

    /// Use the other artist field when the preferred one is empty.
    #[arg(long, value_enum)]
    fallback: Option<ArtistFallback>,

    /// Print the LRC to stdout instead of writing the file.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout carries the --dry-run LRC text only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    log_subscriber(std::io::stderr, filter).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn log_subscriber<W>(writer: W, filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(writer)
        .finish()
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = config::load(cli.config.as_deref()).map_err(|e| FetchError::Config(format!("{:#}", e)))?;
    let overrides = Overrides {
        library_root: cli.library_root,
        provider: cli.provider,
        strategy: cli.strategy,
        fallback: cli.fallback,
    };
    let settings = Settings::resolve(
        cfg,
        overrides,
        config::home_dir().as_deref(),
        std::env::var(config::TOKEN_ENV).ok(),
    )?;
    let provider = settings.build_provider()?;

    let song = SongDescriptor::from_reader(std::io::stdin().lock())?;

    let outcome = pipeline::run(&settings, &song, &provider, cli.dry_run)
        .await
        .context("fetch lyrics")?;
    if let Outcome::Printed(text) = outcome {
        print!("{}", text);
    }
    Ok(())
}
