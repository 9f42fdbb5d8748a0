//! albo-watch CLI - polls the Poliba albo and notifies Telegram chats.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use albo_watch::store::DEFAULT_STATE_PATH;
use albo_watch::{Config, CycleResult, PortalClient, SeenStore, TableParser, Watcher};
use notify::{Notifier, TelegramChannel};

/// albo-watch - Monitor the Poliba albo online for new announcements.
#[derive(Parser)]
#[command(name = "albo-watch")]
#[command(about = "Poliba albo online watcher with Telegram notifications")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// State file path (tracks notified links)
    #[arg(long, global = true, env = "STATE_FILE", default_value = DEFAULT_STATE_PATH)]
    state: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll forever at the configured refresh rate (default)
    Run,

    /// Run a single check cycle and print a summary
    Once,

    /// List links already notified
    Seen,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("albo_watch=debug,notify=debug,info")
        } else {
            EnvFilter::new("albo_watch=info,notify=info,warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let store = SeenStore::new(cli.state);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let watcher = build_watcher(store)?;
            let seen = watcher.store().load().await;
            tracing::info!(seen = seen.len(), "Starting albo watcher");
            watcher.run_forever(seen).await;
            Ok(())
        }
        Commands::Once => run_once(store).await,
        Commands::Seen => run_seen(&store).await,
    }
}

fn build_watcher(store: SeenStore) -> Result<Watcher> {
    let config = Config::from_env()?;
    tracing::info!(
        keyword = config.keyword.as_str(),
        chats = config.chat_ids.len(),
        refresh_secs = config.refresh_rate.as_secs(),
        endpoint = %config.portal.endpoint,
        state = %store.path().display(),
        "Loaded configuration"
    );

    let parser =
        TableParser::from_base(&config.portal.base_url).context("Invalid portal base URL")?;
    let source =
        PortalClient::new(config.portal.clone()).context("Failed to build HTTP client")?;

    let mut channel = TelegramChannel::new(config.bot_token.clone());
    if let Some(api_base) = &config.telegram_api_base {
        channel = channel.with_api_base(api_base.clone());
    }
    let notifier = if config.notify_disabled {
        Notifier::disabled(Arc::new(channel), config.chat_ids.clone())
    } else {
        Notifier::new(Arc::new(channel), config.chat_ids.clone())
    };

    Ok(Watcher::new(
        Box::new(source),
        Box::new(parser),
        notifier,
        config.keyword,
        store,
    )
    .with_interval(config.refresh_rate))
}

async fn run_once(store: SeenStore) -> Result<()> {
    let watcher = build_watcher(store)?;
    let mut seen = watcher.store().load().await;
    let result = watcher.run_cycle(&mut seen).await;

    print_summary(&result);
    Ok(())
}

async fn run_seen(store: &SeenStore) -> Result<()> {
    let seen = store.load().await;

    println!("📋 Notified links in {}\n", store.path().display());
    if seen.is_empty() {
        println!("No links recorded yet.");
        return Ok(());
    }

    for link in &seen {
        println!("🔖 {link}");
    }
    println!("\nTotal: {} links", seen.len());

    Ok(())
}

fn print_summary(result: &CycleResult) {
    println!(
        "\n📊 Cycle Summary ({})",
        result.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("   Pages scanned: {}", result.pages_scanned);
    println!("   Pages failed: {}", result.pages_failed);
    println!("   Pages without table: {}", result.pages_without_table);
    println!("   Entries found: {}", result.entries_found);
    println!("   New entries: {}", result.new_entries);
    println!("   Messages delivered: {}", result.deliveries);

    if !result.errors.is_empty() {
        println!("   Errors: {}", result.errors.len());
        for err in &result.errors {
            eprintln!("     - {err}");
        }
    }
}
