// src/lib.rs

pub mod channel;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::channel::{build_channel, ChannelKind};
use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::config::{default_config_path, load_and_validate_for};
use crate::engine::{Dispatcher, EventPipeline};
use crate::watch::spawn_watcher;

/// Resolve the config path from the CLI (or the working directory) and
/// load + validate it. Any failure here is fatal.
pub fn load_config(args: &CliArgs) -> Result<ConfigFile> {
    let path = match &args.config {
        Some(p) => PathBuf::from(p),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            default_config_path(cwd)
        }
    };
    let target = args.target_os.map(Into::into);
    load_and_validate_for(&path, target)
        .with_context(|| format!("failed to load config {:?}", path))
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the notification channel chosen by the config
/// - the file watcher and its two streams
/// - the dispatcher loop
/// - Ctrl-C handling
pub async fn run(args: CliArgs, cfg: ConfigFile) -> Result<()> {
    log_startup_summary(&cfg);

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    // Channel first: a broken channel config must not leave watches behind.
    let channel = build_channel(&cfg).context("failed to build notification channel")?;

    let (watcher, streams) =
        spawn_watcher(cfg.directories()).context("failed to create watcher")?;

    let dispatcher = Dispatcher::new(EventPipeline::from_config(&cfg), channel);

    // Ctrl-C → graceful shutdown.
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    dispatcher.run_until(streams, shutdown).await;

    // Dropping the handle stops the backend.
    drop(watcher);
    info!("file monitor stopped");
    Ok(())
}

fn log_startup_summary(cfg: &ConfigFile) {
    let ignore = cfg.ignore();
    info!("starting file monitor with configuration:");
    info!("  directories: {:?}", cfg.directories());
    info!("  ignore rules:");
    info!("    - file patterns: {:?}", ignore.files);
    info!("    - extensions: {:?}", ignore.extensions);
    info!("    - directory patterns: {:?}", ignore.directories);
    info!(
        "  event kinds: {:?} (informational, not enforced)",
        cfg.events()
    );
    info!("  target path convention: {}", cfg.target_os());

    match ChannelKind::from_config(cfg) {
        ChannelKind::Webhook(provider) => info!("webhook notifications enabled, provider: {provider}"),
        ChannelKind::Email => info!("email notifications enabled, recipients: {:?}", cfg.email().to),
        ChannelKind::None => warn!("no notification channel enabled; events will only be logged"),
    }
}

/// Simple dry-run output: print the effective settings.
fn print_dry_run(cfg: &ConfigFile) {
    let ignore = cfg.ignore();
    println!("file-monitor dry-run");
    println!("  target_os = {}", cfg.target_os());
    println!("  channel = {}", ChannelKind::from_config(cfg));
    println!();

    println!("directories ({}):", cfg.directories().len());
    for dir in cfg.directories() {
        println!("  - {dir}");
    }

    if !ignore.extensions.is_empty() {
        println!("ignore.extensions: {:?}", ignore.extensions);
    }
    if !ignore.files.is_empty() {
        println!("ignore.files: {:?}", ignore.files);
    }
    if !ignore.directories.is_empty() {
        println!("ignore.directories: {:?}", ignore.directories);
    }
    if !cfg.events().is_empty() {
        println!("events: {:?}", cfg.events());
    }
}
