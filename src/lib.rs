// src/lib.rs

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod event;
pub mod logging;
pub mod notifier;
pub mod watch;

use std::path::PathBuf;

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::dispatch::Dispatcher;
use crate::errors::{Result, SyncwatchError};
use crate::event::ChangeEvent;
use crate::notifier::HttpNotifier;
use crate::watch::{spawn_watch_source, ExtensionFilter};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the watch source feeding the bounded event queue
/// - the dispatcher with its HTTP notifier
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let filter = ExtensionFilter::new(&cfg.watch.extension)?;

    // Bounded on purpose: a full queue drops the newest event, coalescing
    // bursts instead of buffering them.
    let (event_tx, event_rx) = mpsc::channel::<ChangeEvent>(cfg.watch.queue_capacity);

    let (watch_handle, mut fatal_rx) = spawn_watch_source(
        cfg.watch.root.as_str(),
        cfg.poll_interval(),
        filter,
        event_tx,
    )?;

    let notifier = HttpNotifier::new(&cfg.remote.base_url);
    let dispatcher = Dispatcher::new(cfg.classify_rules(), event_rx, notifier);
    let mut dispatcher_task = tokio::spawn(dispatcher.run());

    tokio::select! {
        res = &mut dispatcher_task => {
            res.map_err(anyhow::Error::from)??;
            Ok(())
        }
        err = fatal_rx.recv() => {
            match err {
                // The only fatal condition: the watch source gave up.
                Some(e) => Err(e.into()),
                None => Ok(()),
            }
        }
        sig = tokio::signal::ctrl_c() => {
            sig.map_err(SyncwatchError::IoError)?;
            info!("shutdown requested");
            // Stopping the watcher ends the forwarding task, which closes
            // the event channel; the dispatcher then drains whatever is
            // still queued and exits on its own.
            drop(watch_handle);
            match timeout(Duration::from_secs(5), &mut dispatcher_task).await {
                Ok(res) => res.map_err(anyhow::Error::from)??,
                Err(_) => {
                    warn!("dispatcher did not drain in time; exiting anyway");
                }
            }
            Ok(())
        }
    }
}

/// Simple dry-run output: print the effective settings.
fn print_dry_run(cfg: &ConfigFile) {
    println!("syncwatch dry-run");
    println!("  remote.base_url = {}", cfg.remote.base_url);
    println!("  watch.root = {}", cfg.watch.root);
    println!("  watch.poll_interval_secs = {}", cfg.watch.poll_interval_secs);
    println!("  watch.extension = {}", cfg.watch.extension);
    println!("  watch.trash_marker = {}", cfg.watch.trash_marker);
    println!("  watch.queue_capacity = {}", cfg.watch.queue_capacity);
}
