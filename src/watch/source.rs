// src/watch/source.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::event::{EventKind, ModifyKind, RenameMode};
use notify::{Config, Event, PollWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, info, warn};

use crate::errors::Result;
use crate::event::ChangeEvent;
use crate::watch::patterns::ExtensionFilter;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `PollWatcher` is kept alive for
/// as long as needed. Dropping this handle stops file watching and, in
/// turn, lets the dispatcher drain and exit.
pub struct WatchHandle {
    _inner: PollWatcher,
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle").finish()
    }
}

/// Spawn a polling filesystem watcher that observes `root` recursively and
/// forwards matching changes as [`ChangeEvent`]s into `event_tx`.
///
/// - `poll_interval` is how often the poll watcher re-scans the tree.
/// - `filter` is the compiled extension filter; created/removed paths that
///   fail it are skipped, moves always pass through (with a directory hint)
///   so the classifier can reject folder-level moves explicitly.
/// - `event_tx` is the bounded channel into the dispatcher. When it is
///   full, the newest event is dropped with a warning: bursts coalesce
///   instead of buffering, trading completeness for liveness.
///
/// The returned receiver yields the first unrecoverable watch error; the
/// caller treats it as fatal.
pub fn spawn_watch_source(
    root: impl Into<PathBuf>,
    poll_interval: Duration,
    filter: ExtensionFilter,
    event_tx: mpsc::Sender<ChangeEvent>,
) -> Result<(WatchHandle, mpsc::Receiver<notify::Error>)> {
    let root = root.into();
    // Canonicalize once so we have a stable base path.
    let root = root.canonicalize().unwrap_or_else(|_| root.clone());

    // Channel from the blocking notify callback into the async world.
    let (raw_tx, mut raw_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();

    // Closure called synchronously by notify whenever an event arrives.
    let mut watcher = PollWatcher::new(
        move |res: notify::Result<Event>| {
            if raw_tx.send(res).is_err() {
                // Receiver gone; nothing left to forward to.
                eprintln!("syncwatch: watch event receiver dropped");
            }
        },
        Config::default().with_poll_interval(poll_interval),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!(?root, interval_secs = poll_interval.as_secs(), "watch source started");

    let (fatal_tx, fatal_rx) = mpsc::channel::<notify::Error>(1);

    // Async task that consumes notify events and forwards change events to
    // the dispatcher.
    tokio::spawn(async move {
        while let Some(res) = raw_rx.recv().await {
            match res {
                Ok(event) => {
                    if !forward_event(event, &filter, &event_tx) {
                        break;
                    }
                }
                Err(err) => {
                    // Watch errors (e.g. the root disappearing) are the
                    // one fatal condition of the whole pipeline.
                    error!(error = %err, "unrecoverable watch error");
                    let _ = fatal_tx.send(err).await;
                    return;
                }
            }
        }
        debug!("watch event loop finished");
    });

    Ok((WatchHandle { _inner: watcher }, fatal_rx))
}

/// Map and enqueue one notify event. Returns false when the dispatcher
/// side of the channel is gone and forwarding should stop.
fn forward_event(
    event: Event,
    filter: &ExtensionFilter,
    event_tx: &mpsc::Sender<ChangeEvent>,
) -> bool {
    let Some(change) = map_event(&event, filter) else {
        return true;
    };

    debug!(?change, "forwarding change event");
    match event_tx.try_send(change) {
        Ok(()) => true,
        Err(TrySendError::Full(dropped)) => {
            warn!(
                path = %dropped.path,
                "event queue full; burst coalesced, event dropped"
            );
            true
        }
        Err(TrySendError::Closed(_)) => {
            debug!("event channel closed; stopping watch forwarding");
            false
        }
    }
}

/// Translate a raw notify event into at most one [`ChangeEvent`].
///
/// Rename events carrying only one half are degraded to plain
/// create/remove observations; renames with both paths become moves. All
/// other event kinds (metadata, data writes, ...) are ignored.
fn map_event(event: &Event, filter: &ExtensionFilter) -> Option<ChangeEvent> {
    match event.kind {
        EventKind::Create(_) => {
            let path = path_str(event.paths.first()?);
            watchable(&path, filter).then(|| ChangeEvent::created(path))
        }
        EventKind::Remove(_) => {
            let path = path_str(event.paths.first()?);
            watchable(&path, filter).then(|| ChangeEvent::removed(path))
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let old = path_str(event.paths.first()?);
            let new = path_str(event.paths.get(1)?);
            if old.len() <= 1 || new.len() <= 1 {
                return None;
            }
            // Moves always pass through: the classifier decides whether a
            // non-matching old path is a rejectable folder move.
            let dir_hint = !filter.matches(&old);
            Some(ChangeEvent::moved(old, new).with_dir_hint(dir_hint))
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
            let path = path_str(event.paths.first()?);
            watchable(&path, filter).then(|| ChangeEvent::removed(path))
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
            let path = path_str(event.paths.first()?);
            watchable(&path, filter).then(|| ChangeEvent::created(path))
        }
        _ => None,
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Bare-root paths are never valid targets; everything else must match
/// the extension filter.
fn watchable(path: &str, filter: &ExtensionFilter) -> bool {
    path.len() > 1 && filter.matches(path)
}
