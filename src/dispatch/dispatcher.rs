// src/dispatch/dispatcher.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::dispatch::classify::{classify, ClassifyRules, SyncIntent};
use crate::dispatch::payload::build_payload;
use crate::errors::Result;
use crate::event::ChangeEvent;
use crate::notifier::Notifier;

/// Drives the per-event pipeline in response to [`ChangeEvent`]s, and
/// delegates actual delivery to a [`Notifier`].
///
/// This is a plain IO shell around the pure classification and payload
/// functions, which contain all the mapping semantics. This struct handles
/// async IO: reading events from the channel and awaiting the notifier.
///
/// Events are processed strictly in arrival order, one at a time; an
/// outbound request blocks the loop for its duration. There is no retry:
/// a failed delivery is logged and the event permanently dropped, keeping
/// the watch loop live even when the remote misbehaves.
pub struct Dispatcher<N: Notifier> {
    rules: ClassifyRules,
    event_rx: mpsc::Receiver<ChangeEvent>,
    notifier: N,
}

impl<N: Notifier> fmt::Debug for Dispatcher<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl<N: Notifier> Dispatcher<N> {
    pub fn new(rules: ClassifyRules, event_rx: mpsc::Receiver<ChangeEvent>, notifier: N) -> Self {
        Self {
            rules,
            event_rx,
            notifier,
        }
    }

    /// Main event loop.
    ///
    /// - Consumes [`ChangeEvent`]s from `event_rx`.
    /// - Classifies each into an intent and builds the wire payload.
    /// - Hands the payload to the notifier and logs the outcome.
    ///
    /// Exits cleanly when the event channel closes.
    pub async fn run(mut self) -> Result<()> {
        info!("dispatcher started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("event channel closed; dispatcher exiting");
                    break;
                }
            };

            debug!(?event, "dispatcher received event");
            self.process(event).await;
        }

        Ok(())
    }

    /// Handle one event end to end. Never fails: every error is local to
    /// the event and surfaced via logs only.
    async fn process(&mut self, event: ChangeEvent) {
        let intent = classify(&event, &self.rules);

        let payload = match build_payload(&intent, &self.rules.extension) {
            Some(p) => p,
            None => {
                if let SyncIntent::Rejected { reason } = &intent {
                    warn!(
                        path = %event.path,
                        dir_hint = event.is_dir_hint,
                        %reason,
                        "event rejected; no request sent"
                    );
                }
                return;
            }
        };

        debug!(verb = ?payload.verb(), "dispatching payload");
        match self.notifier.send(payload).await {
            Ok(()) => {
                info!(path = %event.path, op = ?event.op, "change synchronized");
            }
            Err(err) => {
                // Best effort by design: log and drop, no retry.
                warn!(
                    path = %event.path,
                    op = ?event.op,
                    error = %err,
                    "delivery failed; event dropped"
                );
            }
        }
    }
}
