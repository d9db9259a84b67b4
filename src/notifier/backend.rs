// src/notifier/backend.rs

//! Pluggable delivery backend abstraction.
//!
//! The dispatcher talks to a `Notifier` instead of a concrete HTTP client.
//! This makes it easy to swap in a fake notifier in tests while keeping
//! the production implementation here.
//!
//! - `HttpNotifier` is the default implementation used by `syncwatch`.
//!   It sends the payload as a JSON body to the configured base URL.
//! - Tests can provide their own `Notifier` that, for example, records
//!   which payloads were sent without touching the network.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::dispatch::payload::{RequestPayload, Verb};
use crate::errors::{Result, SyncwatchError};

/// Trait abstracting how payloads are delivered to the remote service.
///
/// Production code uses [`HttpNotifier`]; tests can provide their own
/// implementation that doesn't perform real requests.
pub trait Notifier: Send {
    /// Deliver a single payload.
    ///
    /// One call means one best-effort attempt; implementations must not
    /// retry internally.
    fn send(
        &mut self,
        payload: RequestPayload,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Real notifier used in production.
///
/// Wraps a `reqwest::Client` and the remote base URL. The HTTP verb is
/// chosen from the payload variant; exactly HTTP 200 counts as success,
/// anything else is surfaced as [`SyncwatchError::RemoteRejection`].
pub struct HttpNotifier {
    client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for HttpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpNotifier")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpNotifier {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Notifier for HttpNotifier {
    fn send(
        &mut self,
        payload: RequestPayload,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        // Clone so the future doesn't borrow `self` across `await`.
        let client = self.client.clone();
        let url = self.base_url.clone();

        Box::pin(async move {
            let body = payload.to_json()?;

            let request = match payload.verb() {
                Verb::Post => client.post(&url),
                Verb::Put => client.put(&url),
                Verb::Delete => client.delete(&url),
            };

            debug!(verb = ?payload.verb(), %url, "sending request");
            let response = request.json(&body).send().await?;

            let status = response.status();
            if status != reqwest::StatusCode::OK {
                return Err(SyncwatchError::RemoteRejection(status.as_u16()));
            }
            Ok(())
        })
    }
}
