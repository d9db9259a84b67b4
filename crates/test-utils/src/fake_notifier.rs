use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use syncwatch::dispatch::RequestPayload;
use syncwatch::errors::{Result, SyncwatchError};
use syncwatch::notifier::Notifier;

/// A fake notifier that:
/// - records every payload it was asked to deliver
/// - optionally fails each delivery with a configurable HTTP status.
pub struct FakeNotifier {
    sent: Arc<Mutex<Vec<RequestPayload>>>,
    fail_with_status: Option<u16>,
}

impl FakeNotifier {
    pub fn new(sent: Arc<Mutex<Vec<RequestPayload>>>) -> Self {
        Self {
            sent,
            fail_with_status: None,
        }
    }

    /// A notifier that records payloads but reports every delivery as
    /// rejected by the remote with the given status.
    pub fn failing(sent: Arc<Mutex<Vec<RequestPayload>>>, status: u16) -> Self {
        Self {
            sent,
            fail_with_status: Some(status),
        }
    }
}

impl Notifier for FakeNotifier {
    fn send(
        &mut self,
        payload: RequestPayload,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let sent = Arc::clone(&self.sent);
        let fail_with_status = self.fail_with_status;

        Box::pin(async move {
            {
                let mut guard = sent.lock().unwrap();
                guard.push(payload);
            }

            match fail_with_status {
                Some(status) => Err(SyncwatchError::RemoteRejection(status)),
                None => Ok(()),
            }
        })
    }
}
