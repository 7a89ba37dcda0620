use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use file_monitor::channel::NotificationChannel;
use file_monitor::errors::{MonitorError, Result};
use file_monitor::watch::NormalizedEvent;

/// A fake channel that:
/// - records every event it was asked to send
/// - answers with scripted results (default: success)
#[derive(Clone, Default)]
pub struct FakeChannel {
    sent: Arc<Mutex<Vec<NormalizedEvent>>>,
    script: Arc<Mutex<VecDeque<Option<u16>>>>,
}

impl FakeChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next send: `None` succeeds, `Some(status)`
    /// fails with `UnexpectedStatus(status)`.
    pub fn then(self, outcome: Option<u16>) -> Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }

    /// Events handed to `send`, in order.
    pub fn sent(&self) -> Vec<NormalizedEvent> {
        self.sent.lock().unwrap().clone()
    }

    /// Paths handed to `send`, in order.
    pub fn sent_paths(&self) -> Vec<String> {
        self.sent().into_iter().map(|e| e.path).collect()
    }
}

impl NotificationChannel for FakeChannel {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn send<'a>(
        &'a self,
        event: &'a NormalizedEvent,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        let sent = Arc::clone(&self.sent);
        let next = self.script.lock().unwrap().pop_front().flatten();

        Box::pin(async move {
            {
                let mut guard = sent.lock().unwrap();
                guard.push(event.clone());
            }
            match next {
                None => Ok(()),
                Some(status) => Err(MonitorError::UnexpectedStatus(status)),
            }
        })
    }
}
