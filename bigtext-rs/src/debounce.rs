//! Caller-visible debounce for bursts of UI events.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Runs only the last of a burst of calls, once `delay` has passed without
/// a newer call.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay, then run `action` unless a newer call arrived in
    /// the meantime. Returns `None` for superseded calls.
    pub async fn call<F, Fut, T>(&self, action: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            log::trace!("debounced call {} superseded", ticket);
            return None;
        }
        Some(action().await)
    }
}
