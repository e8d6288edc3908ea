//! Debounced text input.
//!
//! Raw keystrokes are pushed as they arrive; a value is committed only
//! after `delay` passes with no newer push. Committed values are delivered
//! on an unbounded channel so the owner can `select!` on them alongside
//! other input.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Quiet period used by the search boxes
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds at most one pending timer.
///
/// Must be used from within a tokio runtime. Dropping the debouncer aborts
/// the pending timer, so nothing is committed after teardown.
pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver of committed values.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            tx,
            pending: None,
        };
        (debouncer, rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new raw value, superseding any value still waiting.
    pub fn push(&mut self, value: T) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // receiver gone means the view was torn down
            let _ = tx.send(value);
        }));
    }

    /// Drop the waiting value, if any. Returns true if one was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Instant, sleep, timeout};

    #[tokio::test(start_paused = true)]
    async fn test_only_last_value_is_committed() {
        let (mut debouncer, mut rx) = Debouncer::new(DEFAULT_DEBOUNCE);
        let start = Instant::now();

        debouncer.push("a".to_string());
        debouncer.push("al".to_string());
        debouncer.push("ali".to_string());

        assert_eq!(rx.recv().await.as_deref(), Some("ali"));
        assert!(start.elapsed() >= DEFAULT_DEBOUNCE);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_push_restarts_quiet_period() {
        let (mut debouncer, mut rx) = Debouncer::new(DEFAULT_DEBOUNCE);
        let start = Instant::now();

        debouncer.push(1);
        sleep(Duration::from_millis(100)).await;
        debouncer.push(2);
        sleep(Duration::from_millis(100)).await;
        assert!(debouncer.is_pending());

        assert_eq!(rx.recv().await, Some(2));
        assert!(start.elapsed() >= Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_values_after_quiet_period_are_both_committed() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(50));

        debouncer.push(1);
        assert_eq!(rx.recv().await, Some(1));
        debouncer.push(2);
        assert_eq!(rx.recv().await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_value() {
        let (mut debouncer, mut rx) = Debouncer::new(DEFAULT_DEBOUNCE);

        debouncer.push("draft");
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        let result = timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let (mut debouncer, mut rx) = Debouncer::new(DEFAULT_DEBOUNCE);

        debouncer.push("draft");
        drop(debouncer);

        let result = timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(matches!(result, Ok(None) | Err(_)));
    }
}
