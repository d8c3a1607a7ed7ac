//! Cancellable quiet-period timer for live search.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Runs an action once input has been quiet for a fixed period.
///
/// Each [`schedule`](Debouncer::schedule) cancels the pending timer. Once the
/// quiet period elapses the action is spawned as its own task, so a later
/// `schedule` or `cancel` never interrupts an action that already started.
pub struct Debouncer {
    quiet: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: Mutex::new(None),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Restart the timer with `action` as the thing to run.
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let quiet = self.quiet;
        let mut pending = self.pending();
        if let Some(timer) = pending.take() {
            timer.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            tokio::spawn(action);
        }));
    }

    /// Drop the pending action, if its timer has not fired yet.
    pub fn cancel(&self) {
        if let Some(timer) = self.pending().take() {
            timer.abort();
        }
    }

    fn pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn settle_tasks() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_after_quiet_period() {
        let debouncer = Debouncer::new(Duration::from_millis(700));
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..5 {
            let fired = Arc::clone(&fired);
            debouncer.schedule(async move {
                fired.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(600)).await;
        settle_tasks().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_action() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(500)).await;
        settle_tasks().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
