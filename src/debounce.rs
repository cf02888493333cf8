//! Trailing-edge debouncing for chatty inputs (search text, live-score
//! edits).

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Runs a future after a quiet period, cancelling any previously scheduled
/// one.
///
/// Each call to [`Debouncer::schedule`] aborts the pending task and restarts
/// the delay, so of any burst of calls only the last future executes.
/// Dropping the debouncer aborts whatever is still pending, which is how
/// unmounting a view cancels its timers.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `fut` to run after the delay, replacing any pending run.
    pub fn schedule<F>(&mut self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            fut.await;
        }));
    }

    /// Drop the pending run, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a run is scheduled and has not completed yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
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
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn runs_after_quiet_period() {
        let fired = Arc::new(AtomicU32::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        let f = fired.clone();
        debouncer.schedule(async move {
            f.fetch_add(1, Ordering::SeqCst);
        });
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn burst_runs_only_the_last_future() {
        let fired = Arc::new(AtomicU32::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        for i in 1..=5u32 {
            let f = fired.clone();
            debouncer.schedule(async move {
                f.store(i, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0, "nothing fires mid-burst");

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_the_run() {
        let fired = Arc::new(AtomicU32::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        let f = fired.clone();
        debouncer.schedule(async move {
            f.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
