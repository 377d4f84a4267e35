//! Debounced task scheduling
//!
//! Rapid input changes (toggling services changes the total duration on
//! every click) would otherwise fire an availability query per keystroke.
//! Each `schedule` cancels the previous one; a task only runs after its
//! settle window passes without a newer schedule, and a superseded task is
//! cancelled even mid-flight, so only the latest result is ever applied.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Settle window before a scheduled task runs
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Latest-wins scheduler for a single logical query
pub struct Debouncer {
    delay: Duration,
    current: CancellationToken,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::with_delay(SETTLE_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            current: CancellationToken::new(),
        }
    }

    /// Schedule `task` to run after the settle window, cancelling any
    /// previously scheduled task
    pub fn schedule<F>(&mut self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.current.cancel();
        self.current = CancellationToken::new();

        let token = self.current.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = async {
                    tokio::time::sleep(delay).await;
                    task.await;
                } => {}
            }
        })
    }

    /// Cancel the pending task, if any (component teardown)
    pub fn cancel(&self) {
        self.current.cancel();
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.current.cancel();
    }
}
