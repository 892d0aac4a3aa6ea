//! Cancellable delayed task used for regenerate-on-input.
//!
//! Each `schedule` replaces the pending task, so only the last request in a
//! burst runs once the quiet period elapses. A task whose quiet period has
//! elapsed is never aborted; it runs to completion even if a newer one is
//! scheduled.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default quiet period before a scheduled task runs.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct Pending {
    handle: JoinHandle<()>,
    started: Arc<AtomicBool>,
}

impl Pending {
    fn is_waiting(&self) -> bool {
        !self.started.load(Ordering::SeqCst) && !self.handle.is_finished()
    }
}

/// Last-write-wins delayed task runner.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Pending>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Change the quiet period for tasks scheduled from now on.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Schedule `task` to run after the quiet period, cancelling any task
    /// still waiting.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        let started = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&started);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            flag.store(true, Ordering::SeqCst);
            task.await;
        });
        self.pending = Some(Pending { handle, started });
    }

    /// Cancel the waiting task, if any. Returns whether one was cancelled.
    /// A task that already started is left running.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) if pending.is_waiting() => {
                pending.handle.abort();
                true
            }
            _ => false,
        }
    }

    /// Whether a task is still waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(Pending::is_waiting)
    }

    /// Take the handle of the most recent task so the caller can wait for it
    /// to finish. The task is no longer cancellable afterwards.
    pub fn take_pending(&mut self) -> Option<JoinHandle<()>> {
        self.pending.take().map(|p| p.handle)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
