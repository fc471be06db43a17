//! Cancellable periodic ticker. The contract replacing ad-hoc interval
//! timers: `start(period, fn) -> handle`, and `cancel(handle)` guarantees no
//! fire after cancel.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

pub struct TickerHandle {
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Stop the ticker. The callback will not run again after this returns;
    /// a tick already past its cancellation check finishes its await but its
    /// owner is expected to guard state writes with `is_cancelled`.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// A flag callers can capture to suppress stale writes.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Run `f` every `period`, starting after one full period. Ticks never
/// overlap; a slow callback delays the next tick rather than stacking.
pub fn start<F, Fut>(period: Duration, mut f: F) -> TickerHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick of tokio's interval completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            if flag.load(Ordering::SeqCst) {
                break;
            }
            f().await;
            if flag.load(Ordering::SeqCst) {
                break;
            }
        }
    });
    TickerHandle { cancelled, task }
}
