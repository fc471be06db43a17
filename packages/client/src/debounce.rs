//! Trailing-edge debouncer for editor rebinds. A burst of preference
//! changes collapses into a single callback after the quiet window.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Debouncer {
    tx: mpsc::UnboundedSender<()>,
    task: JoinHandle<()>,
}

impl Debouncer {
    /// `on_quiet` runs once per burst, `quiet` after the last `poke`.
    pub fn new<F, Fut>(quiet: Duration, mut on_quiet: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        let task = tokio::spawn(async move {
            while rx.recv().await.is_some() {
                loop {
                    match tokio::time::timeout(quiet, rx.recv()).await {
                        // Another poke inside the window restarts it.
                        Ok(Some(())) => continue,
                        // Sender dropped mid-burst; do not fire.
                        Ok(None) => return,
                        Err(_) => break,
                    }
                }
                on_quiet().await;
            }
        });
        Self { tx, task }
    }

    /// Signal a change. Cheap and non-blocking.
    pub fn poke(&self) {
        let _ = self.tx.send(());
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_one_fire() {
        let fired = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&fired);
        let debouncer = Debouncer::new(Duration::from_millis(500), move || {
            let seen = Arc::clone(&seen);
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        // A 200 ms slider drag: pokes every 25 ms.
        for _ in 0..8 {
            debouncer.poke();
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let fired = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&fired);
        let debouncer = Debouncer::new(Duration::from_millis(100), move || {
            let seen = Arc::clone(&seen);
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        debouncer.poke();
        tokio::time::sleep(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        debouncer.poke();
        tokio::time::sleep(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }
}
