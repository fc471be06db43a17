//! Polled submission feed. A feed is owned by the viewing surface and torn
//! down with it; after [`FeedHandle::stop`] no request is issued and no
//! response writes state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::warn;

use crate::api::ApiGateway;
use crate::models::Submission;
use crate::ticker::{self, TickerHandle};

/// Which submission list to poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedScope {
    /// All recent submissions.
    Global,
    /// The session user's submissions; the server scopes by credentials.
    Mine,
    /// Submissions within one contest.
    Contest(i64),
}

impl FeedScope {
    pub fn contest_id(&self) -> Option<i64> {
        match self {
            FeedScope::Contest(id) => Some(*id),
            FeedScope::Global | FeedScope::Mine => None,
        }
    }
}

pub struct FeedHandle {
    latest: Arc<RwLock<Vec<Submission>>>,
    alive: Arc<AtomicBool>,
    ticker: TickerHandle,
}

impl FeedHandle {
    /// Fetch once immediately, then every `period`. Errors are logged and
    /// the loop continues; the interval never widens.
    pub fn start(
        gateway: Arc<ApiGateway>,
        scope: FeedScope,
        period: Duration,
        limit: Option<u32>,
    ) -> Self {
        let latest = Arc::new(RwLock::new(Vec::new()));
        let alive = Arc::new(AtomicBool::new(true));

        {
            let gateway = Arc::clone(&gateway);
            let latest = Arc::clone(&latest);
            let alive = Arc::clone(&alive);
            tokio::spawn(async move {
                refresh(&gateway, scope, limit, &latest, &alive).await;
            });
        }

        let ticker = {
            let latest = Arc::clone(&latest);
            let alive = Arc::clone(&alive);
            ticker::start(period, move || {
                let gateway = Arc::clone(&gateway);
                let latest = Arc::clone(&latest);
                let alive = Arc::clone(&alive);
                async move {
                    refresh(&gateway, scope, limit, &latest, &alive).await;
                }
            })
        };

        Self {
            latest,
            alive,
            ticker,
        }
    }

    /// Snapshot of the most recent successful fetch, in server order.
    pub fn latest(&self) -> Vec<Submission> {
        self.latest
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Tear the feed down. In-flight responses are dropped.
    pub fn stop(&self) {
        self.alive.store(false, Ordering::SeqCst);
        self.ticker.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        !self.alive.load(Ordering::SeqCst)
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn refresh(
    gateway: &ApiGateway,
    scope: FeedScope,
    limit: Option<u32>,
    latest: &RwLock<Vec<Submission>>,
    alive: &AtomicBool,
) {
    if !alive.load(Ordering::SeqCst) {
        return;
    }
    match gateway.list_submissions(scope.contest_id(), limit).await {
        Ok(items) => {
            // The owner may have stopped the feed while this was in flight.
            if alive.load(Ordering::SeqCst) {
                *latest.write().unwrap_or_else(|e| e.into_inner()) = items;
            }
        }
        Err(e) => warn!(error = %e, ?scope, "submission poll failed"),
    }
}
