//! Contest listing with the session-scoped `contestListCache` write-around:
//! the last successful page is cached so a back-navigation can paint before
//! the refresh lands.

use std::sync::Arc;

use tracing::warn;

use crate::api::ApiGateway;
use crate::error::ApiError;
use crate::models::ContestList;
use crate::storage::{SessionStore, get_json, keys, set_json};

pub struct ContestDirectory {
    gateway: Arc<ApiGateway>,
    session: Arc<SessionStore>,
}

impl ContestDirectory {
    pub fn new(gateway: Arc<ApiGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// The last cached listing, if any.
    pub fn cached(&self) -> Option<ContestList> {
        get_json(self.session.as_ref(), keys::CONTEST_LIST_CACHE)
    }

    /// Fetch a page, optionally filtered by name, and refresh the cache. A
    /// failed fetch leaves the cache untouched.
    pub async fn load(
        &self,
        page: u64,
        page_size: u64,
        filter: Option<&str>,
    ) -> Result<ContestList, ApiError> {
        match self.gateway.list_contests(page, page_size, filter).await {
            Ok(list) => {
                set_json(self.session.as_ref(), keys::CONTEST_LIST_CACHE, &list);
                Ok(list)
            }
            Err(e) => {
                warn!(error = %e, "contest listing fetch failed");
                Err(e)
            }
        }
    }
}
