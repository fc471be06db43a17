//! Contest access controller. Remembers cleared password gates for the
//! session and gates navigation into `/contest/:id/*` pages.
//!
//! Per contest the session store holds `contest_access_<id>` (literal
//! `"true"`) and `contest_access_meta_<id>` (`{verifiedAt, expiresAt}`).
//! Verified access is valid while `now < expiresAt`; expiry or any 403 from
//! a contest endpoint evicts both keys.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::ApiGateway;
use crate::error::ApiError;
use crate::models::{Contest, ContestSummary};
use crate::routes::Route;
use crate::storage::{KvStore, SessionStore, get_json, keys, set_json};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessMeta {
    pub verified_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessState {
    Unseen,
    Verified { expires_at: DateTime<Utc> },
}

/// What entering a contest from a list tile resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Access is settled; navigate to the contest page.
    Navigate(Route),
    /// A password is needed; open the modal.
    PasswordRequired,
}

/// Client-side advisory only; never blocks the join call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

/// `None` for empty input (the meter is hidden).
pub fn password_strength(password: &str) -> Option<PasswordStrength> {
    if password.is_empty() {
        return None;
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if password.len() >= 8 && has_lower && has_upper && has_digit {
        Some(PasswordStrength::Strong)
    } else if password.len() >= 6 {
        Some(PasswordStrength::Medium)
    } else {
        Some(PasswordStrength::Weak)
    }
}

/// The message shown in the password modal: the server's error, with the
/// remaining attempt count appended when reported.
pub fn join_error_message(err: &ApiError) -> String {
    match err.remaining_attempts() {
        Some(n) => format!("{err} (remaining: {n})"),
        None => err.to_string(),
    }
}

pub struct AccessController {
    gateway: Arc<ApiGateway>,
    session: Arc<SessionStore>,
}

impl AccessController {
    pub fn new(gateway: Arc<ApiGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// Current access state. Reading an expired grant evicts it.
    pub fn state(&self, contest_id: i64, now: DateTime<Utc>) -> AccessState {
        let flag = self.session.get(&keys::contest_access(contest_id));
        let meta: Option<AccessMeta> =
            get_json(self.session.as_ref(), &keys::contest_access_meta(contest_id));
        match (flag.as_deref(), meta) {
            (Some("true"), Some(meta)) if now < meta.expires_at => AccessState::Verified {
                expires_at: meta.expires_at,
            },
            (None, None) => AccessState::Unseen,
            _ => {
                self.evict(contest_id);
                AccessState::Unseen
            }
        }
    }

    pub fn is_verified(&self, contest_id: i64, now: DateTime<Utc>) -> bool {
        matches!(self.state(contest_id, now), AccessState::Verified { .. })
    }

    /// Record a cleared gate. Both keys are written before any navigation.
    fn note_verified(&self, contest_id: i64, expires_at: DateTime<Utc>, now: DateTime<Utc>) {
        self.session.set(&keys::contest_access(contest_id), "true");
        set_json(
            self.session.as_ref(),
            &keys::contest_access_meta(contest_id),
            &AccessMeta {
                verified_at: now,
                expires_at,
            },
        );
    }

    /// Drop both access keys for a contest.
    pub fn evict(&self, contest_id: i64) {
        self.session.remove(&keys::contest_access(contest_id));
        self.session.remove(&keys::contest_access_meta(contest_id));
    }

    /// Eviction hook for any 403 returned by a contest endpoint.
    pub fn note_forbidden(&self, contest_id: i64) {
        debug!(contest_id, "contest endpoint returned 403, evicting cached access");
        self.evict(contest_id);
    }

    /// Fetch a contest through the eviction hook. Every consumer of
    /// `GET /contests/public/:id` goes through here so a 403 always drops
    /// the cached access keys.
    pub async fn get_contest(&self, contest_id: i64) -> Result<Contest, ApiError> {
        match self.gateway.get_contest(contest_id).await {
            Ok(contest) => Ok(contest),
            Err(e) => {
                if e.is_forbidden() {
                    self.note_forbidden(contest_id);
                }
                Err(e)
            }
        }
    }

    /// Entry rule from a contest list tile.
    ///
    /// Without a password requirement the contest is joined idempotently on
    /// the server and access recorded. With one, cached verified access
    /// navigates directly; otherwise the caller must collect a password and
    /// call `join`.
    pub async fn enter(
        &self,
        contest: &ContestSummary,
        now: DateTime<Utc>,
    ) -> Result<EntryOutcome, ApiError> {
        // Valid cached access short-circuits the join either way; re-entry
        // within the session is free of network calls.
        if self.is_verified(contest.id, now) {
            return Ok(EntryOutcome::Navigate(Route::Contest { id: contest.id }));
        }
        if !contest.has_password {
            self.join(contest.id, None, contest.end_time, now).await?;
            return Ok(EntryOutcome::Navigate(Route::Contest { id: contest.id }));
        }
        Ok(EntryOutcome::PasswordRequired)
    }

    /// Join protocol. On success access is recorded with
    /// `expires_at = contest_end`; on failure nothing is written and the
    /// error carries any remaining-attempt count.
    pub async fn join(
        &self,
        contest_id: i64,
        password: Option<String>,
        contest_end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        let response = self.gateway.join_contest(contest_id, password).await?;
        if !response.success {
            return Err(ApiError::Unexpected {
                status: 200,
                message: "join was not confirmed".to_string(),
            });
        }
        self.note_verified(contest_id, contest_end, now);
        Ok(())
    }
}
