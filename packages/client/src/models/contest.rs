use chrono::{DateTime, Utc};
use common::{ContestRule, Language};
use serde::{Deserialize, Serialize};

/// A problem slot inside a contest. Order in the containing vec is the
/// problem index used in URLs.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestProblem {
    pub id: i64,
    pub title: String,
}

/// Full contest record from `GET /contests/public/:id`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub rule: ContestRule,
    /// Language whitelist; non-empty by server invariant.
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub has_password: bool,
    #[serde(default)]
    pub participant_count: u64,
    #[serde(default)]
    pub problems: Vec<ContestProblem>,
}

impl Contest {
    /// Local "contest ended" gate. Only OI contests are gated client-side;
    /// for other rules the server is authoritative.
    pub fn locally_ended(&self, now: DateTime<Utc>) -> bool {
        self.rule.is_locally_end_gated() && now > self.end_time
    }
}

/// A contest tile on the listing page.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestSummary {
    pub id: i64,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub rule: ContestRule,
    #[serde(default)]
    pub has_password: bool,
    #[serde(default)]
    pub participant_count: u64,
}

/// Paginated contest listing. The same shape is cached verbatim under the
/// session `contestListCache` key.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestList {
    #[serde(default)]
    pub items: Vec<ContestSummary>,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub page_size: u64,
    #[serde(default)]
    pub total: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct JoinRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct JoinResponse {
    #[serde(default)]
    pub success: bool,
}

/// An attachment entry from `GET /contests/public/:id/attachments`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
}
