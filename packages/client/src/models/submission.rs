use chrono::{DateTime, Utc};
use common::{Language, SubmissionStatus};
use serde::{Deserialize, Serialize};

/// Per-test-case verdict inside a submission detail.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResult {
    pub id: i64,
    #[serde(default)]
    pub status: SubmissionStatus,
    /// Milliseconds.
    #[serde(default)]
    pub time_used: Option<u64>,
    /// Kilobytes.
    #[serde(default)]
    pub memory_used: Option<u64>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub expected_output: Option<String>,
}

impl TestCaseResult {
    /// Accepted and Pending cases suppress the output preview.
    pub fn shows_output(&self) -> bool {
        !matches!(
            self.status,
            SubmissionStatus::Accepted | SubmissionStatus::Pending
        )
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub problem_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub contest_id: Option<i64>,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: SubmissionStatus,
    /// 0 to 100.
    #[serde(default)]
    pub score: Option<u32>,
    /// Milliseconds.
    #[serde(default)]
    pub time_used: Option<u64>,
    /// Kilobytes.
    #[serde(default)]
    pub memory_used: Option<u64>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub test_case_results: Vec<TestCaseResult>,
}

/// Body for `POST /submissions`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub problem_id: i64,
    pub code: String,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contest_id: Option<i64>,
}
