use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-problem score cell for one participant.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemScore {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub submission_count: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub rank: u32,
    pub username: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub submission_count: u32,
    /// Keyed by problem id (as a string on the wire).
    #[serde(default)]
    pub problem_scores: HashMap<String, ProblemScore>,
}

impl LeaderboardRow {
    pub fn problem_score(&self, problem_id: i64) -> Option<ProblemScore> {
        self.problem_scores.get(&problem_id.to_string()).copied()
    }
}

/// One page of `GET /contests/public/:id/leaderboard`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardPage {
    #[serde(default)]
    pub items: Vec<LeaderboardRow>,
    /// Server-controlled; when false, numeric scores are hidden and cells
    /// show attendance only.
    #[serde(default)]
    pub score_visible: bool,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}
