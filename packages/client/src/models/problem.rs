use common::{Difficulty, Language};
use serde::{Deserialize, Serialize};

/// Per-language limit overrides in a problem's config block.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageLimits {
    #[serde(default)]
    pub time_limit: Option<u64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemConfig {
    #[serde(default)]
    pub cpp: Option<LanguageLimits>,
    #[serde(default)]
    pub python: Option<LanguageLimits>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub expected_output: String,
}

/// A problem statement as served to contestants.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: i64,
    pub title: String,
    /// Markdown with TeX; rendering is the embedder's concern.
    #[serde(default)]
    pub description: String,
    /// Milliseconds.
    #[serde(default)]
    pub time_limit: Option<u64>,
    /// Megabytes.
    #[serde(default)]
    pub memory_limit: Option<u64>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub config: Option<ProblemConfig>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub visible: Option<bool>,
}

impl Problem {
    /// Tags joined for display.
    pub fn tags_line(&self) -> String {
        self.tags.join(", ")
    }

    /// Effective time limit for `language`, preferring the per-language
    /// override over the problem-wide limit.
    pub fn time_limit_for(&self, language: Language) -> Option<u64> {
        let per_language = self.config.as_ref().and_then(|c| match language {
            Language::Cpp => c.cpp.as_ref(),
            Language::Python => c.python.as_ref(),
        });
        per_language.and_then(|l| l.time_limit).or(self.time_limit)
    }
}

/// Paginated problem listing from `GET /problems`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemList {
    #[serde(default)]
    pub items: Vec<Problem>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub problem_id: i64,
    pub code: String,
    pub language: Language,
    pub input: String,
}

/// Response from the custom-input run endpoint. Both fields are optional on
/// the wire.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
}
