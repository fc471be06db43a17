use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status of a submission as reported by the judge.
///
/// The wire value is a free-form string ("Wrong Answer", "wrongAnswer",
/// "WRONG ANSWER" all occur in practice). [`SubmissionStatus::normalize`] is
/// the single point where those strings are folded into this closed sum;
/// every badge, color, and translation branches on the variant, never on the
/// raw string. Unrecognized values are preserved in `Other` so nothing the
/// server says is silently lost.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubmissionStatus {
    /// Waiting to be picked up by the judge.
    Pending,
    /// Accepted by the submission endpoint, not yet queued.
    Submitted,
    /// All test cases passed.
    Accepted,
    /// Output did not match expected output.
    WrongAnswer,
    /// Exceeded time limit.
    TimeLimitExceeded,
    /// Exceeded memory limit.
    MemoryLimitExceeded,
    /// Program crashed or exited with a non-zero code.
    RuntimeError,
    /// Failed to compile.
    CompileError,
    /// Internal judge error.
    SystemError,
    /// Anything the client does not recognize, original string preserved.
    Other(String),
}

impl SubmissionStatus {
    /// Fold a wire status string into the sum.
    ///
    /// Matching is lexical: lowercase, all whitespace removed. "Wrong Answer",
    /// "wrong answer" and "WrongAnswer" agree.
    pub fn normalize(s: &str) -> Self {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(|c| c.to_lowercase())
            .collect();
        match key.as_str() {
            "pending" => Self::Pending,
            "submitted" => Self::Submitted,
            "accepted" => Self::Accepted,
            "wronganswer" => Self::WrongAnswer,
            "timelimitexceeded" => Self::TimeLimitExceeded,
            "memorylimitexceeded" => Self::MemoryLimitExceeded,
            "runtimeerror" => Self::RuntimeError,
            "compileerror" | "compilationerror" => Self::CompileError,
            "systemerror" => Self::SystemError,
            _ => Self::Other(s.to_string()),
        }
    }

    /// Returns true once judging is complete and the verdict will not change.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Submitted)
    }

    /// Returns true if this is a successful verdict.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Canonical display string (PascalCase words separated by spaces).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Submitted => "Submitted",
            Self::Accepted => "Accepted",
            Self::WrongAnswer => "Wrong Answer",
            Self::TimeLimitExceeded => "Time Limit Exceeded",
            Self::MemoryLimitExceeded => "Memory Limit Exceeded",
            Self::RuntimeError => "Runtime Error",
            Self::CompileError => "Compile Error",
            Self::SystemError => "System Error",
            Self::Other(s) => s,
        }
    }

    /// All recognized (non-`Other`) status values.
    pub const KNOWN: &'static [SubmissionStatus] = &[
        Self::Pending,
        Self::Submitted,
        Self::Accepted,
        Self::WrongAnswer,
        Self::TimeLimitExceeded,
        Self::MemoryLimitExceeded,
        Self::RuntimeError,
        Self::CompileError,
        Self::SystemError,
    ];
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl From<String> for SubmissionStatus {
    fn from(s: String) -> Self {
        Self::normalize(&s)
    }
}

impl From<SubmissionStatus> for String {
    fn from(status: SubmissionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl FromStr for SubmissionStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::normalize(s))
    }
}
