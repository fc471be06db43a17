use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Programming language accepted by the judge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    Python,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpp => "cpp",
            Self::Python => "python",
        }
    }

    /// All supported languages, in preference order.
    pub const ALL: &'static [Language] = &[Self::Cpp, Self::Python];

    /// Pick a language from a contest whitelist, keeping `current` when it is
    /// allowed. Preference otherwise: `cpp` if allowed, else the first
    /// whitelisted entry. Returns `None` for an empty whitelist (the contract
    /// guarantees non-empty; callers treat `None` as "leave unchanged").
    pub fn pick_allowed(current: Language, whitelist: &[Language]) -> Option<Language> {
        if whitelist.is_empty() {
            return None;
        }
        if whitelist.contains(&current) {
            return Some(current);
        }
        if whitelist.contains(&Language::Cpp) {
            return Some(Language::Cpp);
        }
        whitelist.first().copied()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an unsupported language string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language '{0}', expected one of: cpp, python")]
pub struct ParseLanguageError(String);

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpp" | "c++" => Ok(Self::Cpp),
            "python" | "py" => Ok(Self::Python),
            other => Err(ParseLanguageError(other.to_string())),
        }
    }
}
