use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Contest scoring convention.
///
/// OI: a single final submission per problem, no feedback until the end.
/// IOI: incremental scoring. ACM: first accepted counts, wrong attempts add
/// penalty. All three render through the same leaderboard projection; only OI
/// is end-gated on the client side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContestRule {
    Oi,
    Ioi,
    Acm,
}

impl ContestRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oi => "OI",
            Self::Ioi => "IOI",
            Self::Acm => "ACM",
        }
    }

    /// Whether the client rejects submissions locally once the contest ends.
    /// IOI/ACM late submits are left to the server to arbitrate.
    pub fn is_locally_end_gated(&self) -> bool {
        matches!(self, Self::Oi)
    }
}

impl fmt::Display for ContestRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid rule string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid contest rule '{0}', expected one of: OI, IOI, ACM")]
pub struct ParseRuleError(String);

impl FromStr for ContestRule {
    type Err = ParseRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OI" => Ok(Self::Oi),
            "IOI" => Ok(Self::Ioi),
            "ACM" => Ok(Self::Acm),
            other => Err(ParseRuleError(other.to_string())),
        }
    }
}
