use std::fmt;

use serde::{Deserialize, Serialize};

/// Problem difficulty band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "LEVEL1")]
    Level1,
    #[serde(rename = "LEVEL2")]
    Level2,
    #[serde(rename = "LEVEL3")]
    Level3,
    #[serde(rename = "LEVEL4")]
    Level4,
    #[serde(rename = "LEVEL5")]
    Level5,
    #[serde(rename = "LEVEL6")]
    Level6,
    #[serde(rename = "LEVEL7")]
    Level7,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Level1 => "LEVEL1",
            Self::Level2 => "LEVEL2",
            Self::Level3 => "LEVEL3",
            Self::Level4 => "LEVEL4",
            Self::Level5 => "LEVEL5",
            Self::Level6 => "LEVEL6",
            Self::Level7 => "LEVEL7",
        }
    }

    /// 1-based numeric level.
    pub fn level(&self) -> u8 {
        match self {
            Self::Level1 => 1,
            Self::Level2 => 2,
            Self::Level3 => 3,
            Self::Level4 => 4,
            Self::Level5 => 5,
            Self::Level6 => 6,
            Self::Level7 => 7,
        }
    }
}

impl Default for Difficulty {
    /// Problems without an assigned difficulty render as LEVEL2.
    fn default() -> Self {
        Self::Level2
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
