//! Wire types for the consumed judge API. Field names follow the server's
//! camelCase JSON contract.

pub mod auth;
pub mod contest;
pub mod leaderboard;
pub mod preferences;
pub mod problem;
pub mod settings;
pub mod submission;

pub use auth::User;
pub use contest::{Contest, ContestList, ContestSummary};
pub use leaderboard::{LeaderboardPage, LeaderboardRow, ProblemScore};
pub use preferences::{Preferences, Theme};
pub use problem::{Problem, TestCase};
pub use submission::{Submission, TestCaseResult};
