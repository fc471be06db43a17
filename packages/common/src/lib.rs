pub mod contest_rule;
pub mod diff;
pub mod difficulty;
pub mod language;
pub mod pagination;
pub mod submission_status;

pub use contest_rule::ContestRule;
pub use difficulty::Difficulty;
pub use language::Language;
pub use pagination::Pagination;
pub use submission_status::SubmissionStatus;
