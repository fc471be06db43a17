//! Terminal rendering helpers.

use common::SubmissionStatus;
use console::{Style, StyledObject, style};
use cress_client::leaderboard::Band;
use cress_client::models::Submission;

/// Verdict badge with the conventional judge colors.
pub fn status_badge(status: &SubmissionStatus) -> StyledObject<String> {
    let text = status.to_string();
    match status {
        SubmissionStatus::Accepted => style(text).green().bold(),
        SubmissionStatus::WrongAnswer => style(text).red().bold(),
        SubmissionStatus::Pending | SubmissionStatus::Submitted => style(text).yellow(),
        SubmissionStatus::TimeLimitExceeded | SubmissionStatus::MemoryLimitExceeded => {
            style(text).magenta()
        }
        SubmissionStatus::RuntimeError | SubmissionStatus::CompileError => style(text).cyan(),
        SubmissionStatus::SystemError => style(text).red(),
        SubmissionStatus::Other(_) => style(text).dim(),
    }
}

pub fn band_style(band: Option<Band>) -> Style {
    match band {
        Some(Band::Green) => Style::new().green(),
        Some(Band::Yellow) => Style::new().yellow(),
        Some(Band::Orange) => Style::new().color256(208),
        Some(Band::Red) => Style::new().red(),
        None => Style::new().dim(),
    }
}

pub fn print_submission_row(submission: &Submission) {
    let when = submission
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let score = submission
        .score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "#{:<6} problem {:<5} {:<20} score {:>3}  {}",
        submission.id,
        submission.problem_id,
        status_badge(&submission.status),
        score,
        when,
    );
}
