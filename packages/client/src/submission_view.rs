//! Submission detail presentation: tab selection and the wrong-answer
//! output diff.

use common::SubmissionStatus;
use common::diff::{OutputDiff, diff_outputs};

use crate::models::submission::{Submission, TestCaseResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailTab {
    TestPoints,
    SourceCode,
}

/// Test points when per-case results exist, else source.
pub fn default_tab(submission: &Submission) -> DetailTab {
    if submission.test_case_results.is_empty() {
        DetailTab::SourceCode
    } else {
        DetailTab::TestPoints
    }
}

/// Line diff for a wrong-answer case. Other verdicts have no diff view.
pub fn wrong_answer_diff(case: &TestCaseResult) -> Option<OutputDiff> {
    if case.status != SubmissionStatus::WrongAnswer {
        return None;
    }
    let expected = case.expected_output.as_deref().unwrap_or_default();
    let actual = case.output.as_deref().unwrap_or_default();
    Some(diff_outputs(expected, actual))
}
