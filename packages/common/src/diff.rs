//! Line diff between expected and actual program output.
//!
//! Powers the wrong-answer view on a submission: each line is tagged
//! added/removed/unchanged and the header shows how many expected lines
//! matched. The comparison is positional, not an LCS; judges compare output
//! line by line, so the projection does too.

use serde::Serialize;

/// Tag for a single rendered diff line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffTag {
    /// Present in the actual output but not expected at this position.
    Added,
    /// Expected at this position but missing from the actual output.
    Removed,
    /// Identical at this position.
    Same,
}

/// One rendered line of the diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub tag: DiffTag,
    pub text: String,
}

/// A computed output diff with its summary counters.
///
/// `same + different == expected_lines`; `different` counts expected lines
/// that did not match, so extra trailing actual lines show up as `Added`
/// entries without affecting the counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutputDiff {
    pub lines: Vec<DiffLine>,
    pub same: usize,
    pub different: usize,
    pub expected_lines: usize,
}

/// Fold CRLF and lone CR line endings into LF.
pub fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Compute the positional line diff of `expected` against `actual`.
///
/// A position counts as matching when both lines are equal, or when the
/// actual output has ended and the remaining expected line is empty (a bare
/// trailing newline is not an error).
pub fn diff_outputs(expected: &str, actual: &str) -> OutputDiff {
    let expected = normalize_newlines(expected);
    let actual = normalize_newlines(actual);

    let expected_lines: Vec<&str> = expected.split('\n').collect();
    let actual_lines: Vec<&str> = actual.split('\n').collect();

    let mut lines = Vec::new();
    let mut same = 0usize;

    let max = expected_lines.len().max(actual_lines.len());
    for i in 0..max {
        let exp = expected_lines.get(i);
        let act = actual_lines.get(i);
        let matches = match (exp, act) {
            (Some(e), Some(a)) => e == a,
            (Some(e), None) => e.is_empty(),
            (None, _) => false,
        };

        if matches {
            same += 1;
            if let Some(e) = exp {
                lines.push(DiffLine {
                    tag: DiffTag::Same,
                    text: (*e).to_string(),
                });
            }
        } else {
            if let Some(e) = exp {
                lines.push(DiffLine {
                    tag: DiffTag::Removed,
                    text: (*e).to_string(),
                });
            }
            if let Some(a) = act {
                lines.push(DiffLine {
                    tag: DiffTag::Added,
                    text: (*a).to_string(),
                });
            }
        }
    }

    let different = expected_lines.len().saturating_sub(same);

    OutputDiff {
        lines,
        same,
        different,
        expected_lines: expected_lines.len(),
    }
}
