//! Leaderboard projection: sort-toggle state, score banding, and the cell
//! views both layouts render. The desktop table and the mobile cards switch
//! at [`MOBILE_BREAKPOINT_PX`].

use std::sync::Arc;

use crate::access::AccessController;
use crate::api::ApiGateway;
use crate::error::ApiError;
use crate::models::leaderboard::{LeaderboardPage, ProblemScore};

/// Below this viewport width the card layout replaces the table.
pub const MOBILE_BREAKPOINT_PX: u32 = 640;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Rank,
    Score,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Rank => "rank",
            SortKey::Score => "score",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Query state for one leaderboard view. `sort` and `order` are passed to
/// the server untouched; the client only computes the toggle transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub page: u64,
    pub page_size: u64,
    pub sort: SortKey,
    pub order: SortOrder,
}

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
            sort: SortKey::Rank,
            order: SortOrder::Desc,
        }
    }
}

impl LeaderboardQuery {
    /// Click on a column header: the same column flips the order, a new
    /// column starts descending.
    pub fn toggled(self, key: SortKey) -> Self {
        let order = if self.sort == key {
            self.order.flipped()
        } else {
            SortOrder::Desc
        };
        Self {
            sort: key,
            order,
            ..self
        }
    }
}

/// Background highlight for a score cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Green,
    Yellow,
    Orange,
    Red,
}

/// Banding for visible scores. No submissions means no highlight.
pub fn band(score: u32, submission_count: u32) -> Option<Band> {
    if submission_count == 0 {
        return None;
    }
    Some(match score {
        100.. => Band::Green,
        60..=99 => Band::Yellow,
        1..=59 => Band::Orange,
        0 => Band::Red,
    })
}

/// What one per-problem cell renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    /// `<score>/<submissionCount>` with an optional highlight.
    Score { text: String, band: Option<Band> },
    /// Attendance only; "submitted" is highlighted green.
    Attendance { submitted: bool },
}

impl CellView {
    pub fn for_cell(score_visible: bool, cell: Option<ProblemScore>) -> Self {
        let cell = cell.unwrap_or_default();
        if score_visible {
            CellView::Score {
                text: format!("{}/{}", cell.score, cell.submission_count),
                band: band(cell.score, cell.submission_count),
            }
        } else {
            CellView::Attendance {
                submitted: cell.submission_count > 0,
            }
        }
    }

    pub fn text(&self) -> String {
        match self {
            CellView::Score { text, .. } => text.clone(),
            CellView::Attendance { submitted: true } => "submitted".to_string(),
            CellView::Attendance { submitted: false } => "-".to_string(),
        }
    }
}

/// Fetch one leaderboard page. A 403 evicts the cached contest access
/// before the error is surfaced.
pub async fn load(
    gateway: &ApiGateway,
    access: &Arc<AccessController>,
    contest_id: i64,
    query: LeaderboardQuery,
) -> Result<LeaderboardPage, ApiError> {
    match gateway
        .get_leaderboard(
            contest_id,
            query.page,
            query.page_size,
            query.sort.as_str(),
            query.order.as_str(),
        )
        .await
    {
        Ok(page) => Ok(page),
        Err(e) => {
            if e.is_forbidden() {
                access.note_forbidden(contest_id);
            }
            Err(e)
        }
    }
}
