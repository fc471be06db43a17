use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The URL surface the client owns. Paths round-trip through
/// [`Route::to_path`] and [`Route::from_str`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Problems,
    /// Accepts `?contestId=` to constrain the language whitelist.
    Problem {
        id: i64,
        contest_id: Option<i64>,
    },
    Submissions,
    Submission {
        id: i64,
    },
    ContestList,
    Contest {
        id: i64,
    },
    ContestLeaderboard {
        id: i64,
    },
    ContestSubmissions {
        id: i64,
    },
    /// `order` is the problem's position in the contest problem list.
    ContestProblem {
        id: i64,
        order: usize,
    },
}

impl Route {
    pub fn to_path(self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Problems => "/problems".to_string(),
            Route::Problem {
                id,
                contest_id: None,
            } => format!("/problem/{id}"),
            Route::Problem {
                id,
                contest_id: Some(contest_id),
            } => format!("/problem/{id}?contestId={contest_id}"),
            Route::Submissions => "/submissions".to_string(),
            Route::Submission { id } => format!("/submission/{id}"),
            Route::ContestList => "/contest".to_string(),
            Route::Contest { id } => format!("/contest/{id}"),
            Route::ContestLeaderboard { id } => format!("/contest/{id}/leaderboard"),
            Route::ContestSubmissions { id } => format!("/contest/{id}/submissions"),
            Route::ContestProblem { id, order } => format!("/contest/{id}/problem/{order}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown route: {0}")]
pub struct ParseRouteError(String);

impl FromStr for Route {
    type Err = ParseRouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRouteError(s.to_string());
        let (path, query) = match s.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (s, None),
        };
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        let route = match segments.as_slice() {
            [""] => Route::Home,
            ["login"] => Route::Login,
            ["problems"] => Route::Problems,
            ["problem", id] => Route::Problem {
                id: id.parse().map_err(|_| err())?,
                contest_id: query.and_then(query_contest_id),
            },
            ["submissions"] => Route::Submissions,
            ["submission", id] => Route::Submission {
                id: id.parse().map_err(|_| err())?,
            },
            ["contest"] => Route::ContestList,
            ["contest", id] => Route::Contest {
                id: id.parse().map_err(|_| err())?,
            },
            ["contest", id, "leaderboard"] => Route::ContestLeaderboard {
                id: id.parse().map_err(|_| err())?,
            },
            ["contest", id, "submissions"] => Route::ContestSubmissions {
                id: id.parse().map_err(|_| err())?,
            },
            ["contest", id, "problem", order] => Route::ContestProblem {
                id: id.parse().map_err(|_| err())?,
                order: order.parse().map_err(|_| err())?,
            },
            _ => return Err(err()),
        };
        Ok(route)
    }
}

fn query_contest_id(query: &str) -> Option<i64> {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("contestId="))
        .and_then(|v| v.parse().ok())
}
