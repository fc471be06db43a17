use serde::Deserialize;
use thiserror::Error;

/// Structured error body returned by the judge API on failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Human-readable error description.
    #[serde(default)]
    pub error: String,
    /// Password attempts left before lockout, on contest join failures.
    #[serde(default)]
    pub remaining_attempts: Option<u32>,
}

/// Error kinds the client distinguishes.
///
/// Every non-2xx response folds into one of these; call sites surface them
/// locally (there is no global toast bus). 401 additionally latches the
/// gateway's auth-expired flag, and 403 against a contest endpoint evicts the
/// cached contest access at the call site.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401. The session is gone; the UI redirects to `/login`.
    #[error("authentication required")]
    AuthRequired,

    /// 403. Forwarded to the caller unchanged.
    #[error("{message}")]
    Forbidden { message: String },

    /// 404 on a single resource.
    #[error("{message}")]
    NotFound { message: String },

    /// 400/422. Surfaced verbatim; never retried automatically.
    #[error("{message}")]
    Validation {
        message: String,
        remaining_attempts: Option<u32>,
    },

    /// 429.
    #[error("rate limited")]
    RateLimited,

    /// Connection-level failure (DNS, refused, timeout, malformed body).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Anything else the server said.
    #[error("unexpected response ({status}): {message}")]
    Unexpected { status: u16, message: String },

    /// The configured API base could not be parsed into a URL.
    #[error("invalid API base URL: {0}")]
    BaseUrl(String),
}

impl ApiError {
    /// Classify a non-2xx response by status code and (possibly empty) body.
    pub(crate) fn from_status_body(status: u16, body: &str) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
        let message = parsed
            .as_ref()
            .map(|b| b.error.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));
        let remaining_attempts = parsed.and_then(|b| b.remaining_attempts);

        match status {
            401 => Self::AuthRequired,
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            429 => Self::RateLimited,
            400 | 422 => Self::Validation {
                message,
                remaining_attempts,
            },
            _ => Self::Unexpected { status, message },
        }
    }

    /// Remaining password attempts, when the server reported them.
    pub fn remaining_attempts(&self) -> Option<u32> {
        match self {
            Self::Validation {
                remaining_attempts, ..
            } => *remaining_attempts,
            _ => None,
        }
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
