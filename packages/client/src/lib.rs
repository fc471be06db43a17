//! Client library for an online-judge platform: typed API gateway,
//! auth/session service, preferences store, contest access control, polled
//! submission feeds, the problem workspace, and leaderboard projection.

pub mod access;
pub mod api;
pub mod auth;
pub mod config;
pub mod contests;
pub mod context;
pub mod debounce;
pub mod error;
pub mod feed;
pub mod leaderboard;
pub mod models;
pub mod preferences;
pub mod probe;
pub mod routes;
pub mod storage;
pub mod submission_view;
pub mod ticker;
pub mod workspace;

pub use access::{AccessController, AccessState, EntryOutcome};
pub use api::ApiGateway;
pub use auth::{AuthSession, RouteDecision};
pub use config::ClientConfig;
pub use context::ClientContext;
pub use error::ApiError;
pub use feed::{FeedHandle, FeedScope};
pub use preferences::PreferencesStore;
pub use routes::Route;
pub use workspace::ProblemWorkspace;
