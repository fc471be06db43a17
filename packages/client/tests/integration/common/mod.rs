//! In-process mock judge API plus a client wired against it.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};

use cress_client::config::{ApiConfig, ClientConfig, PollConfig};
use cress_client::ClientContext;

/// Contest end time the mock hands out everywhere.
pub const CONTEST_END: &str = "2099-01-01T00:00:00Z";

/// Scriptable behavior and call counters, shared with the tests.
#[derive(Default)]
pub struct MockState {
    pub join_calls: AtomicU32,
    pub submission_posts: AtomicU32,
    pub submission_lists: AtomicU32,
    pub preference_puts: Mutex<Vec<Value>>,
    /// `{error, remainingAttempts}` body returned with 400 when set.
    pub join_failure: Mutex<Option<(String, Option<u32>)>>,
    /// When set, `GET /contests/public/{id}` answers 403.
    pub contest_forbidden: AtomicBool,
    /// When set, `POST /run` answers 429.
    pub run_rate_limited: AtomicBool,
    /// `GET /auth/me` body; 401 when `None`.
    pub me_user: Mutex<Option<Value>>,
    /// `GET /submissions` body.
    pub submissions: Mutex<Value>,
    /// Last bearer token the mock saw.
    pub last_bearer: Mutex<Option<String>>,
    /// `filter` param of the last contest listing request.
    pub last_contest_filter: Mutex<Option<String>>,
    pub password_changes: AtomicU32,
}

pub struct TestApp {
    pub ctx: ClientContext,
    pub state: Arc<MockState>,
    _local_dir: tempfile::TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState {
            submissions: Mutex::new(json!([])),
            ..Default::default()
        });
        let addr = serve(Arc::clone(&state)).await;

        let local_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = ClientConfig {
            api: ApiConfig {
                origin: format!("http://{addr}"),
                base_path: "/api".into(),
            },
            poll: PollConfig {
                submissions_ms: 50,
                code_history_ms: 50,
            },
            local_store_path: Some(local_dir.path().join("local.json")),
            ..Default::default()
        };
        let ctx = ClientContext::new(config).expect("Failed to build client context");

        Self {
            ctx,
            state,
            _local_dir: local_dir,
        }
    }

    /// Spawn and sign the mock's default user in.
    pub async fn spawn_signed_in() -> Self {
        let app = Self::spawn().await;
        app.state.set_me(json!({"id": 1, "username": "alice", "role": "STUDENT"}));
        app.ctx
            .auth
            .login("alice", "secret", None)
            .await
            .expect("Login against mock failed");
        app
    }
}

impl MockState {
    pub fn set_me(&self, user: Value) {
        *self.me_user.lock().unwrap() = Some(user);
    }

    pub fn set_join_failure(&self, error: &str, remaining: Option<u32>) {
        *self.join_failure.lock().unwrap() = Some((error.to_string(), remaining));
    }

    pub fn set_submissions(&self, submissions: Value) {
        *self.submissions.lock().unwrap() = submissions;
    }
}

async fn serve(state: Arc<MockState>) -> SocketAddr {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(|| async { Json(json!({})) }))
        .route("/api/auth/me", get(me))
        .route("/api/auth/change-password", post(change_password))
        .route("/api/contests/public", get(list_contests))
        .route("/api/contests/{id}/join", post(join))
        .route("/api/contests/public/{id}", get(contest))
        .route("/api/contests/public/{id}/problem/{order}", get(contest_problem))
        .route("/api/contests/public/{id}/leaderboard", get(leaderboard))
        .route("/api/problems/{id}", get(problem))
        .route("/api/run", post(run))
        .route("/api/submissions", get(list_submissions).post(create_submission))
        .route("/api/user/preferences", get(get_preferences).put(put_preferences))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock listener");
    let addr = listener.local_addr().expect("Failed to read mock address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock server exited");
    });
    addr
}

fn record_bearer(state: &MockState, headers: &HeaderMap) {
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    if bearer.is_some() {
        *state.last_bearer.lock().unwrap() = bearer;
    }
}

async fn login(State(state): State<Arc<MockState>>) -> Response {
    let user = state
        .me_user
        .lock()
        .unwrap()
        .clone()
        .unwrap_or_else(|| json!({"id": 1, "username": "alice", "role": "STUDENT"}));
    Json(json!({"token": "test-token", "user": user})).into_response()
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    record_bearer(&state, &headers);
    match state.me_user.lock().unwrap().clone() {
        Some(user) => Json(user).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Not signed in"})),
        )
            .into_response(),
    }
}

async fn change_password(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    record_bearer(&state, &headers);
    if state.last_bearer.lock().unwrap().is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Not signed in"})),
        )
            .into_response();
    }
    state.password_changes.fetch_add(1, Ordering::SeqCst);
    Json(json!({})).into_response()
}

async fn list_contests(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    *state.last_contest_filter.lock().unwrap() = params.get("filter").cloned();
    Json(json!({
        "items": [{
            "id": 1,
            "name": "Mock Round",
            "startTime": "2024-01-01T00:00:00Z",
            "endTime": CONTEST_END,
            "rule": "IOI",
            "hasPassword": true,
            "participantCount": 3
        }],
        "page": 1,
        "pageSize": 20,
        "total": 1
    }))
}

async fn join(State(state): State<Arc<MockState>>, Path(_id): Path<i64>) -> Response {
    state.join_calls.fetch_add(1, Ordering::SeqCst);
    if let Some((error, remaining)) = state.join_failure.lock().unwrap().clone() {
        let mut body = json!({"error": error});
        if let Some(n) = remaining {
            body["remainingAttempts"] = json!(n);
        }
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }
    Json(json!({"success": true})).into_response()
}

/// Contest id the mock serves as an OI round that already ended.
pub const ENDED_OI_CONTEST: i64 = 100;

fn contest_body(id: i64) -> Value {
    if id == ENDED_OI_CONTEST {
        return json!({
            "id": id,
            "name": "Finished OI Round",
            "startTime": "2020-01-01T00:00:00Z",
            "endTime": "2020-01-01T03:00:00Z",
            "rule": "OI",
            "languages": ["cpp"],
            "isPublished": true,
            "hasPassword": false,
            "participantCount": 5,
            "problems": [{"id": 10, "title": "A"}]
        });
    }
    json!({
        "id": id,
        "name": "Mock Round",
        "startTime": "2024-01-01T00:00:00Z",
        "endTime": CONTEST_END,
        "rule": "IOI",
        "languages": ["cpp", "python"],
        "isPublished": true,
        "hasPassword": true,
        "participantCount": 3,
        "problems": [{"id": 10, "title": "A"}]
    })
}

async fn contest(State(state): State<Arc<MockState>>, Path(id): Path<i64>) -> Response {
    if state.contest_forbidden.load(Ordering::SeqCst) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "Contest access required"})),
        )
            .into_response();
    }
    Json(contest_body(id)).into_response()
}

async fn contest_problem(
    State(state): State<Arc<MockState>>,
    Path((_id, _order)): Path<(i64, usize)>,
) -> Response {
    if state.contest_forbidden.load(Ordering::SeqCst) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "Contest access required"})),
        )
            .into_response();
    }
    Json(json!({"id": 10, "title": "A", "description": "Add two numbers."})).into_response()
}

async fn leaderboard(State(state): State<Arc<MockState>>, Path(_id): Path<i64>) -> Response {
    if state.contest_forbidden.load(Ordering::SeqCst) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "Contest access required"})),
        )
            .into_response();
    }
    Json(json!({
        "items": [{
            "rank": 1,
            "username": "alice",
            "score": 100,
            "submissionCount": 2,
            "problemScores": {"10": {"score": 100, "submissionCount": 2}}
        }],
        "scoreVisible": true,
        "total": 1
    }))
    .into_response()
}

async fn problem(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({"id": id, "title": "Standalone", "description": "..."}))
}

async fn run(State(state): State<Arc<MockState>>) -> Response {
    if state.run_rate_limited.load(Ordering::SeqCst) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error": "Too many runs"})),
        )
            .into_response();
    }
    Json(json!({"status": "Accepted", "output": "3\n"})).into_response()
}

async fn list_submissions(State(state): State<Arc<MockState>>) -> Json<Value> {
    state.submission_lists.fetch_add(1, Ordering::SeqCst);
    Json(state.submissions.lock().unwrap().clone())
}

async fn create_submission(State(state): State<Arc<MockState>>) -> Json<Value> {
    state.submission_posts.fetch_add(1, Ordering::SeqCst);
    Json(json!({"id": 77, "problemId": 10, "status": "Pending"}))
}

async fn get_preferences() -> Json<Value> {
    Json(json!({"theme": "dark", "fontSize": 16}))
}

async fn put_preferences(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.preference_puts.lock().unwrap().push(body);
    Json(json!({}))
}
