use std::sync::Arc;
use std::sync::atomic::Ordering;

use chrono::Utc;
use common::Language;

use cress_client::workspace::{ProblemWorkspace, RunError, SubmitError};

use crate::common::TestApp;

#[tokio::test]
async fn contest_workspace_loads_problem_and_contest_in_parallel() {
    let app = TestApp::spawn().await;

    let workspace = ProblemWorkspace::open_contest(
        Arc::clone(&app.ctx.gateway),
        Arc::clone(&app.ctx.access),
        1,
        0,
    )
    .await
    .expect("open");

    assert_eq!(workspace.problem().id, 10);
    assert_eq!(workspace.contest().expect("contest").id, 1);
    // cpp is whitelisted, so the default selection stands.
    assert_eq!(workspace.language(), Language::Cpp);
}

#[tokio::test]
async fn submit_posts_and_navigates_to_submissions() {
    let app = TestApp::spawn_signed_in().await;

    let workspace = ProblemWorkspace::open_problem(Arc::clone(&app.ctx.gateway), 10, None)
        .await
        .expect("open");
    workspace.set_code("print(1)");
    workspace.set_language(Language::Python);

    let route = workspace.submit(Utc::now()).await.expect("submit");
    assert_eq!(route, cress_client::Route::Submissions);
    assert_eq!(app.state.submission_posts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rate_limited_run_maps_to_the_rate_limited_error() {
    let app = TestApp::spawn().await;
    app.state.run_rate_limited.store(true, Ordering::SeqCst);

    let workspace = ProblemWorkspace::open_problem(Arc::clone(&app.ctx.gateway), 10, None)
        .await
        .expect("open");
    workspace.set_code("print(1)");

    let err = workspace.run("1 2", Utc::now()).await.unwrap_err();
    assert!(matches!(err, RunError::RateLimited));
    assert_eq!(err.to_string(), "rate limited");
}

#[tokio::test]
async fn successful_run_returns_status_and_output() {
    let app = TestApp::spawn().await;

    let workspace = ProblemWorkspace::open_problem(Arc::clone(&app.ctx.gateway), 10, None)
        .await
        .expect("open");
    workspace.set_code("print(1+2)");

    let response = workspace.run("1 2", Utc::now()).await.expect("run");
    assert_eq!(response.status.as_deref(), Some("Accepted"));
    assert_eq!(response.output.as_deref(), Some("3\n"));
}

#[tokio::test]
async fn ended_oi_contest_rejects_submit_without_a_request() {
    let app = TestApp::spawn().await;

    let workspace = ProblemWorkspace::open_contest(
        Arc::clone(&app.ctx.gateway),
        Arc::clone(&app.ctx.access),
        crate::common::ENDED_OI_CONTEST,
        0,
    )
    .await
    .expect("open");
    workspace.set_code("int main() {}");

    let err = workspace.submit(Utc::now()).await.unwrap_err();
    assert!(matches!(err, SubmitError::ContestEnded));
    assert_eq!(err.to_string(), "contest ended");
    assert_eq!(app.state.submission_posts.load(Ordering::SeqCst), 0);

    let err = workspace.run("1 2", Utc::now()).await.unwrap_err();
    assert!(matches!(err, RunError::ContestEnded));
}
