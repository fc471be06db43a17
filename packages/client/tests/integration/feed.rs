use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use serde_json::json;

use cress_client::feed::{FeedHandle, FeedScope};

use crate::common::TestApp;

#[tokio::test]
async fn feed_polls_and_exposes_the_latest_snapshot() {
    let app = TestApp::spawn().await;
    app.state.set_submissions(json!([
        {"id": 1, "problemId": 10, "status": "Pending"},
        {"id": 2, "problemId": 10, "status": "Accepted"}
    ]));

    let feed = FeedHandle::start(
        Arc::clone(&app.ctx.gateway),
        FeedScope::Global,
        Duration::from_millis(50),
        Some(20),
    );
    tokio::time::sleep(Duration::from_millis(200)).await;

    let latest = feed.latest();
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].id, 1);
    assert!(app.state.submission_lists.load(Ordering::SeqCst) >= 2);
    feed.stop();
}

#[tokio::test]
async fn feed_reflects_status_transitions_between_polls() {
    let app = TestApp::spawn().await;
    app.state
        .set_submissions(json!([{"id": 5, "problemId": 10, "status": "Pending"}]));

    let feed = FeedHandle::start(
        Arc::clone(&app.ctx.gateway),
        FeedScope::Contest(1),
        Duration::from_millis(50),
        None,
    );
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(!feed.latest()[0].status.is_terminal());

    app.state
        .set_submissions(json!([{"id": 5, "problemId": 10, "status": "Wrong Answer"}]));
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(feed.latest()[0].status.is_terminal());
    feed.stop();
}

#[tokio::test]
async fn stopped_feed_issues_no_further_requests() {
    let app = TestApp::spawn().await;

    let feed = FeedHandle::start(
        Arc::clone(&app.ctx.gateway),
        FeedScope::Global,
        Duration::from_millis(50),
        None,
    );
    tokio::time::sleep(Duration::from_millis(150)).await;
    feed.stop();
    assert!(feed.is_stopped());

    // Let a request already in flight at stop time settle.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let after_stop = app.state.submission_lists.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(app.state.submission_lists.load(Ordering::SeqCst), after_stop);
}
