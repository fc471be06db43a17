use cress_client::models::ContestList;
use cress_client::storage::{get_json, keys};

use crate::common::TestApp;

#[tokio::test]
async fn listing_passes_the_filter_and_caches_the_page() {
    let app = TestApp::spawn().await;

    let list = app
        .ctx
        .contests
        .load(1, 20, Some("spring"))
        .await
        .expect("load");
    assert_eq!(list.items.len(), 1);
    assert_eq!(
        app.state.last_contest_filter.lock().unwrap().as_deref(),
        Some("spring")
    );

    let cached: ContestList =
        get_json(app.ctx.session.as_ref(), keys::CONTEST_LIST_CACHE).expect("cache");
    assert_eq!(cached.items[0].name, "Mock Round");
}

#[tokio::test]
async fn unfiltered_listing_sends_no_filter_param() {
    let app = TestApp::spawn().await;

    app.ctx.contests.load(1, 20, None).await.expect("load");
    assert!(app.state.last_contest_filter.lock().unwrap().is_none());
}
