use std::sync::atomic::Ordering;

use chrono::Utc;

use cress_client::leaderboard::{self, Band, CellView, LeaderboardQuery};
use cress_client::storage::KvStore;

use crate::common::{CONTEST_END, TestApp};

#[tokio::test]
async fn leaderboard_page_projects_into_cell_views() {
    let app = TestApp::spawn().await;

    let board = leaderboard::load(
        &app.ctx.gateway,
        &app.ctx.access,
        1,
        LeaderboardQuery::default(),
    )
    .await
    .expect("load");

    assert!(board.score_visible);
    assert_eq!(board.total, 1);
    let row = &board.items[0];
    let cell = CellView::for_cell(board.score_visible, row.problem_score(10));
    assert_eq!(
        cell,
        CellView::Score {
            text: "100/2".into(),
            band: Some(Band::Green)
        }
    );
}

#[tokio::test]
async fn forbidden_leaderboard_evicts_cached_access() {
    let app = TestApp::spawn().await;
    app.ctx
        .access
        .join(1, Some("secret".into()), CONTEST_END.parse().unwrap(), Utc::now())
        .await
        .expect("join");

    app.state.contest_forbidden.store(true, Ordering::SeqCst);
    let err = leaderboard::load(
        &app.ctx.gateway,
        &app.ctx.access,
        1,
        LeaderboardQuery::default(),
    )
    .await
    .unwrap_err();

    assert!(err.is_forbidden());
    assert!(app.ctx.session.get("contest_access_1").is_none());
}
