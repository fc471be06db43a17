use std::sync::atomic::Ordering;

use chrono::{DateTime, Utc};

use cress_client::access::{join_error_message, AccessState, EntryOutcome};
use cress_client::storage::KvStore;
use cress_client::Route;

use crate::common::{CONTEST_END, TestApp};

fn now() -> DateTime<Utc> {
    Utc::now()
}

mod join_failure {
    use super::*;

    #[tokio::test]
    async fn failed_join_surfaces_remaining_attempts_and_writes_nothing() {
        let app = TestApp::spawn().await;
        app.state.set_join_failure("Wrong password", Some(2));

        let err = app
            .ctx
            .access
            .join(3, Some("bad".into()), CONTEST_END.parse().unwrap(), now())
            .await
            .unwrap_err();

        assert_eq!(join_error_message(&err), "Wrong password (remaining: 2)");
        assert!(app.ctx.session.get("contest_access_3").is_none());
        assert!(app.ctx.session.get("contest_access_meta_3").is_none());
    }
}

mod join_success {
    use super::*;

    #[tokio::test]
    async fn successful_join_records_access_until_contest_end() {
        let app = TestApp::spawn().await;

        app.ctx
            .access
            .join(2, Some("secret".into()), CONTEST_END.parse().unwrap(), now())
            .await
            .expect("join");

        assert_eq!(
            app.ctx.session.get("contest_access_2").as_deref(),
            Some("true")
        );
        let meta: serde_json::Value = serde_json::from_str(
            &app.ctx.session.get("contest_access_meta_2").expect("meta"),
        )
        .expect("meta is JSON");
        let expires: DateTime<Utc> = meta["expiresAt"].as_str().unwrap().parse().unwrap();
        assert_eq!(expires, CONTEST_END.parse::<DateTime<Utc>>().unwrap());

        assert_eq!(
            app.ctx.access.state(2, now()),
            AccessState::Verified { expires_at: expires }
        );
    }
}

mod idempotence {
    use super::*;

    #[tokio::test]
    async fn re_entering_a_verified_contest_skips_the_join_call() {
        let app = TestApp::spawn().await;
        let contest = app.ctx.gateway.get_contest(5).await.expect("contest");
        let summary = cress_client::models::ContestSummary {
            id: contest.id,
            name: contest.name.clone(),
            start_time: contest.start_time,
            end_time: contest.end_time,
            rule: contest.rule,
            has_password: contest.has_password,
            participant_count: contest.participant_count,
        };

        app.ctx
            .access
            .join(5, Some("secret".into()), contest.end_time, now())
            .await
            .expect("join");
        assert_eq!(app.state.join_calls.load(Ordering::SeqCst), 1);

        let outcome = app.ctx.access.enter(&summary, now()).await.expect("enter");
        assert_eq!(outcome, EntryOutcome::Navigate(Route::Contest { id: 5 }));
        assert_eq!(app.state.join_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unverified_password_contest_opens_the_modal() {
        let app = TestApp::spawn().await;
        let contest = app.ctx.gateway.get_contest(6).await.expect("contest");
        let summary = cress_client::models::ContestSummary {
            id: contest.id,
            name: contest.name,
            start_time: contest.start_time,
            end_time: contest.end_time,
            rule: contest.rule,
            has_password: true,
            participant_count: contest.participant_count,
        };

        let outcome = app.ctx.access.enter(&summary, now()).await.expect("enter");
        assert_eq!(outcome, EntryOutcome::PasswordRequired);
        assert_eq!(app.state.join_calls.load(Ordering::SeqCst), 0);
    }
}

mod eviction {
    use super::*;

    #[tokio::test]
    async fn a_403_from_a_contest_endpoint_evicts_both_keys() {
        let app = TestApp::spawn().await;
        app.ctx
            .access
            .join(4, Some("secret".into()), CONTEST_END.parse().unwrap(), now())
            .await
            .expect("join");
        assert!(app.ctx.session.get("contest_access_4").is_some());

        app.state.contest_forbidden.store(true, Ordering::SeqCst);
        let err = cress_client::ProblemWorkspace::open_contest(
            std::sync::Arc::clone(&app.ctx.gateway),
            std::sync::Arc::clone(&app.ctx.access),
            4,
            0,
        )
        .await
        .err()
        .expect("contest open past a 403 should fail");

        assert!(err.is_forbidden());
        assert!(app.ctx.session.get("contest_access_4").is_none());
        assert!(app.ctx.session.get("contest_access_meta_4").is_none());
    }

    #[tokio::test]
    async fn a_403_contest_detail_fetch_evicts_cached_access() {
        let app = TestApp::spawn().await;
        app.ctx
            .access
            .join(8, Some("secret".into()), CONTEST_END.parse().unwrap(), now())
            .await
            .expect("join");
        assert!(app.ctx.session.get("contest_access_8").is_some());

        app.state.contest_forbidden.store(true, Ordering::SeqCst);
        let err = app
            .ctx
            .access
            .get_contest(8)
            .await
            .err()
            .expect("detail fetch past a 403 should fail");

        assert!(err.is_forbidden());
        assert!(app.ctx.session.get("contest_access_8").is_none());
        assert!(app.ctx.session.get("contest_access_meta_8").is_none());
    }
}
