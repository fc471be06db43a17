use serde_json::json;

use cress_client::auth::RouteDecision;
use cress_client::storage::KvStore;
use cress_client::Route;

use crate::common::TestApp;

mod hydration {
    use super::*;

    #[tokio::test]
    async fn gate_shows_placeholder_until_hydrated() {
        let app = TestApp::spawn().await;
        assert_eq!(app.ctx.auth.gate(false), RouteDecision::Placeholder);

        app.ctx.start().await;
        assert_eq!(app.ctx.auth.gate(false), RouteDecision::RedirectLogin);
    }

    #[tokio::test]
    async fn hydration_populates_the_session_user() {
        let app = TestApp::spawn().await;
        app.state.set_me(json!({"id": 7, "username": "bob", "role": "STUDENT"}));

        app.ctx.start().await;
        let user = app.ctx.auth.current_user().expect("user after hydration");
        assert_eq!(user.username, "bob");
        assert_eq!(app.ctx.auth.gate(false), RouteDecision::Allow);
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn login_stores_the_token_and_sends_it_as_bearer() {
        let app = TestApp::spawn_signed_in().await;

        // Any authenticated request carries the stored token.
        app.ctx.gateway.me().await.expect("me with bearer");
        assert_eq!(
            app.state.last_bearer.lock().unwrap().as_deref(),
            Some("test-token")
        );
    }

    #[tokio::test]
    async fn logout_purges_token_and_contest_access() {
        let app = TestApp::spawn_signed_in().await;
        app.ctx.session.set("contest_access_3", "true");
        app.ctx.session.set("contest_access_meta_3", "{}");

        app.ctx.auth.logout().await;

        assert!(app.ctx.session.get("token").is_none());
        assert!(app.ctx.session.get("contest_access_3").is_none());
        assert!(app.ctx.session.get("contest_access_meta_3").is_none());
        assert!(app.ctx.auth.current_user().is_none());
    }
}

mod password {
    use std::sync::atomic::Ordering;

    use super::*;

    #[tokio::test]
    async fn signed_in_user_can_change_their_password() {
        let app = TestApp::spawn_signed_in().await;

        app.ctx
            .auth
            .change_password("secret", "Newpass1")
            .await
            .expect("change password");
        assert_eq!(app.state.password_changes.load(Ordering::SeqCst), 1);
        assert_eq!(
            app.state.last_bearer.lock().unwrap().as_deref(),
            Some("test-token")
        );
    }
}

mod admin_gate {
    use super::*;

    #[tokio::test]
    async fn string_role_is_matched_case_insensitively() {
        let app = TestApp::spawn().await;
        app.state.set_me(json!({"id": 1, "username": "root", "role": "admin"}));
        app.ctx.start().await;

        assert_eq!(app.ctx.auth.gate(true), RouteDecision::Allow);
    }

    #[tokio::test]
    async fn non_string_role_redirects_from_admin_routes() {
        let app = TestApp::spawn().await;
        app.state.set_me(json!({"id": 1, "username": "odd", "role": 1}));
        app.ctx.start().await;

        let decision = app.ctx.auth.gate(true);
        assert_eq!(decision, RouteDecision::RedirectProblems);
        assert_eq!(decision.redirect(), Some(Route::Problems));
        // Non-admin surfaces stay open.
        assert_eq!(app.ctx.auth.gate(false), RouteDecision::Allow);
    }
}

mod expiry {
    use super::*;

    #[tokio::test]
    async fn a_401_latches_one_redirect_and_clears_the_session() {
        let app = TestApp::spawn_signed_in().await;
        app.state.me_user.lock().unwrap().take();

        let err = app.ctx.gateway.me().await.unwrap_err();
        assert!(matches!(err, cress_client::ApiError::AuthRequired));

        assert_eq!(app.ctx.auth.take_expired_redirect(), Some(Route::Login));
        // One-shot: a second read sees nothing.
        assert_eq!(app.ctx.auth.take_expired_redirect(), None);
        assert!(app.ctx.session.get("token").is_none());
    }
}
