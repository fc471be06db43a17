use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use cress_client::config::EditorConfigOptions;
use cress_client::models::{Preferences, Theme};
use cress_client::storage::{get_json, keys};

use crate::common::TestApp;

#[tokio::test]
async fn update_writes_local_storage_and_mirrors_to_the_server() {
    let app = TestApp::spawn_signed_in().await;

    app.ctx.preferences.update(|p| p.tab_size = 2).await;

    let persisted: Preferences =
        get_json(app.ctx.local.as_ref(), keys::PREFERENCES).expect("local copy");
    assert_eq!(persisted.tab_size, 2);
    assert_eq!(persisted.indent_unit, 2);

    let puts = app.state.preference_puts.lock().unwrap();
    assert_eq!(puts.len(), 1);
    let mirrored = &puts[0]["preferences"];
    assert_eq!(mirrored["tabSize"], 2);
    assert_eq!(mirrored["indentUnit"], 2);
}

#[tokio::test]
async fn anonymous_updates_stay_local() {
    let app = TestApp::spawn().await;
    app.ctx.start().await;

    app.ctx.preferences.update(|p| p.font_size = 20).await;

    assert_eq!(app.ctx.preferences.current().font_size, 20);
    assert!(app.state.preference_puts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn server_preferences_win_over_local_on_sign_in() {
    let app = TestApp::spawn().await;
    app.ctx.preferences.update(|p| {
        p.theme = Theme::Light;
        p.font_family = "Iosevka".to_string();
    })
    .await;

    // The mock serves {"theme": "dark", "fontSize": 16}.
    app.state
        .set_me(serde_json::json!({"id": 1, "username": "alice", "role": "STUDENT"}));
    app.ctx.start().await;

    let merged = app.ctx.preferences.current();
    assert_eq!(merged.theme, Theme::Dark);
    assert_eq!(merged.font_size, 16);
    // Keys the server omits keep their local values.
    assert_eq!(merged.font_family, "Iosevka");
}

#[tokio::test]
async fn preference_burst_collapses_to_one_editor_rebind() {
    let app = TestApp::spawn().await;

    let rebinds = Arc::new(AtomicU32::new(0));
    let seen = Arc::clone(&rebinds);
    app.ctx.preferences.bind_editor(
        &EditorConfigOptions { debounce_ms: 50 },
        move || {
            let seen = Arc::clone(&seen);
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        },
    );

    // A settings-panel drag: several mutations in quick succession.
    for size in [12, 13, 14, 15] {
        app.ctx.preferences.update(|p| p.font_size = size).await;
    }
    assert_eq!(rebinds.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(rebinds.load(Ordering::SeqCst), 1);

    app.ctx.preferences.detach_editor_rebind();
}
