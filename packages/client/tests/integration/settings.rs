use crate::common::TestApp;

#[tokio::test]
async fn missing_footer_renders_empty_without_an_error() {
    let app = TestApp::spawn().await;

    // The mock serves no footer endpoint; the fetch 404s and the client
    // falls back to an empty footer silently.
    let footer = app.ctx.gateway.footer_or_empty().await;
    assert_eq!(footer.content, "");
}
