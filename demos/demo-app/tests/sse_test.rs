use demo_app::state::AppState;
use r2e_test::TestApp;

#[tokio::test]
async fn sse_stream_emits_start_three_updates_then_close_in_order() {
    let app = TestApp::from_builder(demo_app::build_app(AppState::new()));

    let resp = app.get("/sse/").await;
    resp.assert_ok();

    let text = resp.text();
    let events: Vec<&str> = text
        .split("\n\n")
        .filter(|chunk| !chunk.trim().is_empty())
        .filter_map(|chunk| {
            chunk
                .lines()
                .find_map(|line| line.strip_prefix("event: "))
        })
        .collect();

    assert_eq!(events, vec!["start", "update", "update", "update", "close"]);
}
