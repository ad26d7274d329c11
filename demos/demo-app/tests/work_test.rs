use demo_app::state::AppState;
use r2e_test::TestApp;

#[tokio::test]
async fn work_releases_resource_exactly_once_on_failure() {
    let state = AppState::new();
    let work_log = state.work_log.clone();
    let app = TestApp::from_builder(demo_app::build_app(state));

    let resp = app.get("/work/").await;
    resp.assert_status(http::StatusCode::CONFLICT);

    let log = work_log.lock().unwrap();
    assert_eq!(log.as_slice(), ["enter", "exit"]);
}
