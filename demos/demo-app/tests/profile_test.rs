use demo_app::state::AppState;
use r2e_test::TestApp;
use serde_json::Value;

#[tokio::test]
async fn profile_echoes_path_query_and_injected_dependency() {
    let app = TestApp::from_builder(demo_app::build_app(AppState::new()));

    let resp = app.get("/profile/42?verbose=true").await;
    resp.assert_ok();

    let body: Value = resp.json();
    assert_eq!(body["pid"], 42);
    assert_eq!(body["verbose"], true);
    assert_eq!(body["greeting"], "hello from r2e");
}

#[tokio::test]
async fn profile_query_defaults_to_false_when_omitted() {
    let app = TestApp::from_builder(demo_app::build_app(AppState::new()));

    let resp = app.get("/profile/7").await;
    resp.assert_ok();

    let body: Value = resp.json();
    assert_eq!(body["pid"], 7);
    assert_eq!(body["verbose"], false);
}
