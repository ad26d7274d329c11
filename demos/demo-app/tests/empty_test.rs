use demo_app::state::AppState;
use r2e_test::TestApp;

#[tokio::test]
async fn empty_returns_no_content_with_empty_body() {
    let app = TestApp::from_builder(demo_app::build_app(AppState::new()));

    let req = r2e_test::TestRequest::post("/empty/");
    let resp = app.request(req).await;

    resp.assert_status(http::StatusCode::NO_CONTENT);
    assert!(resp.text().is_empty());
}
