use demo_app::state::AppState;
use r2e_test::TestApp;
use serde_json::json;

#[tokio::test]
async fn create_user_aggregates_every_validation_failure() {
    let app = TestApp::from_builder(demo_app::build_app(AppState::new()));

    let resp = app
        .post_json(
            "/users/",
            &json!({ "name": "", "age": 5, "email": "not-an-email" }),
        )
        .await;

    resp.assert_status(http::StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = resp.json();
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 3);

    let params: Vec<&str> = errors.iter().map(|e| e["param"].as_str().unwrap()).collect();
    assert!(params.contains(&"name"));
    assert!(params.contains(&"age"));
    assert!(params.contains(&"email"));
    for e in errors {
        assert_eq!(e["location"], "body");
        assert_eq!(e["type"], "invalid-param-value");
    }
}

#[tokio::test]
async fn create_user_succeeds_with_valid_body() {
    let app = TestApp::from_builder(demo_app::build_app(AppState::new()));

    let resp = app
        .post_json(
            "/users/",
            &json!({ "name": "Ada", "age": 36, "email": "ada@example.com" }),
        )
        .await;

    resp.assert_ok();
    let body: serde_json::Value = resp.json();
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@example.com");
}
