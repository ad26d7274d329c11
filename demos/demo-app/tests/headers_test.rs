use demo_app::state::AppState;
use http::header::HeaderName;
use r2e_test::{TestApp, TestRequest};
use serde_json::Value;

#[tokio::test]
async fn list_items_preserves_header_wire_order() {
    let app = TestApp::from_builder(demo_app::build_app(AppState::new()));

    let token = HeaderName::from_static("x-token");
    let req = TestRequest::get("/items/")
        .header(token.clone(), "first")
        .header(token.clone(), "second")
        .header(token, "third");

    let resp = app.request(req).await;
    resp.assert_ok();

    let body: Value = resp.json();
    let tokens: Vec<&str> = body["tokens"]
        .as_array()
        .expect("tokens array")
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(tokens, vec!["first", "second", "third"]);
}
