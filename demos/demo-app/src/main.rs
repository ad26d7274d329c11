use demo_app::state::AppState;

#[tokio::main]
async fn main() {
    r2e::init_tracing();

    demo_app::build_app(AppState::new())
        .serve("0.0.0.0:3000")
        .await
        .unwrap();
}
