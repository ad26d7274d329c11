pub mod controllers;
pub mod state;

use r2e::prelude::*;

use controllers::empty::EmptyController;
use controllers::headers::ItemsController;
use controllers::profile::ProfileController;
use controllers::sse::SseController;
use controllers::users::UserController;
use controllers::work::WorkController;
use state::AppState;

/// Assembles the demo application's router, shared by `main` and the
/// integration tests under `tests/`.
pub fn build_app(state: AppState) -> AppBuilder<AppState> {
    AppBuilder::new()
        .with_state(state)
        .with(Health)
        .with(Cors::permissive())
        .register_controller::<ProfileController>()
        .register_controller::<UserController>()
        .register_controller::<ItemsController>()
        .register_controller::<SseController>()
        .register_controller::<WorkController>()
        .register_controller::<EmptyController>()
}
