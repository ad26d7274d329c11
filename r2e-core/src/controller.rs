//! The `Controller` trait — the runtime surface generated code hangs off of.
//!
//! `#[routes]` emits one `impl Controller<State> for MyController` block per
//! controller struct. [`AppBuilder::register_controller`](crate::builder::AppBuilder::register_controller)
//! is the only caller; everything here exists to give that call site a stable,
//! hand-writable trait shape so the macro output stays legible.

use std::any::Any;
use std::future::Future;
use std::pin::Pin;

use crate::config::{MissingKeyError, R2eConfig};
use crate::http::Router;
use crate::meta::MetaRegistry;

/// Implemented by every `#[routes]`-annotated controller.
///
/// `State` is the application state type the controller's routes are mounted
/// under — the same type parameter threaded through [`AppBuilder`](crate::builder::AppBuilder).
pub trait Controller<State>: Send + Sync + 'static {
    /// Build the Axum sub-router for this controller's handlers.
    fn routes() -> Router<State>;

    /// Push this controller's route/SSE/WS metadata into the shared registry.
    ///
    /// Used for OpenAPI generation and other metadata consumers; a controller
    /// with no documented routes leaves the registry untouched.
    fn register_meta(registry: &mut MetaRegistry);

    /// Wrap routes carrying `#[pre_guard]` with the guard middleware.
    ///
    /// Pre-auth guards run before any extractor, so they need direct access
    /// to the resolved state rather than going through the usual handler
    /// parameter list. Controllers without pre-auth guards use the identity
    /// default.
    fn apply_pre_auth_guards(router: Router<State>, _state: &State) -> Router<State> {
        router
    }

    /// Subscribe this controller's `#[consumer]` methods to their event buses.
    ///
    /// Runs once at `serve()` time, after state is resolved. Controllers with
    /// no consumers are a no-op future.
    fn register_consumers(_state: State) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(async {})
    }

    /// Build the boxed `#[scheduled]` task definitions for this controller.
    ///
    /// Each entry is a type-erased `Box<dyn r2e_scheduler::ScheduledTask>`,
    /// double-boxed as `Any` so `r2e-core` doesn't need a dependency on the
    /// scheduler crate. Controllers with no scheduled methods return an empty
    /// vec.
    fn scheduled_tasks_boxed(_state: &State) -> Vec<Box<dyn Any + Send>> {
        Vec::new()
    }

    /// Report any `#[config(...)]` keys this controller needs that are absent
    /// from the resolved configuration.
    ///
    /// Called once per controller at `register_controller` time; a non-empty
    /// result is a startup-time panic with all missing keys listed together,
    /// rather than surfacing one at a time as beans fail to construct.
    fn validate_config(_config: &R2eConfig) -> Vec<MissingKeyError> {
        Vec::new()
    }
}

/// Implemented for controller structs that can be rebuilt from `&State` alone.
///
/// Generated automatically by `#[derive(Controller)]` for structs with no
/// `#[inject(identity)]` field — those need a per-request identity value and
/// so can only be constructed inside a request extractor, not from state.
/// Event consumers and scheduled tasks run outside any request, so they rely
/// on this trait instead.
pub trait StatefulConstruct<State> {
    fn from_state(state: &State) -> Self;
}
