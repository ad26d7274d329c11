//! Shared tower/tower-http layer constructors used by the built-in plugins.
//!
//! Kept separate from [`plugins`](crate::plugins) so the layer values
//! themselves (rather than their `Plugin` wrappers) can be reused directly by
//! application code that wants to build a custom plugin on top of them.

use std::sync::Once;

use tower_http::catch_panic::{CatchPanicLayer, DefaultResponseForPanic};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// A permissive CORS layer — any origin, method, and header.
///
/// Suitable for local development; production deployments should build a
/// [`CorsLayer`] scoped to their actual origins and pass it to
/// [`Cors::custom`](crate::plugins::Cors::custom) instead.
pub fn default_cors() -> CorsLayer {
    CorsLayer::permissive()
}

static TRACING_INIT: Once = Once::new();

/// Install the global `tracing` subscriber, once per process.
///
/// Reads `RUST_LOG` via [`tracing_subscriber::EnvFilter`], defaulting to
/// `info` when unset. Safe to call from multiple plugins/tests — later calls
/// after the first are no-ops.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(true)
            .try_init()
            .ok();
    });
}

/// A `tower-http` `TraceLayer` logging requests/responses at `DEBUG`.
pub fn default_trace() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}

/// A `CatchPanicLayer` converting handler panics into a `500` JSON response.
pub fn catch_panic_layer() -> CatchPanicLayer<DefaultResponseForPanic> {
    CatchPanicLayer::new()
}
