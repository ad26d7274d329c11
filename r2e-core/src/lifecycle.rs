//! Startup/shutdown hook types and the `LifecycleController` convenience trait.

use std::future::Future;
use std::pin::Pin;

/// A boxed startup hook: runs once with the resolved state, before the
/// listener binds. Registered via
/// [`AppBuilder::on_start`](crate::builder::AppBuilder::on_start).
pub type StartupHook<T> = Box<
    dyn FnOnce(T) -> Pin<Box<dyn Future<Output = Result<(), Box<dyn std::error::Error + Send + Sync>>> + Send>>
        + Send,
>;

/// A boxed shutdown hook: runs once after the server stops accepting
/// connections. Registered via
/// [`AppBuilder::on_stop`](crate::builder::AppBuilder::on_stop).
pub type ShutdownHook = Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send>;

/// Convenience trait for state types that want their startup/shutdown logic
/// defined alongside the state itself rather than as free closures passed to
/// `.on_start()`/`.on_stop()`.
///
/// Neither method is required to do anything — both default to no-ops, so a
/// state type can implement only the half of the lifecycle it cares about.
///
/// ```ignore
/// impl LifecycleController for AppState {
///     async fn on_start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///         self.pool.acquire().await?;
///         Ok(())
///     }
/// }
///
/// AppBuilder::new()
///     .build_state::<AppState, _, _>().await
///     .on_start(|state| Box::pin(async move { state.on_start().await }))
///     .on_stop(|| Box::pin(async { tracing::info!("shutting down") }))
/// ```
pub trait LifecycleController: Send + Sync + 'static {
    /// Run once before the server starts accepting connections.
    fn on_start(
        &self,
    ) -> impl Future<Output = Result<(), Box<dyn std::error::Error + Send + Sync>>> + Send {
        async { Ok(()) }
    }

    /// Run once after the server stops accepting connections.
    fn on_stop(&self) -> impl Future<Output = ()> + Send {
        async {}
    }
}
