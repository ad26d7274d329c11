use std::future::Future;
use std::time::Instant;

use r2e_core::{Interceptor, InterceptorContext};

/// Log level for the [`Logged`] and [`Timed`] interceptors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Logs a message at the given level via `tracing`.
pub fn log_at_level(level: LogLevel, method: &str, msg: &str) {
    match level {
        LogLevel::Trace => tracing::trace!(method = method, "{}", msg),
        LogLevel::Debug => tracing::debug!(method = method, "{}", msg),
        LogLevel::Info => tracing::info!(method = method, "{}", msg),
        LogLevel::Warn => tracing::warn!(method = method, "{}", msg),
        LogLevel::Error => tracing::error!(method = method, "{}", msg),
    }
}

/// Logs entry and exit of the wrapped handler at the configured level.
///
/// ```ignore
/// #[intercept(Logged::info())]
/// #[get("/widgets/{id}")]
/// async fn get_widget(&self, id: String) -> Json<Widget> { ... }
/// ```
pub struct Logged {
    pub level: LogLevel,
}

impl Logged {
    pub fn new() -> Self {
        Logged { level: LogLevel::Info }
    }
    pub fn info() -> Self {
        Logged { level: LogLevel::Info }
    }
    pub fn debug() -> Self {
        Logged { level: LogLevel::Debug }
    }
    pub fn warn() -> Self {
        Logged { level: LogLevel::Warn }
    }
    pub fn trace() -> Self {
        Logged { level: LogLevel::Trace }
    }
    pub fn error() -> Self {
        Logged { level: LogLevel::Error }
    }
    pub fn level(level: LogLevel) -> Self {
        Logged { level }
    }
}

impl Default for Logged {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Send, S: Send + Sync> Interceptor<R, S> for Logged {
    fn around<F, Fut>(&self, ctx: InterceptorContext<'_, S>, next: F) -> impl Future<Output = R> + Send
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = R> + Send,
    {
        let level = self.level;
        let method_name = ctx.method_name;
        async move {
            log_at_level(level, method_name, "entering");
            let result = next().await;
            log_at_level(level, method_name, "exiting");
            result
        }
    }
}

/// Measures and logs the wrapped handler's wall-clock duration.
///
/// If `threshold_ms` is set, only logs when execution exceeds the threshold.
pub struct Timed {
    pub level: LogLevel,
    pub threshold_ms: Option<u64>,
}

impl Timed {
    pub fn new() -> Self {
        Timed {
            level: LogLevel::Info,
            threshold_ms: None,
        }
    }
    pub fn info() -> Self {
        Timed {
            level: LogLevel::Info,
            threshold_ms: None,
        }
    }
    pub fn debug() -> Self {
        Timed {
            level: LogLevel::Debug,
            threshold_ms: None,
        }
    }
    pub fn warn() -> Self {
        Timed {
            level: LogLevel::Warn,
            threshold_ms: None,
        }
    }
    pub fn threshold(ms: u64) -> Self {
        Timed {
            level: LogLevel::Info,
            threshold_ms: Some(ms),
        }
    }
    pub fn threshold_warn(ms: u64) -> Self {
        Timed {
            level: LogLevel::Warn,
            threshold_ms: Some(ms),
        }
    }
}

impl Default for Timed {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Send, S: Send + Sync> Interceptor<R, S> for Timed {
    fn around<F, Fut>(&self, ctx: InterceptorContext<'_, S>, next: F) -> impl Future<Output = R> + Send
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = R> + Send,
    {
        let level = self.level;
        let threshold_ms = self.threshold_ms;
        let method_name = ctx.method_name;
        async move {
            let start = Instant::now();
            let result = next().await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match threshold_ms {
                Some(threshold) if elapsed_ms <= threshold => {}
                _ => log_at_level(level, method_name, &format!("elapsed_ms={elapsed_ms}")),
            }
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn logged_passes_through_result() {
        let ctx = InterceptorContext {
            method_name: "get_widget",
            controller_name: "WidgetController",
            state: &(),
        };
        let out: i32 = Logged::debug().around(ctx, || async { 42 }).await;
        assert_eq!(out, 42);
    }

    #[tokio::test]
    async fn timed_passes_through_result() {
        let ctx = InterceptorContext {
            method_name: "get_widget",
            controller_name: "WidgetController",
            state: &(),
        };
        let out: &str = Timed::info().around(ctx, || async { "ok" }).await;
        assert_eq!(out, "ok");
    }

    #[tokio::test]
    async fn timed_with_threshold_skips_log_below_bound() {
        let ctx = InterceptorContext {
            method_name: "get_widget",
            controller_name: "WidgetController",
            state: &(),
        };
        let timed = Timed::threshold(10_000);
        let out: i32 = timed.around(ctx, || async { 7 }).await;
        assert_eq!(out, 7);
    }
}
