//! Scheduled-task plugin for R2E.
//!
//! Drives controller methods annotated `#[scheduled(every = ..)]` /
//! `#[scheduled(cron = "..")]`. Installing [`Scheduler`] provides a
//! `CancellationToken` bean and registers a serve hook that starts one Tokio
//! task per scheduled method, stopping them all on application shutdown.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use r2e_core::builder::NoState;
use r2e_core::{AppBuilder, DeferredAction, PreStatePlugin, TCons, TaskRegistryHandle};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// How often a scheduled method runs.
pub enum ScheduleConfig {
    /// A standard five/six-field cron expression.
    Cron(String),
    /// A fixed period, starting immediately.
    Interval(Duration),
    /// A fixed period, with a one-time initial delay before the first tick.
    IntervalWithDelay {
        interval: Duration,
        initial_delay: Duration,
    },
}

/// Normalizes a `#[scheduled]` method's return value for logging.
///
/// Methods may return `()` or `Result<(), E>`; either way the generated call
/// site runs through this trait so a returned error is logged without
/// requiring every scheduled method to return a `Result`.
pub trait ScheduledResult {
    fn log_if_err(self, task_name: &str);
}

impl ScheduledResult for () {
    fn log_if_err(self, _task_name: &str) {}
}

impl<E: std::fmt::Debug> ScheduledResult for Result<(), E> {
    fn log_if_err(self, task_name: &str) {
        if let Err(err) = self {
            tracing::error!(task = task_name, error = ?err, "scheduled task returned an error");
        }
    }
}

/// A type-erased scheduled job, downcast from `Box<dyn Any + Send>` and
/// started by [`Scheduler`]'s serve hook.
pub trait ScheduledTask: Send {
    fn name(&self) -> &str;

    /// Spawn the task's tick loop, stopping when `shutdown` is cancelled.
    fn start(self: Box<Self>, shutdown: CancellationToken) -> JoinHandle<()>;
}

/// One controller method's schedule, generated by the `#[scheduled]` macro.
///
/// `task` reconstructs the controller from `state` and invokes the method
/// body on every tick.
pub struct ScheduledTaskDef<S> {
    pub name: String,
    pub schedule: ScheduleConfig,
    pub state: S,
    #[allow(clippy::type_complexity)]
    pub task: Box<dyn Fn(S) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>,
}

impl<S: Clone + Send + Sync + 'static> ScheduledTask for ScheduledTaskDef<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(self: Box<Self>, shutdown: CancellationToken) -> JoinHandle<()> {
        let ScheduledTaskDef {
            name,
            schedule,
            state,
            task,
        } = *self;

        tokio::spawn(async move {
            match schedule {
                ScheduleConfig::Interval(period) => {
                    run_interval(period, None, &shutdown, &state, task.as_ref(), &name).await;
                }
                ScheduleConfig::IntervalWithDelay {
                    interval,
                    initial_delay,
                } => {
                    run_interval(
                        interval,
                        Some(initial_delay),
                        &shutdown,
                        &state,
                        task.as_ref(),
                        &name,
                    )
                    .await;
                }
                ScheduleConfig::Cron(expr) => {
                    run_cron(&expr, &shutdown, &state, task.as_ref(), &name).await;
                }
            }
        })
    }
}

type TaskFn<S> = dyn Fn(S) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync;

async fn run_interval<S: Clone>(
    period: Duration,
    initial_delay: Option<Duration>,
    shutdown: &CancellationToken,
    state: &S,
    task: &TaskFn<S>,
    name: &str,
) {
    if let Some(delay) = initial_delay {
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shutdown.cancelled() => return,
        }
    }

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tracing::debug!(task = name, "running scheduled task");
                task(state.clone()).await;
            }
            _ = shutdown.cancelled() => return,
        }
    }
}

async fn run_cron<S: Clone>(
    expr: &str,
    shutdown: &CancellationToken,
    state: &S,
    task: &TaskFn<S>,
    name: &str,
) {
    let schedule: cron::Schedule = match expr.parse() {
        Ok(s) => s,
        Err(err) => {
            tracing::error!(task = name, expr, %err, "invalid cron expression; task will never run");
            return;
        }
    };

    loop {
        let Some(next) = schedule.upcoming(chrono::Utc).next() else {
            return;
        };
        let delay = (next - chrono::Utc::now()).to_std().unwrap_or(Duration::ZERO);
        tokio::select! {
            _ = tokio::time::sleep(delay) => {
                tracing::debug!(task = name, "running scheduled task");
                task(state.clone()).await;
            }
            _ = shutdown.cancelled() => return,
        }
    }
}

/// Collects every `#[scheduled]` task definition registered across
/// controllers and runs them for the lifetime of the application.
pub struct Scheduler;

impl PreStatePlugin for Scheduler {
    type Provided = CancellationToken;

    fn install<P>(self, app: AppBuilder<NoState, P>) -> AppBuilder<NoState, TCons<Self::Provided, P>> {
        let token = CancellationToken::new();

        app.provide(token.clone())
            .add_deferred(DeferredAction::new("Scheduler", move |ctx| {
                ctx.store_data(TaskRegistryHandle::new());

                let run_token = token.clone();
                ctx.on_serve(move |tasks, _unused_token| {
                    for boxed in tasks {
                        match boxed.downcast::<Box<dyn ScheduledTask>>() {
                            Ok(task) => {
                                tracing::info!(task = task.name(), "starting scheduled task");
                                task.start(run_token.clone());
                            }
                            Err(_) => {
                                tracing::warn!(
                                    "scheduler received a task definition of an unexpected type; skipping"
                                );
                            }
                        }
                    }
                });

                let shutdown_token = token.clone();
                ctx.on_shutdown(move || {
                    shutdown_token.cancel();
                });
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn interval_task_ticks_until_cancelled() {
        let count = Arc::new(AtomicUsize::new(0));
        let state = count.clone();

        let task_def = ScheduledTaskDef {
            name: "counter".to_string(),
            schedule: ScheduleConfig::Interval(Duration::from_millis(5)),
            state,
            task: Box::new(|c: Arc<AtomicUsize>| {
                Box::pin(async move {
                    c.fetch_add(1, Ordering::SeqCst);
                })
            }),
        };

        let shutdown = CancellationToken::new();
        let boxed: Box<dyn ScheduledTask> = Box::new(task_def);
        let handle = boxed.start(shutdown.clone());

        tokio::time::sleep(Duration::from_millis(30)).await;
        shutdown.cancel();
        handle.await.unwrap();

        assert!(count.load(Ordering::SeqCst) >= 2);
    }

    #[test]
    fn scheduled_result_logs_err_without_panicking() {
        let ok: Result<(), &str> = Ok(());
        ok.log_if_err("t1");
        let err: Result<(), &str> = Err("boom");
        err.log_if_err("t2");
        ().log_if_err("t3");
    }
}
