//! Small built-in interceptors with no external backend — `#[intercept(Logged::info())]`
//! and friends. Interceptors that need a real backend (caching, rate limiting)
//! live in their own crates; these are the ones every app can use for free.

pub mod interceptors;

pub use interceptors::{log_at_level, LogLevel, Logged, Timed};

pub mod prelude {
    //! Re-exports of the built-in utility interceptors.
    pub use crate::interceptors::{Logged, Timed};
}
