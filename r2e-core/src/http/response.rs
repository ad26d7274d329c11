//! Response re-exports from Axum.

pub use axum::response::{Html, IntoResponse, Redirect, Response};
pub use axum::response::sse::{Event as SseEvent, KeepAlive as SseKeepAlive};
pub use axum::response::Sse;
