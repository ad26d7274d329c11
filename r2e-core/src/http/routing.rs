//! Routing re-exports from Axum.

pub use axum::routing::{delete, get, head, options, patch, post, put, MethodRouter, Route};
