//! Request-extraction re-exports from Axum.
//!
//! Kept as a dedicated module (rather than importing `axum::extract`
//! directly at every call site) so generated code and the rest of the
//! crate have one stable path to depend on.

pub use axum::extract::{
    ConnectInfo, DefaultBodyLimit, FromRef, FromRequest, FromRequestParts, MatchedPath,
    OriginalUri, Path, Query, RawPathParams, Request, State,
};
pub use axum::Form;
