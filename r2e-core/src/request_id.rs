//! Request correlation — tags every request/response pair with a UUID so log
//! lines and error responses can be tied back to a single request.
//!
//! # Usage
//!
//! ```ignore
//! .with(RequestIdPlugin::default())
//! ```
//!
//! ```ignore
//! #[get("/whoami")]
//! async fn whoami(&self, id: RequestId) -> Json<String> {
//!     Json(id.to_string())
//! }
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue};
use axum::response::Response;
use std::convert::Infallible;

use crate::builder::AppBuilder;
use crate::plugin::Plugin;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// The correlation ID for the current request.
///
/// Read from the incoming `x-request-id` header when the client supplies
/// one (so a request can be traced across service boundaries); generated
/// fresh otherwise. Extracting it never fails — a handler that doesn't care
/// about request IDs just doesn't take one as a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub uuid::Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestId>()
            .copied()
            .unwrap_or_else(RequestId::new))
    }
}

/// Assigns a [`RequestId`] to every incoming request and echoes it back in
/// the `X-Request-Id` response header.
///
/// Installing this plugin lets handlers extract `RequestId` directly, and
/// makes every response (including error responses produced outside any
/// handler) traceable by that ID.
#[derive(Default)]
pub struct RequestIdPlugin;

impl Plugin for RequestIdPlugin {
    fn install<T: Clone + Send + Sync + 'static>(self, app: AppBuilder<T>) -> AppBuilder<T> {
        app.with_layer_fn(|router| {
            router.layer(axum::middleware::from_fn(assign_request_id))
        })
    }
}

async fn assign_request_id(
    mut req: axum::extract::Request,
    next: crate::http::middleware::Next,
) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| uuid::Uuid::parse_str(s).ok())
        .map(RequestId)
        .unwrap_or_else(RequestId::new);

    req.extensions_mut().insert(id);

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_displays_as_uuid() {
        let id = RequestId::new();
        let parsed = uuid::Uuid::parse_str(&id.to_string());
        assert!(parsed.is_ok());
    }

    #[test]
    fn default_generates_distinct_ids() {
        assert_ne!(RequestId::default(), RequestId::default());
    }
}
