//! The Problem Mapper: a closed taxonomy of request/response failures,
//! each rendered as an RFC 9457 `application/problem+json` body.
//!
//! [`AppError`] is the runtime's own closed set of problem kinds (parameter,
//! routing, auth, resource, transport, server). Application-defined error
//! enums opt into the same wire shape via `#[derive(ApiError)]`, which calls
//! [`problem_response`] with a kebab-case `type` derived from the variant
//! name — the same derivation [`AppError`]'s own `IntoResponse` impl uses.

use crate::http::response::{IntoResponse, Response};
use crate::http::{HeaderName, HeaderValue, Json, StatusCode};
use serde::Serialize;
use serde_json::Value;

/// RFC 9457 Problem Detail body: `{type, title, status, detail, instance, ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDetail {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Extra application-specific members, flattened into the top-level object.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub members: Option<Value>,
}

impl ProblemDetail {
    pub fn new(type_: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_: type_.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            members: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn with_members(mut self, members: Value) -> Self {
        self.members = Some(members);
        self
    }
}

impl IntoResponse for ProblemDetail {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            crate::http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

/// Builds a `ProblemDetail` response from a status and a kebab-case `type`,
/// deriving `title` from `type` (de-kebabed, first letter capitalized) the
/// way [`api_error_derive`](crate) does for `#[derive(ApiError)]` enums that
/// don't otherwise provide one.
pub fn problem_response(status: StatusCode, type_: &str, detail: impl Into<String>) -> Response {
    let title = humanize_type(type_);
    ProblemDetail::new(type_, title, status)
        .with_detail(detail)
        .into_response()
}

fn humanize_type(type_: &str) -> String {
    let mut out = String::with_capacity(type_.len());
    for (i, word) in type_.split('-').enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut chars = word.chars();
        if i == 0 {
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        } else {
            out.push_str(word);
        }
    }
    out
}

/// The external request-source a failed/invalid parameter was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
    Body,
    Form,
}

impl std::fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Cookie => "cookie",
            ParamLocation::Body => "body",
            ParamLocation::Form => "form",
        };
        f.write_str(s)
    }
}

/// A single failed-parameter entry, aggregated (never short-circuited) into
/// one [`AppError::InvalidRequestErrors`] per request.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidParamDetail {
    #[serde(rename = "type")]
    pub type_: String,
    pub location: ParamLocation,
    pub param: String,
    pub message: String,
}

impl InvalidParamDetail {
    pub fn missing(location: ParamLocation, param: impl Into<String>) -> Self {
        let param = param.into();
        Self {
            type_: "missing-request-param".to_string(),
            message: format!("missing required {location} parameter `{param}`"),
            location,
            param,
        }
    }

    pub fn invalid(location: ParamLocation, param: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_: "invalid-param-value".to_string(),
            location,
            param: param.into(),
            message: message.into(),
        }
    }
}

/// The closed taxonomy of problems the Endpoint Runtime (and the Problem
/// Mapper on its behalf) can raise. Each variant carries its own canonical
/// status; [`AppError::into_response`] always emits
/// `application/problem+json`.
#[derive(Debug)]
pub enum AppError {
    // ── Parameter (422 unless noted) ──────────────────────────────────
    /// Aggregated per-parameter validation failures — never short-circuited;
    /// one entry per failed parameter (missing or invalid).
    InvalidRequestErrors(Vec<InvalidParamDetail>),
    InvalidJsonReceived(String),
    InvalidFormError(String),
    UnsupportedMediaType(String),
    PayloadTooLarge(String),

    // ── Routing ────────────────────────────────────────────────────────
    NotFound(String),
    /// 405; `allowed` lists the methods known for the matched path and is
    /// echoed back as the response's `Allow` header.
    MethodNotAllowed { detail: String, allowed: Vec<String> },
    NotAcceptable(String),

    // ── Auth ───────────────────────────────────────────────────────────
    Unauthorized(String),
    InvalidToken(String),
    Forbidden(String),

    // ── Resource ───────────────────────────────────────────────────────
    Conflict(String),
    Gone(String),
    UnprocessableEntity(String),

    // ── Transport ──────────────────────────────────────────────────────
    Timeout(String),
    TooManyRequests(String),

    // ── Server ─────────────────────────────────────────────────────────
    Internal(String),
    UnserializableResponse(String),
    NotImplemented(String),

    /// Escape hatch for applications that need a one-off problem shape that
    /// doesn't fit a named kind.
    Custom(ProblemDetail),
}

impl AppError {
    /// The kebab-case `type` member this error renders with.
    pub fn type_(&self) -> &str {
        match self {
            AppError::InvalidRequestErrors(_) => "invalid-request-errors",
            AppError::InvalidJsonReceived(_) => "invalid-json-received",
            AppError::InvalidFormError(_) => "invalid-form-error",
            AppError::UnsupportedMediaType(_) => "unsupported-media-type",
            AppError::PayloadTooLarge(_) => "payload-too-large",
            AppError::NotFound(_) => "not-found",
            AppError::MethodNotAllowed { .. } => "method-not-allowed",
            AppError::NotAcceptable(_) => "not-acceptable",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::InvalidToken(_) => "invalid-token",
            AppError::Forbidden(_) => "forbidden",
            AppError::Conflict(_) => "conflict",
            AppError::Gone(_) => "gone",
            AppError::UnprocessableEntity(_) => "unprocessable-entity",
            AppError::Timeout(_) => "timeout",
            AppError::TooManyRequests(_) => "too-many-requests",
            AppError::Internal(_) => "internal",
            AppError::UnserializableResponse(_) => "unserializable-response",
            AppError::NotImplemented(_) => "not-implemented",
            AppError::Custom(p) => &p.type_,
        }
    }

    /// The canonical status for this error's kind.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequestErrors(_)
            | AppError::InvalidJsonReceived(_)
            | AppError::InvalidFormError(_)
            | AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            AppError::Unauthorized(_) | AppError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Gone(_) => StatusCode::GONE,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) | AppError::UnserializableResponse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            AppError::Custom(p) => {
                StatusCode::from_u16(p.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidRequestErrors(entries) => {
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                let detail = format!("{} parameter(s) failed validation", entries.len());
                let members = serde_json::json!({ "errors": entries });
                ProblemDetail::new("invalid-request-errors", "Invalid request parameters", status)
                    .with_detail(detail)
                    .with_members(members)
                    .into_response()
            }
            AppError::MethodNotAllowed { detail, allowed } => {
                let mut response = problem_response(
                    StatusCode::METHOD_NOT_ALLOWED,
                    "method-not-allowed",
                    detail,
                );
                if let Ok(value) = HeaderValue::from_str(&allowed.join(", ")) {
                    response
                        .headers_mut()
                        .insert(HeaderName::from_static("allow"), value);
                }
                response
            }
            AppError::Custom(p) => p.into_response(),
            other => {
                let status = other.status();
                let type_ = other.type_().to_string();
                let detail = other.detail();
                problem_response(status, &type_, detail)
            }
        }
    }
}

impl AppError {
    fn detail(&self) -> String {
        match self {
            AppError::InvalidJsonReceived(m)
            | AppError::InvalidFormError(m)
            | AppError::UnsupportedMediaType(m)
            | AppError::PayloadTooLarge(m)
            | AppError::NotFound(m)
            | AppError::NotAcceptable(m)
            | AppError::Unauthorized(m)
            | AppError::InvalidToken(m)
            | AppError::Forbidden(m)
            | AppError::Conflict(m)
            | AppError::Gone(m)
            | AppError::UnprocessableEntity(m)
            | AppError::Timeout(m)
            | AppError::TooManyRequests(m)
            | AppError::Internal(m)
            | AppError::UnserializableResponse(m)
            | AppError::NotImplemented(m) => m.clone(),
            AppError::InvalidRequestErrors(_)
            | AppError::MethodNotAllowed { .. }
            | AppError::Custom(_) => String::new(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidRequestErrors(entries) => {
                write!(f, "Invalid request: {} error(s)", entries.len())
            }
            AppError::MethodNotAllowed { detail, .. } => write!(f, "Method Not Allowed: {detail}"),
            AppError::Custom(p) => write!(f, "{}: {}", p.title, p.detail.as_deref().unwrap_or("")),
            other => write!(f, "{}: {}", humanize_type(other.type_()), other.detail()),
        }
    }
}

impl std::error::Error for AppError {}

/// Alias for [`AppError`] used throughout handler signatures and docs —
/// `Result<Json<T>, HttpError>` reads closer to ordinary HTTP code than
/// `Result<Json<T>, AppError>` does.
pub type HttpError = AppError;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Generate `From<E> for AppError` implementations that map error types to
/// a specific `AppError` variant.
///
/// # Example
///
/// ```ignore
/// r2e_core::map_error! {
///     sqlx::Error => Internal,
///     std::io::Error => Internal,
/// }
/// ```
#[macro_export]
macro_rules! map_error {
    ( $( $err_ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$err_ty> for $crate::AppError {
                fn from(err: $err_ty) -> Self {
                    $crate::AppError::$variant(err.to_string())
                }
            }
        )*
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn error_parts(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(crate::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        assert_eq!(content_type.as_deref(), Some("application/problem+json"));
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn not_found_shape() {
        let (status, body) = error_parts(AppError::NotFound("resource missing".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["type"], "not-found");
        assert_eq!(body["status"], 404);
        assert_eq!(body["detail"], "resource missing");
    }

    #[tokio::test]
    async fn unauthorized_shape() {
        let (status, body) = error_parts(AppError::Unauthorized("no token".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["type"], "unauthorized");
    }

    #[tokio::test]
    async fn forbidden_shape() {
        let (status, body) = error_parts(AppError::Forbidden("access denied".into())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["title"], "Forbidden");
    }

    #[tokio::test]
    async fn internal_shape() {
        let (status, body) = error_parts(AppError::Internal("server broke".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["type"], "internal");
    }

    #[tokio::test]
    async fn custom_status_and_members() {
        let problem = ProblemDetail::new("teapot", "I'm a teapot", StatusCode::IM_A_TEAPOT)
            .with_members(serde_json::json!({"brew": "oolong"}));
        let (status, body) = error_parts(AppError::Custom(problem)).await;
        assert_eq!(status, StatusCode::IM_A_TEAPOT);
        assert_eq!(body["brew"], "oolong");
    }

    #[tokio::test]
    async fn method_not_allowed_sets_allow_header() {
        let err = AppError::MethodNotAllowed {
            detail: "GET /users supports GET, POST".into(),
            allowed: vec!["GET".into(), "POST".into()],
        };
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers().get("allow").unwrap(), "GET, POST");
    }

    #[tokio::test]
    async fn invalid_request_errors_aggregates_all_entries() {
        let entries = vec![
            InvalidParamDetail::invalid(ParamLocation::Body, "name", "too short"),
            InvalidParamDetail::invalid(ParamLocation::Body, "age", "must be >= 0"),
            InvalidParamDetail::invalid(ParamLocation::Body, "email", "missing @"),
        ];
        let (status, body) = error_parts(AppError::InvalidRequestErrors(entries)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let app_err: AppError = io_err.into();
        match app_err {
            AppError::Internal(msg) => assert!(msg.contains("file missing")),
            other => panic!("expected Internal, got {other}"),
        }
    }

    #[test]
    fn humanize_type_words() {
        assert_eq!(humanize_type("not-found"), "Not found");
        assert_eq!(humanize_type("invalid-param-value"), "Invalid param value");
    }
}
