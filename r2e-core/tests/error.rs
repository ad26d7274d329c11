use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use r2e_core::error::{AppError, InvalidParamDetail, ParamLocation, ProblemDetail};

async fn error_parts(err: AppError) -> (StatusCode, serde_json::Value) {
    let resp = err.into_response();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn app_error_not_found_status() {
    let (status, body) = error_parts(AppError::NotFound("resource missing".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["type"], "not-found");
    assert_eq!(body["detail"], "resource missing");
}

#[tokio::test]
async fn app_error_unauthorized_status() {
    let (status, body) = error_parts(AppError::Unauthorized("no token".into())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["type"], "unauthorized");
}

#[tokio::test]
async fn app_error_forbidden_status() {
    let (status, body) = error_parts(AppError::Forbidden("access denied".into())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "access denied");
}

#[tokio::test]
async fn app_error_internal_status() {
    let (status, body) = error_parts(AppError::Internal("server broke".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["type"], "internal");
}

#[tokio::test]
async fn app_error_conflict_gone_unprocessable() {
    let (status, _) = error_parts(AppError::Conflict("already exists".into())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = error_parts(AppError::Gone("archived".into())).await;
    assert_eq!(status, StatusCode::GONE);
    let (status, _) = error_parts(AppError::UnprocessableEntity("bad state".into())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn app_error_too_many_requests_and_timeout() {
    let (status, _) = error_parts(AppError::TooManyRequests("slow down".into())).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    let (status, _) = error_parts(AppError::Timeout("upstream hung".into())).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn app_error_custom_status_and_body() {
    let problem = ProblemDetail::new("teapot", "I'm a teapot", StatusCode::IM_A_TEAPOT)
        .with_detail("short and stout");
    let (status, body) = error_parts(AppError::Custom(problem)).await;
    assert_eq!(status, StatusCode::IM_A_TEAPOT);
    assert_eq!(body["type"], "teapot");
    assert_eq!(body["detail"], "short and stout");
}

#[tokio::test]
async fn app_error_method_not_allowed_lists_allow_header() {
    let err = AppError::MethodNotAllowed {
        detail: "only GET and POST are supported".into(),
        allowed: vec!["GET".into(), "POST".into()],
    };
    let resp = err.into_response();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers().get("allow").unwrap(), "GET, POST");
}

#[tokio::test]
async fn app_error_invalid_request_errors_lists_every_param() {
    let entries = vec![
        InvalidParamDetail::missing(ParamLocation::Query, "page"),
        InvalidParamDetail::invalid(ParamLocation::Body, "email", "not a valid address"),
    ];
    let (status, body) = error_parts(AppError::InvalidRequestErrors(entries)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["location"], "query");
    assert_eq!(errors[1]["location"], "body");
}

#[tokio::test]
async fn problem_json_content_type_is_set() {
    let resp = AppError::NotFound("x".into()).into_response();
    let content_type = resp.headers().get(axum::http::header::CONTENT_TYPE).unwrap();
    assert_eq!(content_type, "application/problem+json");
}

#[test]
fn app_error_display_formatting() {
    assert_eq!(AppError::NotFound("x".into()).to_string(), "Not found: x");
    assert_eq!(AppError::Unauthorized("y".into()).to_string(), "Unauthorized: y");
    assert_eq!(AppError::Forbidden("z".into()).to_string(), "Forbidden: z");
}

#[test]
fn app_error_from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let app_err: AppError = io_err.into();
    match app_err {
        AppError::Internal(msg) => assert!(msg.contains("file missing")),
        other => panic!("expected Internal, got {other}"),
    }
}
