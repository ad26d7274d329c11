use r2e_core::http::body::Body;
use r2e_core::http::Router;
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderName, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use tower::util::ServiceExt;

/// A fluent builder for requests that don't fit [`TestApp`]'s canned
/// shortcuts — arbitrary headers, methods, or a body built up in pieces.
///
/// ```ignore
/// let req = TestRequest::post("/users")
///     .bearer(&token)
///     .json(&NewUser { name: "alice".into() });
/// app.request(req).await.assert_created();
/// ```
pub struct TestRequest {
    method: Method,
    path: String,
    headers: Vec<(HeaderName, String)>,
    body: Body,
}

impl TestRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: Body::empty(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn header(mut self, name: HeaderName, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn bearer(self, token: &str) -> Self {
        self.header(AUTHORIZATION, format!("Bearer {token}"))
    }

    pub fn json(mut self, body: &impl serde::Serialize) -> Self {
        self.body = Body::from(serde_json::to_vec(body).expect("failed to serialize test body"));
        self.header(CONTENT_TYPE, "application/json")
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    fn build(self) -> Request<Body> {
        let mut builder = Request::builder().method(self.method).uri(self.path);
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }
        builder.body(self.body).expect("failed to build test request")
    }
}

/// A single token of a route template, either literal text or a `{name}`
/// placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    Literal(String),
    Param(String),
}

/// Splits a route template such as `/users/{id}/posts/{post_id}` into its
/// literal and parameter tokens, in order.
pub fn tokenize_path(template: &str) -> Vec<PathToken> {
    let mut tokens = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        if start > 0 {
            tokens.push(PathToken::Literal(rest[..start].to_string()));
        }
        let after = &rest[start + 1..];
        let end = after.find('}').expect("unterminated path parameter");
        tokens.push(PathToken::Param(after[..end].to_string()));
        rest = &after[end + 1..];
    }
    if !rest.is_empty() {
        tokens.push(PathToken::Literal(rest.to_string()));
    }
    tokens
}

/// Substitutes every `{name}` placeholder in `template` with the matching
/// entry from `params`, so tests can build concrete request paths from the
/// same template a `#[get("/users/{id}")]` route declares.
///
/// Panics if a placeholder has no matching entry — a missing param in a test
/// is a test bug, not a runtime condition to handle gracefully.
pub fn resolve_path(template: &str, params: &[(&str, &str)]) -> String {
    tokenize_path(template)
        .into_iter()
        .map(|token| match token {
            PathToken::Literal(s) => s,
            PathToken::Param(name) => params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
                .unwrap_or_else(|| panic!("missing test path param `{name}`")),
        })
        .collect()
}

/// In-process HTTP test client wrapping an Axum `Router`.
///
/// Uses `tower::ServiceExt::oneshot` to dispatch requests without binding
/// to a TCP port.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Create a `TestApp` from an assembled `axum::Router`.
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Create a `TestApp` from an `AppBuilder` by calling `.build()`.
    pub fn from_builder(builder: r2e_core::AppBuilder<impl Clone + Send + Sync + 'static>) -> Self {
        Self::new(builder.build())
    }

    /// Send a [`TestRequest`] built up via its fluent API.
    pub async fn request(&self, request: TestRequest) -> TestResponse {
        self.send(request.build()).await
    }

    /// Send an arbitrary request.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("failed to send request");

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("failed to read response body")
            .to_bytes();

        TestResponse { status, body }
    }

    /// Send a GET request to the given path.
    pub async fn get(&self, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(req).await
    }

    /// Send a GET request with a Bearer token.
    pub async fn get_authenticated(&self, path: &str, token: &str) -> TestResponse {
        let req = Request::builder()
            .method(Method::GET)
            .uri(path)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        self.send(req).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post_json(&self, path: &str, body: &impl serde::Serialize) -> TestResponse {
        let json = serde_json::to_vec(body).unwrap();
        let req = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json))
            .unwrap();
        self.send(req).await
    }

    /// Send a POST request with a JSON body and a Bearer token.
    pub async fn post_json_authenticated(
        &self,
        path: &str,
        body: &impl serde::Serialize,
        token: &str,
    ) -> TestResponse {
        let json = serde_json::to_vec(body).unwrap();
        let req = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(json))
            .unwrap();
        self.send(req).await
    }

    /// Send a PUT request with a JSON body and a Bearer token.
    pub async fn put_json_authenticated(
        &self,
        path: &str,
        body: &impl serde::Serialize,
        token: &str,
    ) -> TestResponse {
        let json = serde_json::to_vec(body).unwrap();
        let req = Request::builder()
            .method(Method::PUT)
            .uri(path)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(json))
            .unwrap();
        self.send(req).await
    }

    /// Send a DELETE request with a Bearer token.
    pub async fn delete_authenticated(&self, path: &str, token: &str) -> TestResponse {
        let req = Request::builder()
            .method(Method::DELETE)
            .uri(path)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        self.send(req).await
    }
}

/// Response wrapper with assertion helpers.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl TestResponse {
    /// Assert status is 200 OK. Returns `self` for chaining.
    pub fn assert_ok(self) -> Self {
        assert_eq!(self.status, StatusCode::OK, "Expected 200 OK, got {}", self.status);
        self
    }

    /// Assert status is 201 Created. Returns `self` for chaining.
    pub fn assert_created(self) -> Self {
        assert_eq!(self.status, StatusCode::CREATED, "Expected 201 Created, got {}", self.status);
        self
    }

    /// Assert status is 400 Bad Request.
    pub fn assert_bad_request(self) -> Self {
        assert_eq!(self.status, StatusCode::BAD_REQUEST, "Expected 400 Bad Request, got {}", self.status);
        self
    }

    /// Assert status is 401 Unauthorized.
    pub fn assert_unauthorized(self) -> Self {
        assert_eq!(self.status, StatusCode::UNAUTHORIZED, "Expected 401 Unauthorized, got {}", self.status);
        self
    }

    /// Assert status is 403 Forbidden.
    pub fn assert_forbidden(self) -> Self {
        assert_eq!(self.status, StatusCode::FORBIDDEN, "Expected 403 Forbidden, got {}", self.status);
        self
    }

    /// Assert status is 404 Not Found.
    pub fn assert_not_found(self) -> Self {
        assert_eq!(self.status, StatusCode::NOT_FOUND, "Expected 404 Not Found, got {}", self.status);
        self
    }

    /// Assert the response has a specific status code.
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(self.status, expected, "Expected {expected}, got {}", self.status);
        self
    }

    /// Deserialize the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("Failed to parse JSON: {e}\nBody: {}", self.text()))
    }

    /// Return the response body as a UTF-8 string.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}
