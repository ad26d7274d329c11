//! Runtime support for `#[derive(Params)]` — aggregated path/query/header
//! parameter structs extracted in one shot via [`FromRequestParts`](crate::http::extract::FromRequestParts).

use std::borrow::Cow;
use std::marker::PhantomData;

use crate::http::response::{IntoResponse, Response};
use crate::http::{Json, StatusCode};
use crate::meta::ParamInfo;

/// Error type for parameter extraction failures in `#[derive(Params)]`.
#[derive(Debug)]
pub struct ParamError {
    pub message: String,
}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ParamError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl From<ParamError> for Response {
    fn from(err: ParamError) -> Self {
        err.into_response()
    }
}

/// Parse a query string into key-value pairs.
pub fn parse_query_string(query: Option<&str>) -> Vec<(String, String)> {
    match query {
        Some(q) => form_urlencoded::parse(q.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        None => Vec::new(),
    }
}

/// Compose a nesting prefix with a field name: `(prefix, name) -> "prefix.name"`.
///
/// An empty prefix returns the bare name, so a top-level `#[derive(Params)]`
/// struct composes the same way a nested one does.
pub fn prefixed_key<'a>(prefix: &str, name: &'a str) -> Cow<'a, str> {
    if prefix.is_empty() {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{}.{}", prefix, name))
    }
}

/// Extraction with an explicit nesting prefix, threaded through by
/// `#[params(prefix = "...")]`/`#[params]` (flatten) fields so query keys
/// compose predictably across nested structs.
///
/// `#[derive(Params)]` emits this impl for every annotated struct; the plain
/// [`FromRequestParts`](crate::http::extract::FromRequestParts) impl it also
/// emits just calls `extract_prefixed` with an empty prefix.
pub trait PrefixedExtract<State>: Sized {
    fn extract_prefixed(
        parts: &mut crate::http::header::Parts,
        state: &State,
        prefix: &str,
    ) -> impl std::future::Future<Output = Result<Self, Response>> + Send;
}

/// Reports the path/query/header parameters a `#[derive(Params)]` struct
/// extracts, for OpenAPI metadata generation.
pub trait ParamsMetadata {
    fn param_infos() -> Vec<ParamInfo>;
}

/// Autoref-specialization probe used by `#[routes]` to collect `ParamInfo`s
/// from handler parameter types without requiring every type to implement
/// [`ParamsMetadata`].
///
/// `&__ParamMetaProbe::<T>` resolves to the inherent `param_infos` method
/// when `T: ParamsMetadata` (closer match), falling back to the
/// [`__NoParamsMeta`] blanket trait method (returning an empty `Vec`)
/// otherwise.
#[doc(hidden)]
pub struct __ParamMetaProbe<T>(pub PhantomData<T>);

#[doc(hidden)]
pub trait __NoParamsMeta {
    fn param_infos(&self) -> Vec<ParamInfo> {
        Vec::new()
    }
}

impl<T> __NoParamsMeta for &__ParamMetaProbe<T> {}

impl<T: ParamsMetadata> __ParamMetaProbe<T> {
    pub fn param_infos(&self) -> Vec<ParamInfo> {
        T::param_infos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_key_composes_only_when_nonempty() {
        assert_eq!(prefixed_key("", "page"), "page");
        assert_eq!(prefixed_key("pagination", "page"), "pagination.page");
    }

    #[test]
    fn parse_query_string_decodes_pairs() {
        let pairs = parse_query_string(Some("a=1&b=two%20words"));
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "two words".to_string()),
            ]
        );
    }

    #[test]
    fn parse_query_string_empty_on_none() {
        assert!(parse_query_string(None).is_empty());
    }
}
