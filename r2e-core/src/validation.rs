use crate::error::{AppError, InvalidParamDetail, ParamLocation};
use crate::http::extract::{FromRequest, Request};
use crate::http::response::{IntoResponse, Response};
use crate::http::Json;

// ── Validated<T> body extractor ─────────────────────────────

/// A JSON body extractor that runs `T`'s `garde::Validate` before the
/// handler ever sees it, rejecting with [`AppError::InvalidRequestErrors`]
/// on the first failing request.
///
/// ```ignore
/// async fn create(&self, body: Validated<CreateUser>) -> JsonResult<User> { ... }
/// ```
pub struct Validated<T>(pub T);

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> std::ops::DerefMut for Validated<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    T: serde::de::DeserializeOwned + garde::Validate,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| AppError::InvalidJsonReceived(err.to_string()).into_response())?;
        value
            .validate()
            .map_err(|report| convert_garde_report(&report))?;
        Ok(Validated(value))
    }
}

// ── Autoref specialization for automatic validation ────────

/// Wrapper used by the autoref specialization trick in generated code.
///
/// The generated handler code calls:
/// ```ignore
/// (&__AutoValidator(&value)).__maybe_validate()
/// ```
///
/// Method resolution picks:
/// - `__DoValidate` (direct match) when `T: garde::Validate<Context = ()>` → runs validation
/// - `__SkipValidate` (autoref fallback) when `T` doesn't impl Validate → no-op
pub struct __AutoValidator<'a, T>(pub &'a T);

/// Matched when `T: garde::Validate<Context = ()>` (direct, higher priority).
pub trait __DoValidate {
    fn __maybe_validate(&self) -> Result<(), Response>;
}

impl<T: garde::Validate> __DoValidate for __AutoValidator<'_, T>
where
    T::Context: Default,
{
    fn __maybe_validate(&self) -> Result<(), Response> {
        self.0
            .validate()
            .map_err(|report| convert_garde_report(&report))
    }
}

/// Fallback via autoref (lower priority) — no-op for types without Validate.
pub trait __SkipValidate {
    fn __maybe_validate(&self) -> Result<(), Response>;
}

impl<T> __SkipValidate for &__AutoValidator<'_, T> {
    fn __maybe_validate(&self) -> Result<(), Response> {
        Ok(())
    }
}

fn convert_garde_report(report: &garde::Report) -> Response {
    let entries: Vec<InvalidParamDetail> = report
        .iter()
        .map(|(path, error)| {
            let field = {
                let s = path.to_string();
                if s.is_empty() { "value".to_string() } else { s }
            };
            InvalidParamDetail::invalid(ParamLocation::Body, field, error.message().to_string())
        })
        .collect();

    AppError::InvalidRequestErrors(entries).into_response()
}

// Re-export garde::Validate for convenience.
pub use garde::Validate;
