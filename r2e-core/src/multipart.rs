use std::collections::HashMap;

use bytes::Bytes;

use crate::error::AppError;
use crate::http::extract::{FromRequest, Request};
use crate::http::response::{IntoResponse, Response};

/// Re-export the raw Axum multipart extractor for advanced use cases.
pub use axum::extract::Multipart;

/// Default cap on the number of file parts a single multipart body may carry.
pub const DEFAULT_MAX_FILES: usize = 16;

/// Default cap, in bytes, on a single file part's size.
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

// ── Errors ───────────────────────────────────────────────────────────────────

/// Errors that can occur during multipart extraction.
#[derive(Debug)]
pub enum MultipartError {
    /// A required field was not present in the multipart form.
    MissingField(String),
    /// A text field could not be parsed to the expected type.
    ParseError { field: String, message: String },
    /// An error from the underlying Axum multipart extractor.
    AxumError(String),
    /// An error reading a multipart field's data.
    ReadError(String),
    /// The request body was not `multipart/form-data`.
    UnsupportedMediaType(String),
    /// More file parts were uploaded than `max_files` allows.
    TooManyFiles { max: usize },
    /// A single file part exceeded `max_file_size`.
    FileTooLarge { field: String, max: usize },
}

impl std::fmt::Display for MultipartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(name) => write!(f, "missing required field: {name}"),
            Self::ParseError { field, message } => {
                write!(f, "failed to parse field '{field}': {message}")
            }
            Self::AxumError(msg) => write!(f, "multipart error: {msg}"),
            Self::ReadError(msg) => write!(f, "failed to read field data: {msg}"),
            Self::UnsupportedMediaType(msg) => write!(f, "unsupported media type: {msg}"),
            Self::TooManyFiles { max } => {
                write!(f, "too many file parts in request, max is {max}")
            }
            Self::FileTooLarge { field, max } => {
                write!(f, "file field '{field}' exceeds the {max}-byte limit")
            }
        }
    }
}

/// Every multipart failure surfaces as the same Problem Detail taxonomy as
/// the rest of the request pipeline, rather than a one-off JSON shape.
impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        match err {
            MultipartError::UnsupportedMediaType(msg) => AppError::UnsupportedMediaType(msg),
            MultipartError::TooManyFiles { .. } | MultipartError::FileTooLarge { .. } => {
                AppError::PayloadTooLarge(err.to_string())
            }
            MultipartError::MissingField(_)
            | MultipartError::ParseError { .. }
            | MultipartError::AxumError(_)
            | MultipartError::ReadError(_) => AppError::InvalidFormError(err.to_string()),
        }
    }
}

impl IntoResponse for MultipartError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

// ── UploadedFile ─────────────────────────────────────────────────────────────

/// A file received from a multipart form upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// The field name in the form.
    pub name: String,
    /// The original file name provided by the client, if any.
    pub file_name: Option<String>,
    /// The content type (MIME type) of the file, if provided.
    pub content_type: Option<String>,
    /// The raw file data.
    pub data: Bytes,
}

impl UploadedFile {
    /// Returns the size of the file data in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the file data is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// ── MultipartFields ──────────────────────────────────────────────────────────

/// Intermediate collection of all fields from a multipart form.
///
/// Used by `FromMultipart` implementations to extract typed fields.
pub struct MultipartFields {
    /// Text fields, keyed by field name. Multiple values per key are supported.
    pub text: HashMap<String, Vec<String>>,
    /// File fields, keyed by field name. Multiple files per key are supported.
    pub files: HashMap<String, Vec<UploadedFile>>,
}

impl MultipartFields {
    /// Consume an Axum `Multipart` extractor and collect all fields, enforcing
    /// the default file-count and per-file-size limits.
    pub async fn collect_from(multipart: Multipart) -> Result<Self, MultipartError> {
        Self::collect_from_with_limits(multipart, DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE).await
    }

    /// Consume an Axum `Multipart` extractor and collect all fields, rejecting
    /// the request once more than `max_files` file parts or a file part larger
    /// than `max_file_size` bytes is seen.
    pub async fn collect_from_with_limits(
        mut multipart: Multipart,
        max_files: usize,
        max_file_size: usize,
    ) -> Result<Self, MultipartError> {
        let mut text: HashMap<String, Vec<String>> = HashMap::new();
        let mut files: HashMap<String, Vec<UploadedFile>> = HashMap::new();
        let mut file_count = 0usize;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| MultipartError::AxumError(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            let file_name = field.file_name().map(|s| s.to_string());
            let content_type = field.content_type().map(|s| s.to_string());

            // Heuristic: if the field has a file_name, treat it as a file upload.
            // Otherwise, treat it as a text field.
            if file_name.is_some() {
                file_count += 1;
                if file_count > max_files {
                    return Err(MultipartError::TooManyFiles { max: max_files });
                }

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| MultipartError::ReadError(e.to_string()))?;
                if data.len() > max_file_size {
                    return Err(MultipartError::FileTooLarge {
                        field: name,
                        max: max_file_size,
                    });
                }

                files.entry(name.clone()).or_default().push(UploadedFile {
                    name,
                    file_name,
                    content_type,
                    data,
                });
            } else {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| MultipartError::ReadError(e.to_string()))?;
                let text_value = String::from_utf8(data.to_vec())
                    .map_err(|e| MultipartError::ReadError(e.to_string()))?;
                text.entry(name).or_default().push(text_value);
            }
        }

        Ok(Self { text, files })
    }

    /// Take a single required text value for the given field name.
    pub fn take_text(&mut self, name: &str) -> Result<String, MultipartError> {
        self.text
            .get_mut(name)
            .and_then(|v| if v.is_empty() { None } else { Some(v.remove(0)) })
            .ok_or_else(|| MultipartError::MissingField(name.to_string()))
    }

    /// Take an optional text value for the given field name.
    pub fn take_text_opt(&mut self, name: &str) -> Option<String> {
        self.text
            .get_mut(name)
            .and_then(|v| if v.is_empty() { None } else { Some(v.remove(0)) })
    }

    /// Take a single required file for the given field name.
    pub fn take_file(&mut self, name: &str) -> Result<UploadedFile, MultipartError> {
        self.files
            .get_mut(name)
            .and_then(|v| if v.is_empty() { None } else { Some(v.remove(0)) })
            .ok_or_else(|| MultipartError::MissingField(name.to_string()))
    }

    /// Take an optional file for the given field name.
    pub fn take_file_opt(&mut self, name: &str) -> Option<UploadedFile> {
        self.files
            .get_mut(name)
            .and_then(|v| if v.is_empty() { None } else { Some(v.remove(0)) })
    }

    /// Take all files for the given field name.
    pub fn take_files(&mut self, name: &str) -> Vec<UploadedFile> {
        self.files.remove(name).unwrap_or_default()
    }

    /// Take raw bytes for the given field name (from either text or file fields).
    pub fn take_bytes(&mut self, name: &str) -> Result<Bytes, MultipartError> {
        // Try file first, then text
        if let Some(file) = self.take_file_opt(name) {
            return Ok(file.data);
        }
        if let Some(text) = self.take_text_opt(name) {
            return Ok(Bytes::from(text));
        }
        Err(MultipartError::MissingField(name.to_string()))
    }
}

// ── FromMultipart trait ──────────────────────────────────────────────────────

/// Trait for types that can be constructed from multipart form fields.
///
/// Implement this trait manually or use `#[derive(FromMultipart)]` for automatic
/// derivation.
pub trait FromMultipart: Sized {
    fn from_multipart(fields: MultipartFields) -> Result<Self, MultipartError>;
}

// ── TypedMultipart extractor ─────────────────────────────────────────────────

/// An Axum extractor that consumes a `multipart/form-data` request body and
/// deserializes it into a typed struct implementing `FromMultipart`.
///
/// # Example
///
/// ```ignore
/// use r2e::multipart::{TypedMultipart, UploadedFile, FromMultipart};
///
/// #[derive(FromMultipart)]
/// pub struct ProfileUpload {
///     pub name: String,
///     pub avatar: UploadedFile,
/// }
///
/// #[post("/profile")]
/// async fn upload(&self, TypedMultipart(form): TypedMultipart<ProfileUpload>) -> Json<String> {
///     Json(format!("Received file: {} bytes", form.avatar.len()))
/// }
/// ```
pub struct TypedMultipart<T>(pub T);

impl<T, S> FromRequest<S> for TypedMultipart<T>
where
    T: FromMultipart,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| {
                // Axum rejects here when the request isn't `multipart/form-data`
                // at all (missing/invalid boundary) as opposed to a malformed
                // body of the right content type — the former is a media-type
                // problem, the latter a form problem.
                let body_text = rejection.body_text();
                let status = axum::response::IntoResponse::into_response(rejection)
                    .status();
                let err = if status == axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE {
                    MultipartError::UnsupportedMediaType(body_text)
                } else {
                    MultipartError::AxumError(body_text)
                };
                err.into_response()
            })?;

        let fields = MultipartFields::collect_from(multipart)
            .await
            .map_err(|e| e.into_response())?;

        let value = T::from_multipart(fields).map_err(|e| e.into_response())?;

        Ok(TypedMultipart(value))
    }
}
