//! API error taxonomy
//!
//! Maps failures to the HTTP categories the REST surface exposes. Store
//! failures are caught here and passed through as unhandled (500); the
//! identifier-shape and validation errors become 400s.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Errors surfaced by the API layer
#[derive(Error, Debug)]
pub enum ApiError {
    /// The path segment is not a valid identifier shape
    #[error("malformatted id")]
    MalformedId,

    /// No record with the given id
    #[error("person not found")]
    NotFound,

    /// A required field was absent or empty
    #[error("{0} missing")]
    MissingField(&'static str),

    /// Request failed validation; the message passes through to the caller
    #[error("{0}")]
    Validation(String),

    /// Anything else, passed through as a 500
    #[error("internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedId => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref source) = self {
            error!("unhandled error: {:#}", source);
        }

        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
