//! Error type returned by every handler, the Authorization Gate and the `Valid`
//! extractor, with its fixed mapping onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::{repository::StoreError, validation::FieldViolation};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The claimed role is missing or not allowed on this route.
    #[error("Unauthorized")]
    Unauthorized,

    /// One or more body fields have the wrong shape.
    #[error("validation failed ({} violations)", .0.len())]
    Validation(Vec<FieldViolation>),

    /// The store refused or could not find what was asked for.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            // A duplicate name is reported as a plain bad request.
            Self::Store(StoreError::DuplicateName) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(errors) => json!({ "errors": errors }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
