//! HTTP rendering of lifecycle errors.

use crate::error::BlockError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Error body returned by every route.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A [`BlockError`] on its way out through the HTTP layer.
#[derive(Debug)]
pub struct ApiError(pub BlockError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BlockError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BlockError::AlreadyBlocked(_) => StatusCode::CONFLICT,
            BlockError::NoActiveBlock(_) => StatusCode::NOT_FOUND,
            BlockError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BlockError> for ApiError {
    fn from(e: BlockError) -> Self {
        Self(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(BlockError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
