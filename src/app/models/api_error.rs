use std::error::Error;

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use http_body::LengthLimitError;
use serde_json::json;

#[derive(Debug)]
pub struct ApiError {
    pub code: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code, Json(json!({ "detail": self.message }))).into_response()
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError {
            code: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        tracing::warn!(%e);

        if exceeds_length_limit(&e) {
            return ApiError {
                code: StatusCode::PAYLOAD_TOO_LARGE,
                message: "Request body is too large.".to_string(),
            };
        }

        ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        }
    }
}

/// `DefaultBodyLimit` surfaces as a `LengthLimitError` somewhere down the
/// source chain of the multipart error.
fn exceeds_length_limit(e: &MultipartError) -> bool {
    let mut source = e.source();

    while let Some(inner) = source {
        if inner.is::<LengthLimitError>() {
            return true;
        }
        source = inner.source();
    }

    false
}
