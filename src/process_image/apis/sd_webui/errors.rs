use axum::http::StatusCode;
use thiserror::Error;

use crate::app::models::api_error::ApiError;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("APP_URL is not configured")]
    MissingUrl,
    #[error("upstream request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("upstream responded with status {status}: {body}")]
    BadStatus { status: StatusCode, body: String },
    #[error("upstream response is malformed: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("upstream response has no images")]
    MissingImage,
    #[error("upstream image is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("upstream image could not be read: {0}")]
    Image(#[from] image::ImageError),
}

impl From<UpstreamError> for ApiError {
    fn from(e: UpstreamError) -> Self {
        tracing::error!(%e);

        let code = match e {
            UpstreamError::MissingUrl => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        };

        ApiError {
            code,
            message: e.to_string(),
        }
    }
}
