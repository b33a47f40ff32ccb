use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum ProcessImageApiError {
    MissingPrompt,
    InvalidJson,
    MissingFile,
}

impl ProcessImageApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::MissingPrompt => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Please provide a prompt".to_string(),
            },
            Self::InvalidJson => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Invalid JSON data".to_string(),
            },
            Self::MissingFile => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Please provide an image file".to_string(),
            },
        }
    }
}

pub fn invalid_field(field: &str, kind: &str) -> ApiError {
    ApiError {
        code: StatusCode::BAD_REQUEST,
        message: format!("{} must be a valid {}.", field, kind),
    }
}

pub fn invalid_schema(message: String) -> ApiError {
    ApiError {
        code: StatusCode::BAD_REQUEST,
        message,
    }
}
