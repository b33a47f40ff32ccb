use serde_json::error::Category;

use crate::{
    app::{models::api_error::ApiError, util::multipart::models::form_parts::FormParts},
    process_image::{
        dtos::generation_request_dto::GenerationRequest,
        errors::{invalid_schema, ProcessImageApiError},
    },
};

use super::RequestDecoder;

/// The whole request as one JSON document in the `data` field.
pub struct JsonBlobDecoder;

impl JsonBlobDecoder {
    pub const FIELD: &'static str = "data";
}

impl RequestDecoder for JsonBlobDecoder {
    fn decode(&self, parts: &FormParts) -> Result<GenerationRequest, ApiError> {
        let text = parts.field(Self::FIELD).unwrap_or_default();

        match serde_json::from_str::<GenerationRequest>(text) {
            Ok(request) => Ok(request),
            Err(e) => match e.classify() {
                Category::Syntax | Category::Eof | Category::Io => {
                    tracing::debug!(%e);
                    Err(ProcessImageApiError::InvalidJson.value())
                }
                Category::Data => Err(invalid_schema(e.to_string())),
            },
        }
    }
}
