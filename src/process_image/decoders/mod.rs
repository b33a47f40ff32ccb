use validator::Validate;

use crate::app::{
    models::api_error::ApiError, util::multipart::models::form_parts::FormParts,
};

use super::{dtos::generation_request_dto::GenerationRequest, errors::ProcessImageApiError};

pub mod form_fields;
pub mod json_blob;

pub use form_fields::FormFieldsDecoder;
pub use json_blob::JsonBlobDecoder;

/// Turns the text parts of a multipart body into a [`GenerationRequest`].
/// Omitted fields take their defaults; the prompt is checked afterwards by
/// [`normalize`].
pub trait RequestDecoder {
    fn decode(&self, parts: &FormParts) -> Result<GenerationRequest, ApiError>;
}

/// A body carrying a `data` part is a JSON document, anything else is read
/// field by field.
pub fn decoder_for(parts: &FormParts) -> &'static dyn RequestDecoder {
    if parts.has_field(JsonBlobDecoder::FIELD) {
        &JsonBlobDecoder
    } else {
        &FormFieldsDecoder
    }
}

pub fn normalize(parts: &FormParts) -> Result<GenerationRequest, ApiError> {
    let request = decoder_for(parts).decode(parts)?;

    match request.validate() {
        Ok(_) => Ok(request),
        Err(e) => {
            tracing::debug!(%e);
            Err(ProcessImageApiError::MissingPrompt.value())
        }
    }
}
