use bytes::Bytes;

use crate::{
    app::{
        models::api_error::ApiError, util::multipart::models::form_parts::FormParts,
    },
    AppState,
};

use super::{
    apis::sd_webui, decoders, dtos::generation_request_dto::GenerationRequest,
    errors::ProcessImageApiError,
};

pub async fn process_image(parts: FormParts, state: &AppState) -> Result<Bytes, ApiError> {
    let request = decoders::normalize(&parts)?;

    let Some(file) = parts.file else {
        return Err(ProcessImageApiError::MissingFile.value());
    };

    tracing::debug!(
        id = %file.id,
        field = %file.field_name,
        file_name = %file.file_name,
        mime_type = %file.mime_type,
        size = file.data.len(),
        "received image"
    );

    let payload = provide_input_spec(request, &file.data);
    let png = sd_webui::service::txt2img(
        &state.client,
        state.envy.app_url.as_deref(),
        &payload,
    )
    .await?;

    Ok(png)
}

/// Injects the uploaded image, base64 encoded, into every ControlNet unit.
pub fn provide_input_spec(mut request: GenerationRequest, image: &[u8]) -> GenerationRequest {
    request.set_input_image(&base64::encode(image));
    request
}
