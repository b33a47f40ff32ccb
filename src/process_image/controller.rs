use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    app::{models::api_error::ApiError, util::multipart::multipart::get_form_parts},
    AppState,
};

use super::service;

pub const FILE_FIELD: &str = "file";

pub async fn process_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let parts = get_form_parts(multipart?, FILE_FIELD).await?;
    let png = service::process_image(parts, &state).await?;

    Ok(([(header::CONTENT_TYPE, mime::IMAGE_PNG.as_ref())], png).into_response())
}
