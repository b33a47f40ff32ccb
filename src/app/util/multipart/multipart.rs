use axum::extract::Multipart;
use uuid::Uuid;

use crate::app::models::api_error::ApiError;

use super::models::{file_properties::FileProperties, form_parts::FormParts};

/// Splits a multipart body into text fields and the part named `file_field`.
/// Later duplicates of a name replace earlier ones.
pub async fn get_form_parts(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<FormParts, ApiError> {
    let mut parts = FormParts::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();

        if field_name == file_field {
            let file_name = field.file_name().unwrap_or("file-name").to_string();
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field.bytes().await?;

            parts.file = Some(FileProperties {
                id: Uuid::new_v4().to_string(),
                field_name,
                file_name,
                mime_type,
                data,
            });
            continue;
        }

        let text = field.text().await?;
        parts.fields.insert(field_name, text);
    }

    Ok(parts)
}
