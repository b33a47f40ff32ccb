use std::io::Cursor;

use bytes::Bytes;
use image::ImageFormat;
use reqwest::{Client, Response};

use crate::process_image::dtos::generation_request_dto::GenerationRequest;

use super::{errors::UpstreamError, structs::txt2img_response::Txt2ImgResponse};

/// Posts `payload` to a webui `txt2img` endpoint and returns its first image
/// as PNG bytes.
pub async fn txt2img(
    client: &Client,
    url: Option<&str>,
    payload: &GenerationRequest,
) -> Result<Bytes, UpstreamError> {
    let url = url.ok_or(UpstreamError::MissingUrl)?;

    let res = client
        .post(url)
        .json(payload)
        .send()
        .await?;

    let txt2img_response = parse_response_to_txt2img_response(res).await?;
    if let Some(info) = &txt2img_response.info {
        tracing::debug!(%info);
    }

    let Some(image) = txt2img_response.images.first() else {
        return Err(UpstreamError::MissingImage);
    };

    encode_png(image)
}

async fn parse_response_to_txt2img_response(
    res: Response,
) -> Result<Txt2ImgResponse, UpstreamError> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        return Err(UpstreamError::BadStatus { status, body: text });
    }

    Ok(serde_json::from_str(&text)?)
}

/// Decodes a base64 image of any supported format and re-encodes it as PNG.
pub fn encode_png(base64_image: &str) -> Result<Bytes, UpstreamError> {
    let bytes = base64::decode(strip_data_url(base64_image))?;
    let image = image::load_from_memory(&bytes)?;

    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;

    Ok(Bytes::from(buffer.into_inner()))
}

fn strip_data_url(value: &str) -> &str {
    match value.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => value,
    }
}
