use std::str::FromStr;

use crate::{
    app::{models::api_error::ApiError, util::multipart::models::form_parts::FormParts},
    process_image::{
        dtos::generation_request_dto::{ControlNetArgs, GenerationRequest},
        errors::invalid_field,
    },
};

use super::RequestDecoder;

/// One multipart field per generation parameter, ControlNet options prefixed
/// with `controlnet_`.
pub struct FormFieldsDecoder;

impl RequestDecoder for FormFieldsDecoder {
    fn decode(&self, parts: &FormParts) -> Result<GenerationRequest, ApiError> {
        let mut request = GenerationRequest::default();
        let mut args = ControlNetArgs::default();

        if let Some(prompt) = parts.field("prompt") {
            request.prompt = prompt.to_string();
        }
        set_number(parts, "seed", &mut request.seed)?;
        set_number(parts, "batch_size", &mut request.batch_size)?;
        set_number(parts, "steps", &mut request.steps)?;
        set_number(parts, "cfg_scale", &mut request.cfg_scale)?;
        set_number(parts, "width", &mut request.width)?;
        set_number(parts, "height", &mut request.height)?;
        set_string(parts, "negative_prompt", &mut request.negative_prompt);
        set_string(parts, "sampler", &mut request.sampler);
        set_string(parts, "sampler_index", &mut request.sampler_index);
        set_bool(parts, "send_images", &mut request.send_images)?;
        set_bool(parts, "save_images", &mut request.save_images)?;

        set_string(parts, "controlnet_model", &mut args.model);
        set_number(parts, "controlnet_weight", &mut args.weight)?;
        set_number(parts, "controlnet_guidance_start", &mut args.guidance_start)?;
        set_bool(parts, "controlnet_low_vram", &mut args.low_vram)?;
        set_number(parts, "controlnet_processor_res", &mut args.processor_res)?;
        set_number(parts, "controlnet_guidance_end", &mut args.guidance_end)?;
        set_number(parts, "controlnet_control_mode", &mut args.control_mode)?;
        set_number(parts, "controlnet_resize_mode", &mut args.resize_mode)?;
        set_bool(parts, "controlnet_pixel_perfect", &mut args.pixel_perfect)?;

        request.alwayson_scripts.controlnet.args = vec![args];

        Ok(request)
    }
}

fn set_string(parts: &FormParts, name: &str, target: &mut String) {
    if let Some(value) = parts.field(name) {
        *target = value.to_string();
    }
}

fn set_number<T: FromStr>(parts: &FormParts, name: &str, target: &mut T) -> Result<(), ApiError> {
    let Some(value) = parts.field(name) else {
        return Ok(());
    };

    match value.trim().parse::<T>() {
        Ok(parsed) => {
            *target = parsed;
            Ok(())
        }
        Err(_) => Err(invalid_field(name, "number")),
    }
}

fn set_bool(parts: &FormParts, name: &str, target: &mut bool) -> Result<(), ApiError> {
    let Some(value) = parts.field(name) else {
        return Ok(());
    };

    match parse_bool(value) {
        Some(parsed) => {
            *target = parsed;
            Ok(())
        }
        None => Err(invalid_field(name, "boolean")),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "y" | "t" => Some(true),
        "false" | "0" | "no" | "off" | "n" | "f" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;

    use super::*;

    fn parts(fields: &[(&str, &str)]) -> FormParts {
        FormParts {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            file: None,
        }
    }

    #[test]
    fn test_decode_defaults() {
        let request = FormFieldsDecoder
            .decode(&parts(&[("prompt", "a red square")]))
            .unwrap();

        assert_eq!(
            request,
            GenerationRequest {
                prompt: "a red square".to_string(),
                ..GenerationRequest::default()
            }
        );
    }

    #[test]
    fn test_decode_all_fields() {
        let request = FormFieldsDecoder
            .decode(&parts(&[
                ("prompt", "p"),
                ("seed", "42"),
                ("batch_size", "2"),
                ("steps", "30"),
                ("cfg_scale", "17"),
                ("width", "512"),
                ("height", "640"),
                ("negative_prompt", "blurry"),
                ("sampler", "Euler a"),
                ("sampler_index", "Euler"),
                ("send_images", "false"),
                ("save_images", "0"),
                ("controlnet_model", "control_v11p_sd15_canny"),
                ("controlnet_weight", "0.8"),
                ("controlnet_guidance_start", "0.1"),
                ("controlnet_low_vram", "on"),
                ("controlnet_processor_res", "512"),
                ("controlnet_guidance_end", "0.9"),
                ("controlnet_control_mode", "2"),
                ("controlnet_resize_mode", "0"),
                ("controlnet_pixel_perfect", "no"),
            ]))
            .unwrap();

        assert_eq!(request.seed, 42);
        assert_eq!(request.batch_size, 2);
        assert_eq!(request.steps, 30);
        assert_eq!(request.cfg_scale, 17.0);
        assert_eq!((request.width, request.height), (512, 640));
        assert_eq!(request.negative_prompt, "blurry");
        assert_eq!(request.sampler, "Euler a");
        assert_eq!(request.sampler_index, "Euler");
        assert!(!request.send_images);
        assert!(!request.save_images);

        let args = &request.alwayson_scripts.controlnet.args;
        assert_eq!(args.len(), 1);
        assert_eq!(
            args[0],
            ControlNetArgs {
                model: "control_v11p_sd15_canny".to_string(),
                weight: 0.8,
                guidance_start: 0.1,
                low_vram: true,
                processor_res: 512,
                guidance_end: 0.9,
                control_mode: 2,
                resize_mode: 0,
                pixel_perfect: false,
                input_image: None,
            }
        );
    }

    #[test]
    fn test_guidance_range_is_not_checked() {
        let request = FormFieldsDecoder
            .decode(&parts(&[
                ("prompt", "p"),
                ("controlnet_guidance_start", "0.9"),
                ("controlnet_guidance_end", "0.1"),
            ]))
            .unwrap();

        let args = &request.alwayson_scripts.controlnet.args[0];
        assert_eq!(args.guidance_start, 0.9);
        assert_eq!(args.guidance_end, 0.1);
    }

    #[test]
    fn test_decode_rejects_bad_numbers() {
        let e = FormFieldsDecoder
            .decode(&parts(&[("prompt", "p"), ("width", "wide")]))
            .unwrap_err();

        assert_eq!(e.code, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "width must be a valid number.");

        let e = FormFieldsDecoder
            .decode(&parts(&[("prompt", "p"), ("send_images", "maybe")]))
            .unwrap_err();

        assert_eq!(e.message, "send_images must be a valid boolean.");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool(""), None);
    }
}
