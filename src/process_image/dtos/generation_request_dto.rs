use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

pub const DEFAULT_SAMPLER: &str = "DPM++ 2M";
pub const DEFAULT_CONTROLNET_MODEL: &str = "control_v11p_sd15_softedge [a8575a2a]";

/// Body of a webui `txt2img` call with the ControlNet script always on.
/// Field order is the order of the serialized payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GenerationRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom = "validate_prompt")]
    pub prompt: String,
    #[serde(default = "default_seed")]
    pub seed: i64,
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    #[serde(default = "default_steps")]
    pub steps: u32,
    #[serde(default = "default_cfg_scale")]
    pub cfg_scale: f64,
    #[serde(default = "default_dimension")]
    pub width: u32,
    #[serde(default = "default_dimension")]
    pub height: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub negative_prompt: String,
    #[serde(default = "default_sampler")]
    pub sampler: String,
    #[serde(default = "default_sampler")]
    pub sampler_index: String,
    #[serde(default = "default_true")]
    pub send_images: bool,
    #[serde(default = "default_true")]
    pub save_images: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alwayson_scripts: AlwaysOnScripts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlwaysOnScripts {
    #[serde(default, deserialize_with = "null_as_default")]
    pub controlnet: ControlNetModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlNetModel {
    /// Never empty; a missing, null or empty list becomes one default unit.
    #[serde(default = "default_args", deserialize_with = "args_or_default")]
    pub args: Vec<ControlNetArgs>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlNetArgs {
    #[serde(default = "default_controlnet_model")]
    pub model: String,
    #[serde(default = "default_one")]
    pub weight: f64,
    #[serde(default)]
    pub guidance_start: f64,
    #[serde(default)]
    pub low_vram: bool,
    #[serde(default = "default_dimension")]
    pub processor_res: u32,
    #[serde(default = "default_one")]
    pub guidance_end: f64,
    #[serde(default)]
    pub control_mode: i32,
    #[serde(default = "default_resize_mode")]
    pub resize_mode: i32,
    #[serde(default = "default_true")]
    pub pixel_perfect: bool,
    #[serde(default)]
    pub input_image: Option<String>,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            seed: default_seed(),
            batch_size: default_batch_size(),
            steps: default_steps(),
            cfg_scale: default_cfg_scale(),
            width: default_dimension(),
            height: default_dimension(),
            negative_prompt: String::new(),
            sampler: default_sampler(),
            sampler_index: default_sampler(),
            send_images: true,
            save_images: true,
            alwayson_scripts: AlwaysOnScripts::default(),
        }
    }
}

impl Default for ControlNetModel {
    fn default() -> Self {
        Self {
            args: default_args(),
        }
    }
}

impl Default for ControlNetArgs {
    fn default() -> Self {
        Self {
            model: default_controlnet_model(),
            weight: 1.0,
            guidance_start: 0.0,
            low_vram: false,
            processor_res: default_dimension(),
            guidance_end: 1.0,
            control_mode: 0,
            resize_mode: default_resize_mode(),
            pixel_perfect: true,
            input_image: None,
        }
    }
}

impl GenerationRequest {
    /// Writes the same encoded image into every ControlNet unit.
    pub fn set_input_image(&mut self, encoded_image: &str) {
        for args in self.alwayson_scripts.controlnet.args.iter_mut() {
            args.input_image = Some(encoded_image.to_string());
        }
    }
}

fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    if prompt.trim().is_empty() {
        let mut error = ValidationError::new("blank_prompt");
        error.message = Some("Please provide a prompt".into());
        return Err(error);
    }

    Ok(())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn args_or_default<'de, D>(deserializer: D) -> Result<Vec<ControlNetArgs>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Vec<ControlNetArgs>>::deserialize(deserializer)? {
        Some(args) if !args.is_empty() => Ok(args),
        _ => Ok(default_args()),
    }
}

fn default_seed() -> i64 {
    -1
}

fn default_batch_size() -> u32 {
    1
}

fn default_steps() -> u32 {
    45
}

fn default_cfg_scale() -> f64 {
    7.0
}

fn default_dimension() -> u32 {
    768
}

fn default_sampler() -> String {
    DEFAULT_SAMPLER.to_string()
}

fn default_true() -> bool {
    true
}

fn default_one() -> f64 {
    1.0
}

fn default_resize_mode() -> i32 {
    1
}

fn default_controlnet_model() -> String {
    DEFAULT_CONTROLNET_MODEL.to_string()
}

fn default_args() -> Vec<ControlNetArgs> {
    vec![ControlNetArgs::default()]
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_applies_defaults() {
        let request: GenerationRequest =
            serde_json::from_value(json!({ "prompt": "a red square" })).unwrap();

        assert_eq!(
            request,
            GenerationRequest {
                prompt: "a red square".to_string(),
                ..GenerationRequest::default()
            }
        );
        assert_eq!(request.width, 768);
        assert_eq!(request.height, 768);
        assert_eq!(request.steps, 45);
        assert_eq!(request.cfg_scale, 7.0);
        assert_eq!(request.alwayson_scripts.controlnet.args.len(), 1);
    }

    #[test]
    fn test_null_or_empty_args_become_default_unit() {
        for args in [json!(null), json!([])] {
            let request: GenerationRequest = serde_json::from_value(json!({
                "prompt": "p",
                "alwayson_scripts": { "controlnet": { "args": args } }
            }))
            .unwrap();

            assert_eq!(
                request.alwayson_scripts.controlnet.args,
                vec![ControlNetArgs::default()]
            );
        }
    }

    #[test]
    fn test_partial_args_keep_remaining_defaults() {
        let request: GenerationRequest = serde_json::from_value(json!({
            "prompt": "p",
            "alwayson_scripts": { "controlnet": { "args": [{ "weight": 0.5 }, { "model": "canny" }] } }
        }))
        .unwrap();

        let args = &request.alwayson_scripts.controlnet.args;
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].weight, 0.5);
        assert_eq!(args[0].model, DEFAULT_CONTROLNET_MODEL);
        assert_eq!(args[1].model, "canny");
        assert_eq!(args[1].processor_res, 768);
    }

    #[test]
    fn test_validate_rejects_blank_prompt() {
        for prompt in ["", "   ", "\n\t"] {
            let request = GenerationRequest {
                prompt: prompt.to_string(),
                ..GenerationRequest::default()
            };

            assert!(request.validate().is_err());
        }

        let request = GenerationRequest {
            prompt: " a prompt ".to_string(),
            ..GenerationRequest::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_set_input_image_fills_every_unit() {
        let mut request = GenerationRequest::default();
        request
            .alwayson_scripts
            .controlnet
            .args
            .push(ControlNetArgs::default());

        request.set_input_image("aGVsbG8=");

        assert!(request
            .alwayson_scripts
            .controlnet
            .args
            .iter()
            .all(|args| args.input_image.as_deref() == Some("aGVsbG8=")));
    }

    #[test]
    fn test_serialized_shape() {
        let mut request = GenerationRequest {
            prompt: "p".to_string(),
            ..GenerationRequest::default()
        };
        request.set_input_image("abc");

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["sampler_index"], "DPM++ 2M");
        assert_eq!(value["send_images"], true);
        assert_eq!(
            value["alwayson_scripts"]["controlnet"]["args"][0],
            json!({
                "model": "control_v11p_sd15_softedge [a8575a2a]",
                "weight": 1.0,
                "guidance_start": 0.0,
                "low_vram": false,
                "processor_res": 768,
                "guidance_end": 1.0,
                "control_mode": 0,
                "resize_mode": 1,
                "pixel_perfect": true,
                "input_image": "abc"
            })
        );
    }
}
