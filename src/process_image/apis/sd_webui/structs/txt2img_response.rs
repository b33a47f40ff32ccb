use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Txt2ImgResponse {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub info: Option<String>,
}
