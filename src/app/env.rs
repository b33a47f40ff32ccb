use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envy {
    pub app_env: Option<String>,
    pub port: Option<u16>,

    // read per request; an unset url fails the request, not startup
    pub app_url: Option<String>,
    pub upstream_timeout_secs: Option<u64>,

    pub max_upload_bytes: Option<usize>,
}

impl Envy {
    pub const DEFAULT_PORT: u16 = 8000;
    pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(Self::DEFAULT_PORT)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
            .unwrap_or(Self::DEFAULT_MAX_UPLOAD_BYTES)
    }
}
