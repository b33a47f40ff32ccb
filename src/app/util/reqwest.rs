use std::time::Duration;

use reqwest::Client;

/// Shared client for upstream calls. Without `timeout_secs` a hung upstream
/// holds the request open indefinitely.
pub fn build_client(timeout_secs: Option<u64>) -> reqwest::Result<Client> {
    let mut builder = Client::builder();

    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}
