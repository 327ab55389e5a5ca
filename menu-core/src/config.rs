use menu_client::ClientConfig;
use std::path::PathBuf;
use std::time::Duration;

use crate::ordering::DEFAULT_ACTIVATION_DISTANCE;

/// Application configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | REMOTE_URL | http://localhost:54321 | Remote table store base URL |
/// | REMOTE_API_KEY | (none) | Public API key of the store |
/// | STORAGE_DIR | ./data | Local storage directory |
/// | REQUEST_TIMEOUT_SECS | 30 | Remote request timeout |
/// | TOAST_TTL_MS | 3000 | Toast lifetime |
/// | DRAG_ACTIVATION_DISTANCE | 8.0 | Pointer travel (px) before a drag starts |
/// | LOG_LEVEL | info | Log level when RUST_LOG is unset |
/// | LOG_DIR | (none) | Daily rolling log directory |
/// | PUBLIC_BASE_URL | http://localhost:3000 | Storefront URL encoded in QR codes |
///
/// A `.env` file in the working directory is loaded first. Unparsable values
/// fall back to the default.
#[derive(Debug, Clone)]
pub struct MenuConfig {
    pub remote_url: String,
    pub remote_api_key: Option<String>,
    pub storage_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub toast_ttl_ms: u64,
    pub drag_activation_distance: f64,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub public_base_url: String,
}

impl MenuConfig {
    /// Load `.env`, then read the process environment
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            remote_url: non_empty("REMOTE_URL").unwrap_or_else(|| "http://localhost:54321".into()),
            remote_api_key: non_empty("REMOTE_API_KEY"),
            storage_dir: non_empty("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data")),
            request_timeout_secs: non_empty("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            toast_ttl_ms: non_empty("TOAST_TTL_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            drag_activation_distance: non_empty("DRAG_ACTIVATION_DISTANCE")
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|d| d.is_finite() && *d >= 0.0)
                .unwrap_or(DEFAULT_ACTIVATION_DISTANCE),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: non_empty("LOG_DIR"),
            public_base_url: non_empty("PUBLIC_BASE_URL")
                .unwrap_or_else(|| "http://localhost:3000".into()),
        }
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }

    /// Remote store connection settings
    pub fn client_config(&self) -> ClientConfig {
        let config =
            ClientConfig::new(self.remote_url.clone()).with_timeout(self.request_timeout_secs);
        match &self.remote_api_key {
            Some(key) => config.with_api_key(key.clone()),
            None => config,
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
