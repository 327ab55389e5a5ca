//! Client configuration

/// Configuration for connecting to the remote table store
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Store base URL (e.g., "https://xyz.example.co")
    pub base_url: String,

    /// Public API key, sent both as `apikey` and bearer token
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: 30,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP table client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpTableClient> {
        crate::HttpTableClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:54321")
    }
}
