use std::env;

use crate::error::{FetchError, Result};

/// Path queried on every invocation.
pub const API_PATH: &str = "/api";

const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Fetcher configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    pub base_url: String,
}

impl FetcherConfig {
    /// Validate and normalize a base URL. Trailing slashes are dropped.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(FetchError::Config("API_BASE_URL is empty".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FetchError::Config(format!(
                "API_BASE_URL must start with http:// or https://, got {base_url}"
            )));
        }
        Ok(Self {
            base_url: base_url.to_string(),
        })
    }

    /// Load configuration from `API_BASE_URL`, falling back to the local backend.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url, API_PATH)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
