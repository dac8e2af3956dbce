use serde::{Deserialize, Serialize};
use crate::{ChatError, Result};

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Largest delay a browser timer accepts; anything above wraps to negative
pub const MAX_TIMEOUT_MS: u64 = i32::MAX as u64;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the chatbot service, without the `/api` suffix
    pub api_base: String,
    /// Knowledge base to query; the server's default when unset
    #[serde(default)]
    pub knowledge_base_id: Option<String>,
    /// Per-request timeout. `None` waits forever.
    #[serde(default = "default_timeout")]
    pub request_timeout_ms: Option<u64>,
}

fn default_timeout() -> Option<u64> {
    Some(DEFAULT_TIMEOUT_MS)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            knowledge_base_id: None,
            request_timeout_ms: default_timeout(),
        }
    }
}

impl ClientConfig {
    /// Join the base address with an absolute API path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.api_base.trim();
        if base.is_empty() {
            return Err(ChatError::Config("API base URL is empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ChatError::Config(format!(
                "API base URL must start with http:// or https://, got {}",
                base
            )));
        }
        match self.request_timeout_ms {
            Some(0) => {
                return Err(ChatError::Config("Request timeout must be positive".to_string()));
            }
            Some(ms) if ms > MAX_TIMEOUT_MS => {
                return Err(ChatError::Config(format!(
                    "Request timeout must be at most {}ms, got {}ms",
                    MAX_TIMEOUT_MS, ms
                )));
            }
            _ => {}
        }
        Ok(())
    }
}
