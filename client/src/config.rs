//! Client configuration.

use std::time::Duration;

use common::search_const::{LOCATION_DEBOUNCE_MS, PAGE_SIZE, SEARCH_DEBOUNCE_MS};
use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin of the REST backend, e.g. `https://growers.example.org`.
    pub api_base_url: String,
    pub page_size: u64,
    pub search_debounce_ms: u64,
    pub location_debounce_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".to_string(),
            page_size: PAGE_SIZE,
            search_debounce_ms: SEARCH_DEBOUNCE_MS,
            location_debounce_ms: LOCATION_DEBOUNCE_MS,
        }
    }
}

impl ClientConfig {
    /// Reads `GROWER_API_URL`, `GROWER_PAGE_SIZE` and
    /// `GROWER_SEARCH_DEBOUNCE_MS`, falling back to the defaults for anything
    /// unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_base_url = std::env::var("GROWER_API_URL").unwrap_or(defaults.api_base_url);
        let page_size = env_u64("GROWER_PAGE_SIZE").filter(|size| *size > 0).unwrap_or(defaults.page_size);
        let search_debounce_ms = env_u64("GROWER_SEARCH_DEBOUNCE_MS").unwrap_or(defaults.search_debounce_ms);
        Self {
            api_base_url,
            page_size,
            search_debounce_ms,
            location_debounce_ms: defaults.location_debounce_ms,
        }
    }

    pub fn with_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn location_debounce(&self) -> Duration {
        Duration::from_millis(self.location_debounce_ms)
    }
}

fn env_u64(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(name, %raw, "ignoring unparsable configuration value");
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"api_base_url": "https://growers.example.org"}"#).unwrap();
        assert_eq!(config.api_base_url, "https://growers.example.org");
        assert_eq!(config.page_size, PAGE_SIZE);
        assert_eq!(config.search_debounce(), Duration::from_millis(SEARCH_DEBOUNCE_MS));
    }
}
