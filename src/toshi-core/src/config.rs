use serde::{Deserialize, Serialize};

/// Environment variable overriding the server address.
pub const URL_ENV_VAR: &str = "TOSHI_URL";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address of the search server
    #[serde(default = "default_url")]
    pub url: String,

    /// Ask for segment sizes when fetching index summaries
    #[serde(default = "default_include_sizes")]
    pub include_sizes: bool,
}

fn default_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_include_sizes() -> bool {
    true
}

impl ClientConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Apply `TOSHI_URL` when it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(URL_ENV_VAR) {
            if !url.trim().is_empty() {
                tracing::debug!(%url, "server address taken from {}", URL_ENV_VAR);
                self.url = url;
            }
        }
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            include_sizes: default_include_sizes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());

        let config: ClientConfig =
            serde_json::from_str(r#"{"url": "http://search:9000", "include_sizes": false}"#).unwrap();
        assert_eq!(config.url, "http://search:9000");
        assert!(!config.include_sizes);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(ClientConfig::load("./does-not-exist/toshi.json").is_err());
    }
}
