use std::time::Duration;

use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:9001";
pub const DEFAULT_ASSISTANT_MODEL: &str = "gemini-2.5-flash-preview-04-17";
pub const DEFAULT_ASSISTANT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Runtime settings, read from the environment (and `.env`, loaded in `main`).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub api_key: Option<String>,
    pub assistant_model: String,
    pub assistant_base_url: String,
    /// Simulated latency of the offline research-idea reply.
    pub mock_idea_delay: Duration,
    /// Simulated latency of the offline grant-snippet reply.
    pub mock_grant_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_key: None,
            assistant_model: DEFAULT_ASSISTANT_MODEL.to_string(),
            assistant_base_url: DEFAULT_ASSISTANT_BASE_URL.to_string(),
            mock_idea_delay: Duration::from_millis(1000),
            mock_grant_delay: Duration::from_millis(1200),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = get("LEAGUE_BIND_ADDR") {
            config.bind_addr = addr;
        }
        config.api_key = get("API_KEY").or_else(|| get("GEMINI_API_KEY"));
        if let Some(model) = get("ASSISTANT_MODEL") {
            config.assistant_model = model;
        }
        if let Some(url) = get("GEMINI_BASE_URL") {
            config.assistant_base_url = url;
        }
        if let Some(raw) = get("ASSISTANT_MOCK_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => {
                    config.mock_idea_delay = Duration::from_millis(ms);
                    config.mock_grant_delay = Duration::from_millis(ms);
                }
                Err(e) => warn!("Ignoring ASSISTANT_MOCK_DELAY_MS={:?}: {}", raw, e),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.assistant_model, DEFAULT_ASSISTANT_MODEL);
        assert!(config.api_key.is_none());
        assert_eq!(config.mock_grant_delay, Duration::from_millis(1200));
    }

    #[test]
    fn api_key_falls_back_to_gemini_var() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("API_KEY", "  "),
            ("GEMINI_API_KEY", "AIzaSyA-realistic-looking-key"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("AIzaSyA-realistic-looking-key"));
    }

    #[test]
    fn mock_delay_override() {
        let config = ServerConfig::from_lookup(lookup_from(&[("ASSISTANT_MOCK_DELAY_MS", "0")]));
        assert_eq!(config.mock_idea_delay, Duration::ZERO);
        assert_eq!(config.mock_grant_delay, Duration::ZERO);

        let config = ServerConfig::from_lookup(lookup_from(&[("ASSISTANT_MOCK_DELAY_MS", "soon")]));
        assert_eq!(config.mock_idea_delay, Duration::from_millis(1000));
    }
}
