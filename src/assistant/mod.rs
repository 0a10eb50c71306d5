pub mod prompts;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use self::prompts::GrantSection;

/// Keys that ship in sample env files and are never real.
const PLACEHOLDER_KEYS: [&str; 2] = ["YOUR_API_KEY_HERE", "FAKE_API_KEY_FOR_DEV"];

/// Keys this short are treated as missing.
const MIN_KEY_LEN: usize = 10;

/// Sampling options passed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sampling {
    /// Sampling diversity.
    pub temperature: f32,
    /// Candidate pool size.
    pub top_k: u32,
    /// Nucleus mass.
    pub top_p: f32,
}

pub const IDEA_SAMPLING: Sampling = Sampling {
    temperature: 0.8,
    top_k: 40,
    top_p: 0.95,
};

pub const GRANT_SAMPLING: Sampling = Sampling {
    temperature: 0.65,
    top_k: 50,
    top_p: 0.95,
};

/// Which assistant panel a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssistantPanel {
    Idea,
    Grant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedText {
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("invalid response format from AI")]
    MissingText,
}

pub fn is_usable_key(key: &str) -> bool {
    let key = key.trim();
    key.len() > MIN_KEY_LEN && !PLACEHOLDER_KEYS.contains(&key)
}

/// Client for the generative-text model.
///
/// Never fails from the caller's point of view: without a usable key it
/// answers with canned text after a short simulated delay, and any request
/// error is folded into a readable apology.
#[derive(Clone)]
pub struct AssistantService {
    api_key: Option<String>,
    model: String,
    base_url: String,
    idea_delay: Duration,
    grant_delay: Duration,
    client: reqwest::Client,
}

impl AssistantService {
    pub fn new(config: &ServerConfig) -> Self {
        let api_key = config.api_key.clone().filter(|k| is_usable_key(k));
        if api_key.is_some() {
            info!("Assistant API key found, using model {}", config.assistant_model);
        } else {
            warn!("Assistant API key missing or placeholder, AI features will be mocked");
        }
        Self {
            api_key,
            model: config.assistant_model.clone(),
            base_url: config.assistant_base_url.clone(),
            idea_delay: config.mock_idea_delay,
            grant_delay: config.mock_grant_delay,
            client: reqwest::Client::new(),
        }
    }

    /// Replaces the key at runtime. Returns `false` (and keeps the old key)
    /// if the new one is obviously not real.
    pub fn set_api_key(&mut self, key: String) -> bool {
        if !is_usable_key(&key) {
            warn!("Rejected assistant API key that looks like a placeholder");
            return false;
        }
        self.api_key = Some(key.trim().to_string());
        info!("API key set for assistant service");
        true
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn generate_idea(&self, prompt: &str) -> GeneratedText {
        let Some(api_key) = &self.api_key else {
            info!("Assistant offline, returning mock research idea");
            tokio::time::sleep(self.idea_delay).await;
            return GeneratedText {
                text: prompts::mock_idea(prompt),
            };
        };

        let contents = prompts::idea_prompt(prompt);
        match self.request_text(api_key, &contents, None, IDEA_SAMPLING).await {
            Ok(text) => GeneratedText { text },
            Err(e) => {
                error!("Error calling model API (research idea): {}", e);
                GeneratedText {
                    text: prompts::idea_failure(&e.to_string()),
                }
            }
        }
    }

    pub async fn generate_grant_snippet(&self, topic: &str, section: GrantSection) -> GeneratedText {
        let Some(api_key) = &self.api_key else {
            info!("Assistant offline, returning mock grant snippet");
            tokio::time::sleep(self.grant_delay).await;
            return GeneratedText {
                text: prompts::mock_grant(topic, section),
            };
        };

        let contents = prompts::grant_prompt(topic, section);
        match self
            .request_text(
                api_key,
                &contents,
                Some(prompts::GRANT_WRITER_INSTRUCTION),
                GRANT_SAMPLING,
            )
            .await
        {
            Ok(text) => GeneratedText { text },
            Err(e) => {
                error!("Error generating grant snippet: {}", e);
                GeneratedText {
                    text: prompts::grant_failure(&e.to_string()),
                }
            }
        }
    }

    async fn request_text(
        &self,
        api_key: &str,
        contents: &str,
        system_instruction: Option<&str>,
        sampling: Sampling,
    ) -> Result<String, AssistantError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let mut body = serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": contents }]
                }
            ],
            "generationConfig": {
                "temperature": sampling.temperature,
                "topK": sampling.top_k,
                "topP": sampling.top_p
            }
        });
        if let Some(instruction) = system_instruction {
            body["systemInstruction"] = serde_json::json!({ "parts": [{ "text": instruction }] });
        }

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Status { status, body });
        }

        let resp_json: Value = response.json().await?;
        extract_text(&resp_json).ok_or_else(|| {
            error!("Unexpected response format from model API: {}", resp_json);
            AssistantError::MissingText
        })
    }
}

/// Joins the text parts of the first candidate.
fn extract_text(resp: &Value) -> Option<String> {
    let parts = resp["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config() -> ServerConfig {
        ServerConfig {
            api_key: None,
            mock_idea_delay: Duration::ZERO,
            mock_grant_delay: Duration::ZERO,
            ..ServerConfig::default()
        }
    }

    #[test]
    fn placeholder_keys_are_unusable() {
        assert!(!is_usable_key("YOUR_API_KEY_HERE"));
        assert!(!is_usable_key("FAKE_API_KEY_FOR_DEV"));
        assert!(!is_usable_key("short"));
        assert!(!is_usable_key(""));
        assert!(is_usable_key("AIzaSyA-realistic-looking-key"));
    }

    #[test]
    fn set_api_key_rejects_placeholders() {
        let mut service = AssistantService::new(&offline_config());
        assert!(!service.has_api_key());
        assert!(!service.set_api_key("YOUR_API_KEY_HERE".to_string()));
        assert!(!service.has_api_key());
        assert!(service.set_api_key("AIzaSyA-realistic-looking-key".to_string()));
        assert!(service.has_api_key());
    }

    #[test]
    fn extracts_joined_candidate_text() {
        let resp = serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Study " }, { "text": "tardigrades." }] } }
            ]
        });
        assert_eq!(extract_text(&resp).as_deref(), Some("Study tardigrades."));
        assert_eq!(extract_text(&serde_json::json!({ "candidates": [] })), None);
        assert_eq!(extract_text(&serde_json::json!({ "error": "quota" })), None);
    }

    #[tokio::test]
    async fn offline_idea_is_mocked() {
        let service = AssistantService::new(&offline_config());
        let reply = service.generate_idea("coral reefs").await;
        assert_eq!(reply.text, prompts::mock_idea("coral reefs"));
    }

    #[tokio::test]
    async fn offline_grant_is_mocked() {
        let service = AssistantService::new(&offline_config());
        let reply = service
            .generate_grant_snippet("Soil Microbiomes", GrantSection::Significance)
            .await;
        assert!(reply.text.starts_with("Mocked Grant Snippet for Topic: \"Soil Microbiomes\""));
    }

    #[tokio::test]
    async fn transport_failure_is_folded_into_text() {
        let config = ServerConfig {
            api_key: Some("AIzaSyA-realistic-looking-key".to_string()),
            // Nothing listens on port 9 locally
            assistant_base_url: "http://127.0.0.1:9".to_string(),
            ..offline_config()
        };
        let service = AssistantService::new(&config);
        assert!(service.has_api_key());

        let idea = service.generate_idea("anything").await;
        assert!(idea.text.starts_with("Sorry, I encountered an error"));
        assert!(idea.text.contains("Details: "));

        let grant = service
            .generate_grant_snippet("anything", GrantSection::Abstract)
            .await;
        assert!(grant.text.starts_with("Apologies, an error occurred"));
    }
}
