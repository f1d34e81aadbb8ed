//! Synergy note generation against an external language-model API.
//!
//! One outbound chat-completion call with a fixed-format prompt; the
//! reply is split into three labeled sections by the domain parser. No
//! retries: upstream failures are surfaced with their raw status and
//! body for diagnostics.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use domain::models::{parse_synergy_sections, SynergyProfile, SynergyResponse};

use crate::config::SynergyConfig;

/// Model used for synergy notes.
const SYNERGY_MODEL: &str = "gpt-4o-mini";

/// Token budget for the completion.
const SYNERGY_MAX_TOKENS: u32 = 512;

/// Errors that can occur during synergy generation.
#[derive(Debug, Error)]
pub enum SynergyError {
    #[error("Synergy API key is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Synergy upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Invalid response from synergy upstream: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Client for the synergy upstream.
pub struct SynergyClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SynergyClient {
    /// Creates a client from configuration.
    ///
    /// Fails with `NotConfigured` when no API key is set.
    pub fn new(config: &SynergyConfig) -> Result<Self, SynergyError> {
        if config.api_key.is_empty() {
            return Err(SynergyError::NotConfigured);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Generates a synergy note for the two profiles.
    pub async fn generate(
        &self,
        me: &SynergyProfile,
        them: &SynergyProfile,
    ) -> Result<SynergyResponse, SynergyError> {
        let prompt = build_prompt(me, them);
        debug!(chars = prompt.len(), "Sending synergy prompt");

        let request = ChatCompletionRequest {
            model: SYNERGY_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            max_tokens: SYNERGY_MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynergyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| SynergyError::InvalidResponse(e.to_string()))?;

        let reply = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| SynergyError::InvalidResponse("empty choices".to_string()))?;

        Ok(parse_synergy_sections(reply))
    }
}

/// Builds the fixed-format prompt instructing the model to answer under
/// the three literal labels the parser keys on.
fn build_prompt(me: &SynergyProfile, them: &SynergyProfile) -> String {
    format!(
        "You help people prepare to reconnect with their contacts.\n\n\
         ABOUT ME:\n{}\n\n\
         ABOUT THEM:\n{}\n\n\
         Suggest talking points for our next conversation. Reply with exactly \
         three sections, each on its own lines, using these literal labels:\n\
         HELP_THEM: how I could help them\n\
         HELP_ME: how they could help me\n\
         COMMON_GROUND: what we have in common",
        me.as_prompt_block(),
        them.as_prompt_block(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, bio: Option<&str>) -> SynergyProfile {
        SynergyProfile {
            full_name: name.to_string(),
            bio: bio.map(|s| s.to_string()),
            location: None,
            website: None,
            work_summary: None,
        }
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = SynergyConfig::default();
        assert!(matches!(
            SynergyClient::new(&config),
            Err(SynergyError::NotConfigured)
        ));
    }

    #[test]
    fn test_client_with_api_key() {
        let config = SynergyConfig {
            api_key: "sk-test".to_string(),
            ..SynergyConfig::default()
        };
        let client = SynergyClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = SynergyConfig {
            api_key: "sk-test".to_string(),
            base_url: "http://localhost:9999/v1/".to_string(),
            ..SynergyConfig::default()
        };
        let client = SynergyClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn test_build_prompt_contains_labels_and_profiles() {
        let prompt = build_prompt(
            &profile("Ada Lovelace", Some("Analyst.")),
            &profile("Grace Hopper", None),
        );
        assert!(prompt.contains("HELP_THEM:"));
        assert!(prompt.contains("HELP_ME:"));
        assert!(prompt.contains("COMMON_GROUND:"));
        assert!(prompt.contains("Name: Ada Lovelace"));
        assert!(prompt.contains("Bio: Analyst."));
        assert!(prompt.contains("Name: Grace Hopper"));
    }

    #[test]
    fn test_upstream_error_embeds_status_and_body() {
        let err = SynergyError::Upstream {
            status: 429,
            body: "rate limited".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("429"));
        assert!(message.contains("rate limited"));
    }

    #[test]
    fn test_completion_response_deserializes() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"HELP_THEM: A"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "HELP_THEM: A");
    }
}
