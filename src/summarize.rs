//! Optional summarization through an OpenAI-compatible endpoint.
//!
//! Not required for extraction; the pipeline only calls this when an API key
//! is configured, and a failed call degrades to "no summary".

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};

const MAX_SUMMARY_TOKENS: u32 = 100;
const SUMMARY_TEMPERATURE: f32 = 0.7;

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Client for the external language-generation service.
pub struct Summarizer {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl Summarizer {
    /// Build a summarizer when the configuration carries an API key.
    #[must_use]
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.summary_api_key.clone()?;
        Some(Self {
            client: reqwest::Client::new(),
            api_base: config.summary_api_base.trim_end_matches('/').to_string(),
            api_key,
            model: config.summary_model.clone(),
        })
    }

    /// Produce a short summary of `text`.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: format!("Summarize the following article text briefly:\n\n{text}"),
            }],
            max_tokens: MAX_SUMMARY_TOKENS,
            temperature: SUMMARY_TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.api_base);
        debug!(model = %self.model, "summarize.request");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Summarize(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Summarize(format!("service returned {status}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Summarize(format!("decoding response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| Error::Summarize("response held no choices".to_string()))
    }
}
