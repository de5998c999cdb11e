use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::GeminiConfig;
use crate::errors::{GeminiError, GeminiResult};
use crate::types::*;

/// Client for interacting with the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini API client.
    ///
    /// A missing API key is not an error here; it is reported by every
    /// [`GeminiClient::generate_content`] call instead.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key().is_some()
    }

    /// Get the generateContent URL for the configured model
    fn get_generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url(),
            self.config.model_name()
        )
    }

    /// Forward a prompt to the Gemini API.
    ///
    /// Returns the raw success payload so callers can pass it through
    /// unchanged. The payload is guaranteed to carry at least one candidate.
    pub async fn generate_content(&self, prompt: &str) -> GeminiResult<Value> {
        let api_key = self.config.api_key().ok_or(GeminiError::ConfigError)?;
        let url = self.get_generate_url();
        let request = GenerateContentRequest::from_prompt(prompt);

        debug!(url = %url, prompt_len = prompt.len(), "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(GeminiError::transport)?;

        let status = response.status();
        let body = response.text().await.map_err(GeminiError::transport)?;

        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            GeminiError::transport(format!(
                "invalid JSON from API (status {}): {}",
                status.as_u16(),
                e
            ))
        })?;
        debug!(status = status.as_u16(), payload = %payload, "Full API response");

        if let Some(message) = api_error_message(&payload) {
            return Err(GeminiError::DownstreamError(message));
        }

        if !status.is_success() {
            return Err(GeminiError::transport(format!(
                "API request failed with status {}",
                status.as_u16()
            )));
        }

        if !has_candidates(&payload) {
            return Err(GeminiError::EmptyResult);
        }

        Ok(payload)
    }
}
