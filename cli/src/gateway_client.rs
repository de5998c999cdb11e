use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::Value;

use lavender_core::GenerateRequest;

/// Anything that can turn a prompt into a raw generation reply
#[async_trait]
pub trait PromptSender: Send + Sync {
    /// Send one prompt. Errors mean the reply could not be obtained at all.
    async fn send_prompt(&self, prompt: &str) -> Result<Value>;
}

/// HTTP client for the prompt gateway
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Using gateway at {}", base_url);
        Self {
            client: Client::new(),
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Whether requests carry a bearer token
    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    /// Sends a request to the health route to test the connection.
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach gateway at {}", url))?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl PromptSender for GatewayClient {
    async fn send_prompt(&self, prompt: &str) -> Result<Value> {
        let url = format!("{}/generate", self.base_url);
        let mut request = self.client.post(&url).json(&GenerateRequest {
            prompt: prompt.to_string(),
        });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        debug!("Sending prompt ({} chars) to {}", prompt.len(), url);
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send prompt to {}", url))?;

        // Error statuses still carry a JSON body worth decoding
        let status = response.status();
        let body = response
            .json::<Value>()
            .await
            .with_context(|| format!("Gateway returned a non-JSON body (status {})", status))?;
        debug!("Gateway answered with status {}", status);
        Ok(body)
    }
}
