use async_trait::async_trait;
use reqwest::Client;

#[cfg(test)]
use mockall::automock;

use crate::error::{EzError, Result};
use crate::models::{
    ChatBody, ChatMessage, ChatResponse, CompletionBody, CompletionRequest, CompletionResponse,
    Endpoint,
};

/// One request against the completion service, no retries.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the full history and return the raw response text.
    async fn complete(&self, endpoint: Endpoint, req: &CompletionRequest) -> Result<String>;
}

pub struct OpenAiTransport {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiTransport {
    pub fn new(api_key: String, base_url: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(EzError::Config(
                "an API key is required before any request".to_string(),
            ));
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            base_url,
        })
    }

    pub fn from_config(cfg: &crate::config::OpenAIConfig) -> Result<Self> {
        Self::new(cfg.api_key.clone(), cfg.base_url.clone())
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }
}

/// Flatten role-tagged turns into a single prompt for the completions endpoint.
pub fn render_prompt(messages: &[ChatMessage]) -> String {
    let mut prompt = String::new();
    for message in messages {
        prompt.push_str(message.role.as_str());
        prompt.push_str(": ");
        prompt.push_str(&message.content);
        prompt.push('\n');
    }
    prompt.push_str("assistant:");
    prompt
}

pub fn chat_text(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| EzError::Internal("chat API returned empty choices".to_string()))
}

pub fn completion_text(response: CompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.text)
        .ok_or_else(|| EzError::Internal("completions API returned empty choices".to_string()))
}

#[async_trait]
impl Transport for OpenAiTransport {
    async fn complete(&self, endpoint: Endpoint, req: &CompletionRequest) -> Result<String> {
        let url = self.url(endpoint);
        tracing::info!(
            "Sending {} turns to {} (model {})",
            req.messages.len(),
            url,
            req.model
        );

        let builder = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");

        let builder = match endpoint {
            Endpoint::Chat => builder.json(&ChatBody {
                model: &req.model,
                messages: &req.messages,
                sampling: req.sampling,
            }),
            Endpoint::Completions => builder.json(&CompletionBody {
                model: &req.model,
                prompt: render_prompt(&req.messages),
                sampling: req.sampling,
            }),
        };

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(EzError::from_status(status, body));
        }

        match endpoint {
            Endpoint::Chat => chat_text(response.json().await?),
            Endpoint::Completions => completion_text(response.json().await?),
        }
    }
}
