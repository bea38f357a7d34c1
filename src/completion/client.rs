//! HTTP client for OpenAI-compatible `chat/completions` endpoints.

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};
use crate::types::Turn;

use super::{CompletionBackend, CompletionOutcome};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct ChatCompletionsClient {
    api_key: String,
    client: reqwest::Client,
    endpoint: String,
    model: String,
    system_prompt: String,
}

impl ChatCompletionsClient {
    pub fn new(api_key: String, base_url: &str, model: String, system_prompt: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model,
            system_prompt,
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn request(&self, messages: &[Turn]) -> Result<Option<String>> {
        debug!(
            "Sending request to completion API with {} messages",
            messages.len()
        );

        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            return Err(BotError::CompletionApi { status, message });
        }

        let body = response.text().await?;
        let api_response: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| BotError::CompletionResponse(format!("{e}: {body}")))?;

        let content = api_response
            .choices
            .and_then(|choices| choices.into_iter().next())
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        if content.is_none() {
            warn!("Completion API returned no content");
        }
        debug!("Received response from completion API");
        Ok(content)
    }
}

#[async_trait]
impl CompletionBackend for ChatCompletionsClient {
    async fn complete(&self, prompt: &[Turn]) -> CompletionOutcome {
        match self.request(prompt).await {
            Ok(content) => content.into(),
            Err(e) => e.into(),
        }
    }

    fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}
