//! Adapter for the DeepSeek chat-completion endpoint.
//!
//! DeepSeek speaks the OpenAI chat wire format: a system+user message pair
//! goes out, and the first choice's message content comes back.

use crate::config::Config;
use crate::error::CompletionError;
use crate::providers::scrub::sanitize_api_error;
use crate::providers::traits::CompletionBackend;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub struct DeepSeekBackend {
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    base_url: String,
    model: String,
    temperature: f64,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl DeepSeekBackend {
    pub fn new(
        api_key: Option<&str>,
        base_url: &str,
        model: &str,
        temperature: f64,
        timeout: Duration,
    ) -> Self {
        Self {
            cached_auth_header: api_key.map(|k| format!("Bearer {k}")),
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: model.to_owned(),
            temperature,
            client: Client::builder()
                .timeout(timeout)
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_key.as_deref(),
            &config.base_url,
            &config.model,
            config.temperature,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn build_request(&self, system_prompt: &str, user_prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt.to_owned(),
                },
                Message {
                    role: "user",
                    content: user_prompt.to_owned(),
                },
            ],
            temperature: self.temperature,
        }
    }

    fn extract_text(response: ChatResponse) -> Result<String, CompletionError> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(CompletionError::EmptyContent)
    }

    async fn call_api(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ChatResponse, CompletionError> {
        let auth_header = self
            .cached_auth_header
            .as_ref()
            .ok_or(CompletionError::ConfigurationMissing)?;

        let request = self.build_request(system_prompt, user_prompt);
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", auth_header)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::ServiceFailure(sanitize_api_error(&e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read provider error body>".to_owned());
            return Err(CompletionError::ServiceFailure(format!(
                "DeepSeek API error ({status}): {}",
                sanitize_api_error(&body)
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CompletionError::ServiceFailure(sanitize_api_error(&e.to_string())))
    }
}

impl CompletionBackend for DeepSeekBackend {
    fn complete<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, CompletionError>> + Send + 'a>> {
        Box::pin(async move {
            let response = self.call_api(system_prompt, user_prompt).await?;
            Self::extract_text(response)
        })
    }
}
