//! Blocking HTTP client for OpenAI-compatible chat-completions endpoints.

use std::sync::OnceLock;

use log::debug;
use reqwest::blocking::Client;
use serde_json::Value;

use super::{
    types::{ChatMessage, ChatRequest, ChatResponse, JsonSchemaFormat, ResponseFormat},
    LanguageModel, StructuredRequest,
};
use crate::{
    config::ModelConfig,
    error::{AgentError, Result},
};

/// Talks to `{base_url}/chat/completions` with bearer authentication.
///
/// One request per call; there are no retries. The underlying HTTP client is
/// built on first use, so constructing this type is cheap and infallible.
#[derive(Debug)]
pub struct ChatCompletionsClient {
    config: ModelConfig,
    http: OnceLock<Client>,
}

impl ChatCompletionsClient {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            http: OnceLock::new(),
        }
    }

    /// The settings this client was created with.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn http(&self) -> Result<&Client> {
        if let Some(client) = self.http.get() {
            return Ok(client);
        }
        let client = Client::builder().timeout(self.config.timeout).build()?;
        Ok(self.http.get_or_init(|| client))
    }

    fn send(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.endpoint();
        debug!("POST {url} (model {})", request.model);

        let response = self
            .http()?
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.text().unwrap_or_else(|_| "(no body)".into());
            return Err(AgentError::Api { status, message });
        }

        let body = response.text()?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| AgentError::InvalidResponse(format!("failed to parse response: {e}")))?;
        debug!("Response from {url}: {}", parsed.summary());
        Ok(parsed)
    }
}

impl LanguageModel for ChatCompletionsClient {
    fn generate_structured(&self, request: &StructuredRequest) -> Result<Option<Value>> {
        let chat = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(request.prompt.clone())],
            response_format: Some(ResponseFormat::JsonSchema {
                json_schema: JsonSchemaFormat {
                    name: request.schema_name.clone(),
                    schema: request.schema.clone(),
                },
            }),
        };

        let response = self.send(&chat)?;
        let Some(text) = response.text().map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let value: Value = serde_json::from_str(text).map_err(|e| {
            AgentError::InvalidResponse(format!(
                "structured reply for {} is not JSON: {e}",
                request.schema_name
            ))
        })?;
        Ok((!value.is_null()).then_some(value))
    }

    fn generate_text(&self, messages: &[ChatMessage]) -> Result<String> {
        let chat = ChatRequest {
            model: self.config.model.clone(),
            messages: messages.to_vec(),
            response_format: None,
        };
        let response = self.send(&chat)?;
        Ok(response.text().unwrap_or_default().to_string())
    }
}
