//! Wire types for OpenAI-compatible chat-completions endpoints.
//!
//! Only the fields the agent reads or writes are modelled.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Structured-output constraint.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonSchema { json_schema: JsonSchemaFormat },
}

/// Named JSON Schema the reply must satisfy.
#[derive(Debug, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub schema: Value,
}

/// Response body of `POST /chat/completions`.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage reported by the endpoint.
#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Content of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }

    /// One-line stop reason and token usage, for debug logs.
    pub fn summary(&self) -> String {
        let finish = self
            .choices
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .unwrap_or("unknown");
        match &self.usage {
            Some(usage) => format!(
                "finish={finish}, tokens in={} out={}",
                usage.prompt_tokens, usage.completion_tokens
            ),
            None => format!("finish={finish}, tokens unreported"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_serializes_response_format() {
        let req = ChatRequest {
            model: "m".into(),
            messages: vec![ChatMessage::user("hi")],
            response_format: Some(ResponseFormat::JsonSchema {
                json_schema: JsonSchemaFormat {
                    name: "Plan".into(),
                    schema: json!({"type": "object"}),
                },
            }),
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["response_format"]["type"], "json_schema");
        assert_eq!(value["response_format"]["json_schema"]["name"], "Plan");
        assert_eq!(
            value["response_format"]["json_schema"]["schema"]["type"],
            "object"
        );
    }

    #[test]
    fn request_skips_missing_response_format() {
        let req = ChatRequest {
            model: "m".into(),
            messages: vec![ChatMessage::system("s")],
            response_format: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("response_format"));
        assert!(json.contains("\"role\":\"system\""));
    }

    #[test]
    fn response_deserializes_from_json() {
        let json = r#"{
            "id": "chatcmpl-1",
            "model": "openai/gpt-oss-120b",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Hello back!"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;

        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text(), Some("Hello back!"));
        assert_eq!(resp.summary(), "finish=stop, tokens in=10 out=5");
    }

    #[test]
    fn summary_without_usage() {
        let json = r#"{"choices": [{"message": {"content": "x"}}]}"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.summary(), "finish=unknown, tokens unreported");
    }

    #[test]
    fn response_with_null_content() {
        let json = r#"{"choices": [{"message": {"content": null}}]}"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text(), None);
    }
}
