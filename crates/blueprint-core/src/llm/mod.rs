//! Model capability used by the stages.
//!
//! Stages only see [`LanguageModel`]: one call shape for schema-constrained
//! JSON and one for free text. [`ChatCompletionsClient`] implements it over
//! HTTP; tests substitute scripted models.

pub mod client;
pub mod types;

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use client::ChatCompletionsClient;
pub use types::{ChatMessage, Role};

use crate::error::Result;

/// A request for output conforming to a JSON Schema.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    /// Name the schema is registered under
    pub schema_name: String,
    /// The JSON Schema itself
    pub schema: Value,
    pub prompt: String,
}

impl StructuredRequest {
    /// Builds a request whose schema is derived from `T`.
    pub fn for_type<T: JsonSchema>(schema_name: &str, prompt: impl Into<String>) -> Self {
        Self {
            schema_name: schema_name.to_string(),
            schema: schema_for!(T).to_value(),
            prompt: prompt.into(),
        }
    }
}

/// Text-generation service the agent delegates reasoning to.
pub trait LanguageModel: Send + Sync {
    /// Generates a JSON value conforming to `request.schema`.
    ///
    /// `Ok(None)` means the model produced no usable result.
    fn generate_structured(&self, request: &StructuredRequest) -> Result<Option<Value>>;

    /// Generates free text from a system + user message sequence.
    fn generate_text(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Asks `model` for a `T`, deriving the schema from the type.
///
/// Returns `Ok(None)` when the model returns nothing usable.
///
/// # Errors
///
/// Propagates model errors, and returns a serialization error when the reply
/// does not deserialize into `T`.
pub fn structured<T>(
    model: &dyn LanguageModel,
    schema_name: &str,
    prompt: &str,
) -> Result<Option<T>>
where
    T: DeserializeOwned + JsonSchema,
{
    let request = StructuredRequest::for_type::<T>(schema_name, prompt);
    match model.generate_structured(&request)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}
