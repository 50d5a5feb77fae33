use std::{collections::VecDeque, sync::Mutex};

use blueprint_core::{
    AgentBuilder, ChatMessage, LanguageModel, Result, RunEvent, RunObserver, StructuredRequest,
};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Replays canned replies in order.
#[derive(Default)]
pub struct ScriptedModel {
    structured: Mutex<VecDeque<Option<Value>>>,
    text: Mutex<VecDeque<String>>,
}

impl ScriptedModel {
    pub fn new(structured: Vec<Option<Value>>, text: Vec<&str>) -> Self {
        Self {
            structured: Mutex::new(structured.into()),
            text: Mutex::new(text.into_iter().map(String::from).collect()),
        }
    }

    /// A model that plans `index.html` + `style.css` and writes both.
    pub fn two_file_page() -> Self {
        Self::new(
            vec![
                Some(json!({
                    "name": "Static Page",
                    "description": "A two-file static page",
                    "techstack": "html, css",
                    "features": ["hero section"],
                    "files": [
                        {"path": "index.html", "purpose": "markup"},
                        {"path": "style.css", "purpose": "styles"}
                    ]
                })),
                Some(json!({
                    "implementation_steps": [
                        {"filepath": "index.html", "task_description": "Markup linking style.css"},
                        {"filepath": "style.css", "task_description": "Page styles"}
                    ]
                })),
            ],
            vec![
                "<FILE_CONTENT>\n<h1>Hello</h1>\n</FILE_CONTENT>",
                "<FILE_CONTENT>h1 { color: teal; }</FILE_CONTENT>",
            ],
        )
    }
}

impl LanguageModel for ScriptedModel {
    fn generate_structured(&self, _request: &StructuredRequest) -> Result<Option<Value>> {
        Ok(self.structured.lock().unwrap().pop_front().flatten())
    }

    fn generate_text(&self, _messages: &[ChatMessage]) -> Result<String> {
        Ok(self.text.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Observer that ignores every event.
pub struct Silent;

impl RunObserver for Silent {
    fn notify(&self, _event: &RunEvent) {}
}

/// Helper function to create a builder rooted in a fresh temp dir
pub fn create_test_builder(model: ScriptedModel) -> (TempDir, AgentBuilder) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let builder = AgentBuilder::new()
        .with_project_root(temp_dir.path().join("generated_project"))
        .with_model(model)
        .with_observer(Silent)
        .with_debug(false);
    (temp_dir, builder)
}
