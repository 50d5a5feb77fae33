//! Plan model definition and related functionality.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// High-level description of the software to build.
///
/// This is the shape the planner asks the model to fill in; its JSON Schema is
/// sent along with the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Plan {
    /// Name of the app to build
    pub name: String,

    /// One-line description of the app
    pub description: String,

    /// Tech stack to use, e.g. "python", "javascript", "react", "flask"
    pub techstack: String,

    /// Features the app should have
    #[serde(default)]
    pub features: Vec<String>,

    /// Files to be created, with the purpose of each
    #[serde(default)]
    pub files: Vec<File>,
}

/// A file named by the plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct File {
    /// Path of the file relative to the project root
    pub path: String,

    /// Why the file exists, e.g. "main application logic"
    pub purpose: String,
}
