//! Name-normalizing dispatch for model-issued tool calls.
//!
//! Models are inconsistent about tool names (`write_file`, `write`,
//! `repo_browser.write`, ...). Every accepted spelling maps onto one
//! [`ToolKind`]; [`Sandbox::execute`] holds the single implementation.

use std::{fmt, str::FromStr, time::Duration};

use log::debug;
use schemars::{json_schema, schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{sandbox::Sandbox, shell::CommandOutput};
use crate::error::{AgentError, Result};

/// The canonical operations exposed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    WriteFile,
    ReadFile,
    ListFiles,
    RunCommand,
    CurrentDirectory,
}

impl ToolKind {
    /// Every tool, in a stable order.
    pub const ALL: [ToolKind; 5] = [
        ToolKind::WriteFile,
        ToolKind::ReadFile,
        ToolKind::ListFiles,
        ToolKind::RunCommand,
        ToolKind::CurrentDirectory,
    ];

    /// Canonical tool name.
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::WriteFile => "write_file",
            ToolKind::ReadFile => "read_file",
            ToolKind::ListFiles => "list_files",
            ToolKind::RunCommand => "run_cmd",
            ToolKind::CurrentDirectory => "get_current_directory",
        }
    }

    /// Human-readable description sent with the tool definition.
    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::WriteFile => {
                "Writes content to a file at the specified path within the project root."
            }
            ToolKind::ReadFile => {
                "Reads content from a file at the specified path within the project root."
            }
            ToolKind::ListFiles => {
                "Lists all files in the specified directory within the project root."
            }
            ToolKind::RunCommand => {
                "Runs a shell command in the specified directory and returns the result."
            }
            ToolKind::CurrentDirectory => "Returns the current working directory.",
        }
    }

    fn parameters(&self) -> Value {
        match self {
            ToolKind::WriteFile => schema_for!(WriteFileArgs).to_value(),
            ToolKind::ReadFile => schema_for!(ReadFileArgs).to_value(),
            ToolKind::ListFiles => schema_for!(ListFilesArgs).to_value(),
            ToolKind::RunCommand => schema_for!(RunCommandArgs).to_value(),
            ToolKind::CurrentDirectory => {
                json_schema!({"type": "object", "properties": {}}).to_value()
            }
        }
    }
}

impl FromStr for ToolKind {
    type Err = AgentError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim() {
            "write_file" | "write" | "repo_browser.write" => Ok(ToolKind::WriteFile),
            "read_file" | "read" | "repo_browser.read" => Ok(ToolKind::ReadFile),
            "list_files" | "list" | "repo_browser.list" => Ok(ToolKind::ListFiles),
            "run_cmd" => Ok(ToolKind::RunCommand),
            "get_current_directory" => Ok(ToolKind::CurrentDirectory),
            other => Err(AgentError::UnknownTool(other.to_string())),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Arguments of `write_file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WriteFileArgs {
    /// Path relative to the project root
    pub path: String,
    /// Full file content
    pub content: String,
}

/// Arguments of `read_file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReadFileArgs {
    /// Path relative to the project root
    pub path: String,
}

/// Arguments of `list_files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ListFilesArgs {
    /// Directory relative to the project root
    #[serde(default = "default_directory")]
    pub directory: String,
}

/// Arguments of `run_cmd`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunCommandArgs {
    /// Shell command line
    pub cmd: String,
    /// Working directory relative to the project root
    #[serde(default)]
    pub cwd: Option<String>,
    /// Timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout: u64,
}

fn default_directory() -> String {
    ".".to_string()
}

fn default_timeout_secs() -> u64 {
    super::shell::DEFAULT_TIMEOUT.as_secs()
}

/// A parsed, validated tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    WriteFile(WriteFileArgs),
    ReadFile(ReadFileArgs),
    ListFiles(ListFilesArgs),
    RunCommand(RunCommandArgs),
    CurrentDirectory,
}

impl ToolCall {
    /// Normalizes `name` and decodes `args` for the matching tool.
    ///
    /// `null` arguments are treated as an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnknownTool`] for unrecognized names and
    /// [`AgentError::Serialization`] when `args` do not fit the tool.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use blueprint_core::tools::{ToolCall, ToolKind};
    /// use serde_json::json;
    ///
    /// let call = ToolCall::parse("repo_browser.read", json!({"path": "index.html"})).unwrap();
    /// assert_eq!(call.kind(), ToolKind::ReadFile);
    /// ```
    pub fn parse(name: &str, args: Value) -> Result<Self> {
        let args = if args.is_null() {
            Value::Object(Default::default())
        } else {
            args
        };

        Ok(match name.parse::<ToolKind>()? {
            ToolKind::WriteFile => ToolCall::WriteFile(serde_json::from_value(args)?),
            ToolKind::ReadFile => ToolCall::ReadFile(serde_json::from_value(args)?),
            ToolKind::ListFiles => ToolCall::ListFiles(serde_json::from_value(args)?),
            ToolKind::RunCommand => ToolCall::RunCommand(serde_json::from_value(args)?),
            ToolKind::CurrentDirectory => ToolCall::CurrentDirectory,
        })
    }

    /// Which tool this call targets.
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolCall::WriteFile(_) => ToolKind::WriteFile,
            ToolCall::ReadFile(_) => ToolKind::ReadFile,
            ToolCall::ListFiles(_) => ToolKind::ListFiles,
            ToolCall::RunCommand(_) => ToolKind::RunCommand,
            ToolCall::CurrentDirectory => ToolKind::CurrentDirectory,
        }
    }

    /// Definitions of every canonical tool, for advertising to a model.
    pub fn definitions() -> Vec<ToolDefinition> {
        ToolKind::ALL
            .iter()
            .map(|kind| ToolDefinition {
                name: kind.name(),
                description: kind.description(),
                parameters: kind.parameters(),
            })
            .collect()
    }
}

/// Name, description and argument schema of one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

/// What a tool produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput {
    Text(String),
    Command(CommandOutput),
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolOutput::Text(text) => f.write_str(text),
            ToolOutput::Command(out) => {
                writeln!(f, "exit code: {}", out.exit_code)?;
                writeln!(f, "stdout:\n{}", out.stdout)?;
                write!(f, "stderr:\n{}", out.stderr)
            }
        }
    }
}

impl Sandbox {
    /// Executes a parsed tool call.
    pub fn execute(&self, call: &ToolCall) -> Result<ToolOutput> {
        match call {
            ToolCall::WriteFile(args) => {
                self.write(&args.path, &args.content).map(ToolOutput::Text)
            }
            ToolCall::ReadFile(args) => self.read(&args.path).map(ToolOutput::Text),
            ToolCall::ListFiles(args) => self.list(&args.directory).map(ToolOutput::Text),
            ToolCall::RunCommand(args) => self
                .run_command(
                    &args.cmd,
                    args.cwd.as_deref(),
                    Duration::from_secs(args.timeout),
                )
                .map(ToolOutput::Command),
            ToolCall::CurrentDirectory => Ok(ToolOutput::Text(self.current_directory())),
        }
    }

    /// Parses and executes a call by (possibly aliased) name.
    pub fn invoke(&self, name: &str, args: Value) -> Result<ToolOutput> {
        let call = ToolCall::parse(name, args)?;
        debug!("Tool call {} ({name})", call.kind());
        self.execute(&call)
    }
}
