//! Error types for the agent library.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Comprehensive error type for all agent operations.
#[derive(Error, Debug)]
pub enum AgentError {
    /// A stage received no usable structured output from the model
    #[error("{stage} did not return a valid response")]
    EmptyModelResponse { stage: &'static str },
    /// The coder received an empty reply
    #[error("Empty model response. Expected <FILE_CONTENT>...</FILE_CONTENT>.")]
    EmptyContent,
    /// The coder reply had no delimited file payload
    #[error("Missing <FILE_CONTENT> block in model response.")]
    MissingContentBlock,
    /// Wraps any failure of a single coder step
    #[error("Coder failed at step {step}/{total} for '{filepath}'")]
    StepFailed {
        step: usize,
        total: usize,
        filepath: String,
        #[source]
        source: Box<AgentError>,
    },
    /// A path resolved outside the project root
    #[error("Path '{path}' resolves outside project root '{root}'")]
    PathEscape { path: String, root: PathBuf },
    /// A shell command ran past its deadline
    #[error("Command '{command}' timed out after {timeout:?}")]
    CommandTimeout { command: String, timeout: Duration },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The model endpoint answered with an error status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    /// The model endpoint answered with something we cannot interpret
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    #[error("Missing API key: {0}")]
    MissingApiKey(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// A stage ran before the state it depends on was produced
    #[error("Run state is missing '{0}'")]
    MissingState(&'static str),
    #[error("Unknown tool '{0}'")]
    UnknownTool(String),
    /// The control loop exceeded its transition ceiling
    #[error("Recursion limit of {limit} reached without hitting a stop condition")]
    RecursionLimit { limit: usize },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> AgentError {
        AgentError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl AgentError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps an io error with the path it happened at.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Wraps a coder failure with the step it happened at (`step` is 1-based).
    pub fn step_failed(
        step: usize,
        total: usize,
        filepath: impl Into<String>,
        source: Self,
    ) -> Self {
        Self::StepFailed {
            step,
            total,
            filepath: filepath.into(),
            source: Box::new(source),
        }
    }
}

/// Extension trait mapping io results onto [`AgentError::FileSystem`].
pub trait IoResultExt<T> {
    /// Attach the path the io operation was working on.
    fn fs_context(self, path: &std::path::Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|e| AgentError::file_system(path, e))
    }
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;
