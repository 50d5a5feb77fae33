//! Sandboxed tools the model is allowed to use.
//!
//! - [`sandbox`]: [`Sandbox`], read/write/list/run confined to a project root
//! - [`shell`]: command execution with a deadline
//! - [`dispatch`]: alias normalization and execution of [`ToolCall`]s

pub mod dispatch;
pub mod sandbox;
pub mod shell;

pub use dispatch::{
    ListFilesArgs, ReadFileArgs, RunCommandArgs, ToolCall, ToolDefinition, ToolKind, ToolOutput,
    WriteFileArgs,
};
pub use sandbox::{Sandbox, NO_FILES};
pub use shell::{CommandOutput, DEFAULT_TIMEOUT};
