use std::path::PathBuf;

use clap::Parser;

/// Prompt used when none is given on the command line.
pub const DEFAULT_PROMPT: &str = "Build a colourful modern todo app in html css and js";

/// Generate a small software project from a one-line request
///
/// Blueprint asks a language model to plan the project, break the plan into
/// per-file implementation steps, and then write each file in turn into the
/// project root. The model endpoint is configured through the environment:
/// GROQ_API_KEY (required), GROQ_BASE_URL, AGENT_MODEL, AGENT_MODEL_TIMEOUT
/// and AGENT_DEBUG=1 for verbose tracing.
#[derive(Parser, Debug)]
#[command(version, about, name = "blueprint")]
pub struct Args {
    /// Directory generated files are written to
    #[arg(long, default_value = "generated_project")]
    pub project_root: PathBuf,

    /// Disable colored output and use plain text
    #[arg(long)]
    pub no_color: bool,

    /// What to build. Words are joined with spaces.
    #[arg(value_name = "PROMPT")]
    pub prompt: Vec<String>,
}

impl Args {
    /// The user prompt, falling back to [`DEFAULT_PROMPT`].
    pub fn prompt(&self) -> String {
        let joined = self.prompt.join(" ");
        if joined.trim().is_empty() {
            DEFAULT_PROMPT.to_string()
        } else {
            joined
        }
    }
}
