//! The plan-then-code agent.
//!
//! An [`Agent`] owns everything a run needs: the injected [`LanguageModel`],
//! the [`Sandbox`] all files are written through, and a [`RunObserver`] that
//! receives progress events. A run threads one [`RunState`] through three
//! stages:
//!
//! ```text
//! ┌─────────┐    ┌───────────┐    ┌───────┐
//! │ Planner │───▶│ Architect │───▶│ Coder │──┐
//! └─────────┘    └───────────┘    └───────┘  │ until Done
//!                                     ▲      │
//!                                     └──────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Agent`] instances with configuration
//! - [`planner`]: Prompt → [`Plan`](crate::models::Plan)
//! - [`architect`]: Plan → [`TaskPlan`](crate::models::TaskPlan)
//! - [`coder`]: Executes one implementation step per invocation
//! - [`graph`]: The control loop and its recursion ceiling
//!
//! # Usage
//!
//! ```rust,no_run
//! use blueprint_core::{AgentBuilder, ChatCompletionsClient, ModelConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let agent = AgentBuilder::new()
//!     .with_project_root("generated_project")
//!     .with_model(ChatCompletionsClient::new(ModelConfig::from_env()?))
//!     .build()?;
//!
//! let state = agent.run("Build a colourful modern todo app in html css and js").await?;
//! println!("{state}");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::task;

use crate::{
    error::{AgentError, Result},
    llm::LanguageModel,
    models::RunState,
    observer::{RunEvent, RunObserver},
    tools::Sandbox,
};

pub mod architect;
pub mod builder;
pub mod coder;
pub mod graph;
pub mod planner;

#[cfg(test)]
mod tests;

pub use builder::{AgentBuilder, DEFAULT_PROJECT_DIR, DEFAULT_RECURSION_LIMIT};
pub use coder::extract_file_content;
pub use graph::{Graph, Node};

/// Runs the planner, architect and coder stages against a project root.
pub struct Agent {
    pub(crate) model: Arc<dyn LanguageModel>,
    pub(crate) sandbox: Sandbox,
    pub(crate) observer: Arc<dyn RunObserver>,
    pub(crate) recursion_limit: usize,
    pub(crate) debug: bool,
}

impl Agent {
    /// The sandbox generated files are written through.
    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    /// Maximum number of stage executions per run.
    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    /// Runs a full pipeline for `user_prompt` on the current thread.
    ///
    /// Every call blocks on the model and on the file system.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure, or [`AgentError::RecursionLimit`] if
    /// the loop does not finish within the ceiling.
    pub fn run_blocking(&self, user_prompt: &str) -> Result<RunState> {
        Graph::new(self).run(RunState::new(user_prompt))
    }

    /// Runs a full pipeline on a blocking worker thread.
    ///
    /// # Errors
    ///
    /// Same as [`Agent::run_blocking`], plus [`AgentError::Configuration`]
    /// if the worker panics.
    pub async fn run(self, user_prompt: impl Into<String>) -> Result<RunState> {
        let user_prompt = user_prompt.into();
        task::spawn_blocking(move || self.run_blocking(&user_prompt))
            .await
            .map_err(|e| AgentError::Configuration {
                message: format!("Task join error: {e}"),
            })?
    }

    pub(crate) fn emit(&self, event: RunEvent) {
        self.observer.notify(&event);
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("sandbox", &self.sandbox)
            .field("recursion_limit", &self.recursion_limit)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}
