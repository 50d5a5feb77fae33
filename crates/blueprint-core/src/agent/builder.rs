//! Builder for creating and configuring Agent instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use super::Agent;
use crate::{
    config,
    error::{AgentError, Result},
    llm::LanguageModel,
    observer::{LogObserver, RunObserver},
    tools::Sandbox,
};

/// Directory generated files land in when no root is configured.
pub const DEFAULT_PROJECT_DIR: &str = "generated_project";

/// Maximum stage executions per run.
pub const DEFAULT_RECURSION_LIMIT: usize = 100;

/// Builder for creating and configuring Agent instances.
pub struct AgentBuilder {
    project_root: Option<PathBuf>,
    model: Option<Arc<dyn LanguageModel>>,
    observer: Arc<dyn RunObserver>,
    recursion_limit: usize,
    debug: Option<bool>,
}

impl AgentBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            project_root: None,
            model: None,
            observer: Arc::new(LogObserver),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            debug: None,
        }
    }

    /// Sets the directory generated files are written to.
    ///
    /// If not specified, uses `generated_project` under the current
    /// directory.
    pub fn with_project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the model every stage talks to. Required.
    pub fn with_model<M: LanguageModel + 'static>(mut self, model: M) -> Self {
        self.model = Some(Arc::new(model));
        self
    }

    /// Shares an already-wrapped model.
    pub fn with_shared_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Replaces the default [`LogObserver`].
    pub fn with_observer<O: RunObserver + 'static>(mut self, observer: O) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Overrides the maximum number of stage executions per run.
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Forces debug tracing on or off. Defaults to `AGENT_DEBUG`.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Builds the configured agent, creating the project root.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::Configuration` if no model was set or the
    /// recursion limit is zero.
    /// Returns `AgentError::FileSystem` if the project root cannot be created.
    pub fn build(self) -> Result<Agent> {
        let model = self.model.ok_or_else(|| AgentError::Configuration {
            message: "a language model is required".to_string(),
        })?;
        if self.recursion_limit == 0 {
            return Err(AgentError::Configuration {
                message: "recursion limit must be at least 1".to_string(),
            });
        }

        let root = self
            .project_root
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_DIR));
        let sandbox = Sandbox::open(&root)?;

        Ok(Agent {
            model,
            sandbox,
            observer: self.observer,
            recursion_limit: self.recursion_limit,
            debug: self.debug.unwrap_or_else(config::debug_enabled),
        })
    }
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
