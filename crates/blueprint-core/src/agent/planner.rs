//! Planner stage: user prompt to [`Plan`].

use log::{debug, info};

use super::Agent;
use crate::{
    error::{AgentError, Result},
    llm,
    models::{Plan, RunState},
    prompts,
};

impl Agent {
    /// Turns `state.user_prompt` into a [`Plan`] stored in `state.plan`.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::InvalidInput` for a blank prompt and
    /// `AgentError::EmptyModelResponse` if the model produced nothing usable.
    pub fn plan(&self, state: &mut RunState) -> Result<()> {
        let user_prompt = state.user_prompt.trim();
        if user_prompt.is_empty() {
            return Err(AgentError::invalid_input("user_prompt").with_reason("must not be empty"));
        }

        let prompt = prompts::planner_prompt(user_prompt);
        if self.debug {
            debug!("Planner prompt:\n{prompt}");
        }

        let plan: Plan = llm::structured(self.model.as_ref(), "Plan", &prompt)?
            .ok_or(AgentError::EmptyModelResponse { stage: "planner" })?;

        info!("Planned '{}' with {} files", plan.name, plan.files.len());
        state.plan = Some(plan);
        Ok(())
    }
}
