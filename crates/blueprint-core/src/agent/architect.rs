//! Architect stage: [`Plan`](crate::models::Plan) to [`TaskPlan`].

use log::debug;

use super::Agent;
use crate::{
    error::{AgentError, Result},
    llm,
    models::{RunState, TaskPlan},
    observer::RunEvent,
    prompts,
};

impl Agent {
    /// Expands `state.plan` into ordered implementation steps.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::MissingState` if the planner has not run and
    /// `AgentError::EmptyModelResponse` if the model produced nothing usable.
    pub fn architect(&self, state: &mut RunState) -> Result<()> {
        let plan = state.plan.clone().ok_or(AgentError::MissingState("plan"))?;
        let prompt = prompts::architect_prompt(&serde_json::to_string(&plan)?);
        if self.debug {
            debug!("Architect prompt:\n{prompt}");
        }

        let task_plan: TaskPlan = llm::structured(self.model.as_ref(), "TaskPlan", &prompt)?
            .ok_or(AgentError::EmptyModelResponse { stage: "architect" })?;
        let task_plan = task_plan.with_plan(plan);

        self.emit(RunEvent::StepsPlanned {
            count: task_plan.len(),
        });
        if self.debug {
            debug!("Task plan: {}", serde_json::to_string(&task_plan)?);
        }

        state.task_plan = Some(task_plan);
        Ok(())
    }
}
