//! State threaded through every stage of a run.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{CoderState, Plan, RunStatus, TaskPlan};

/// Everything a run knows, owned by the control loop and lent to each stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunState {
    /// The request the run was started with
    pub user_prompt: String,

    /// Set by the planner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,

    /// Set by the architect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_plan: Option<TaskPlan>,

    /// Created on the coder's first invocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coder_state: Option<CoderState>,

    /// `Done` only once every implementation step has been written
    #[serde(default)]
    pub status: RunStatus,

    /// Number of stage executions so far
    #[serde(default)]
    pub transitions: usize,

    /// When the run started (UTC)
    pub started_at: Timestamp,

    /// When the coder reported completion (UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<Timestamp>,
}

impl RunState {
    /// Fresh state for `user_prompt`.
    pub fn new(user_prompt: impl Into<String>) -> Self {
        Self {
            user_prompt: user_prompt.into(),
            plan: None,
            task_plan: None,
            coder_state: None,
            status: RunStatus::Running,
            transitions: 0,
            started_at: Timestamp::now(),
            finished_at: None,
        }
    }

    /// Whether the run reached its completion marker.
    pub fn is_done(&self) -> bool {
        self.status == RunStatus::Done
    }

    /// Marks the run complete.
    pub fn mark_done(&mut self) {
        self.status = RunStatus::Done;
        if self.finished_at.is_none() {
            self.finished_at = Some(Timestamp::now());
        }
    }
}
