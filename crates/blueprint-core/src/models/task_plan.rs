//! Task plan and implementation step definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Plan;

/// One concrete file edit the coder performs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ImplementationStep {
    /// Path of the file to write, relative to the project root
    pub filepath: String,

    /// Detailed description of what to implement in this file
    pub task_description: String,
}

/// Ordered implementation steps together with the plan they came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct TaskPlan {
    /// Steps to perform, in order
    pub implementation_steps: Vec<ImplementationStep>,

    /// The originating plan. Not part of the model contract: whatever the
    /// model echoes here is replaced by [`TaskPlan::with_plan`].
    #[serde(default)]
    #[schemars(skip)]
    pub plan: Plan,
}

impl TaskPlan {
    /// Replaces the embedded plan with the one the steps were derived from.
    pub fn with_plan(mut self, plan: Plan) -> Self {
        self.plan = plan;
        self
    }

    /// Number of implementation steps.
    pub fn len(&self) -> usize {
        self.implementation_steps.len()
    }

    /// Whether the plan has no steps at all.
    pub fn is_empty(&self) -> bool {
        self.implementation_steps.is_empty()
    }
}
