//! Coder progress tracking.

use serde::{Deserialize, Serialize};

use super::{ImplementationStep, TaskPlan};

/// Position of the coder within a [`TaskPlan`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoderState {
    /// The plan being executed
    pub task_plan: TaskPlan,

    /// Index of the next step to run; equals the step count once finished
    pub current_step_idx: usize,
}

impl CoderState {
    /// Starts at the first step of `task_plan`.
    pub fn new(task_plan: TaskPlan) -> Self {
        Self {
            task_plan,
            current_step_idx: 0,
        }
    }

    /// Total number of steps.
    pub fn total_steps(&self) -> usize {
        self.task_plan.len()
    }

    /// The step to run next, or `None` once every step is done.
    pub fn current_step(&self) -> Option<&ImplementationStep> {
        self.task_plan
            .implementation_steps
            .get(self.current_step_idx)
    }

    /// Whether every step has been executed.
    pub fn is_finished(&self) -> bool {
        self.current_step_idx >= self.total_steps()
    }

    /// Moves to the next step. Never advances past the step count.
    pub fn advance(&mut self) {
        if !self.is_finished() {
            self.current_step_idx += 1;
        }
    }
}
