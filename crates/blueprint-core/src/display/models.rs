//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it richly or print it as
//! plain text.

use std::fmt;

use super::{
    collections::Steps,
    datetime::{Elapsed, LocalDateTime},
};
use crate::models::{Plan, RunState, RunStatus, TaskPlan};

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Plan: {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        writeln!(f, "- Tech stack: {}", self.techstack)?;

        if !self.features.is_empty() {
            writeln!(f, "\n### Features")?;
            writeln!(f)?;
            for feature in &self.features {
                writeln!(f, "- {feature}")?;
            }
        }

        if !self.files.is_empty() {
            writeln!(f, "\n### Files")?;
            writeln!(f)?;
            for file in &self.files {
                writeln!(f, "- `{}`: {}", file.path, file.purpose)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for TaskPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Implementation Steps")?;
        writeln!(f)?;
        write!(f, "{}", Steps::new(&self.implementation_steps))
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Run ({})", self.status.with_icon())?;
        writeln!(f)?;

        writeln!(f, "- Prompt: {}", self.user_prompt)?;
        writeln!(f, "- Started: {}", LocalDateTime(&self.started_at))?;
        if let Some(finished) = &self.finished_at {
            writeln!(f, "- Finished: {}", LocalDateTime(finished))?;
            writeln!(
                f,
                "- Elapsed: {}",
                Elapsed {
                    start: &self.started_at,
                    end: finished,
                }
            )?;
        }
        writeln!(f, "- Transitions: {}", self.transitions)?;

        if let Some(plan) = &self.plan {
            writeln!(f)?;
            write!(f, "{plan}")?;
        }

        // Prefer the coder's copy: it carries progress.
        if let Some(coder) = &self.coder_state {
            writeln!(
                f,
                "\n## Implementation Steps ({}/{})",
                coder.current_step_idx,
                coder.total_steps()
            )?;
            writeln!(f)?;
            write!(
                f,
                "{}",
                Steps::new(&coder.task_plan.implementation_steps)
                    .with_completed(coder.current_step_idx)
            )?;
        } else if let Some(task_plan) = &self.task_plan {
            writeln!(f)?;
            write!(f, "{task_plan}")?;
        }

        Ok(())
    }
}
