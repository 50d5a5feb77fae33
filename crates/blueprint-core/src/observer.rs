//! Progress events emitted while a run advances.

use std::fmt;

use log::info;

/// Something observable that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// The architect produced `count` implementation steps
    StepsPlanned { count: usize },
    /// The coder is about to write `filepath` (`step` is 1-based)
    StepStarted {
        step: usize,
        total: usize,
        filepath: String,
    },
    /// The coder wrote `filepath`
    StepFinished {
        step: usize,
        total: usize,
        filepath: String,
    },
    /// Every step has been written
    AllStepsCompleted,
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepsPlanned { count } => {
                write!(f, "[Architect] Generated {count} implementation steps.")
            }
            Self::StepStarted {
                step,
                total,
                filepath,
            } => write!(f, "[Coder] Step {step}/{total}: {filepath}"),
            Self::StepFinished {
                step,
                total,
                filepath,
            } => write!(f, "[Coder] Finished step {step}/{total}: {filepath}"),
            Self::AllStepsCompleted => write!(f, "[Coder] All steps completed."),
        }
    }
}

/// Receives [`RunEvent`]s as they happen.
pub trait RunObserver: Send + Sync {
    fn notify(&self, event: &RunEvent);
}

/// Default observer: forwards events to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl RunObserver for LogObserver {
    fn notify(&self, event: &RunEvent) {
        info!("{event}");
    }
}
