//! Run status enumeration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of run statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    /// Stages are still executing
    #[default]
    Running,

    /// Every implementation step has been written
    Done,
}

impl FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "RUNNING" => Ok(RunStatus::Running),
            "DONE" => Ok(RunStatus::Done),
            _ => Err(format!("Invalid run status: {s}")),
        }
    }
}

impl RunStatus {
    /// Marker string for the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Running => "RUNNING",
            RunStatus::Done => "DONE",
        }
    }

    /// Get status with an icon for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            RunStatus::Running => "➤ Running",
            RunStatus::Done => "✓ Done",
        }
    }
}
