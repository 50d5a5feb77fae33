//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::models::ImplementationStep;

/// Newtype wrapper for displaying implementation steps with progress.
///
/// Steps before `completed` are shown as done, the step at `completed` as in
/// progress, the rest as pending. Handles empty collections gracefully.
///
/// # Examples
///
/// ```rust
/// use blueprint_core::{display::Steps, models::ImplementationStep};
///
/// let steps = vec![
///     ImplementationStep {
///         filepath: "index.html".to_string(),
///         task_description: "Page skeleton".to_string(),
///     },
///     ImplementationStep {
///         filepath: "style.css".to_string(),
///         task_description: "Styles".to_string(),
///     },
/// ];
///
/// let output = Steps::new(&steps).with_completed(1).to_string();
/// assert!(output.contains("1. ✓ `index.html`"));
/// assert!(output.contains("2. ➤ `style.css`"));
/// ```
pub struct Steps<'a> {
    steps: &'a [ImplementationStep],
    completed: usize,
}

impl<'a> Steps<'a> {
    /// Wraps `steps`, none of them completed.
    pub fn new(steps: &'a [ImplementationStep]) -> Self {
        Self {
            steps,
            completed: 0,
        }
    }

    /// Sets how many leading steps are finished.
    pub fn with_completed(mut self, completed: usize) -> Self {
        self.completed = completed;
        self
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Get the number of steps in the collection.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    fn icon(&self, index: usize) -> &'static str {
        match index.cmp(&self.completed) {
            std::cmp::Ordering::Less => "✓",
            std::cmp::Ordering::Equal => "➤",
            std::cmp::Ordering::Greater => "○",
        }
    }
}

impl fmt::Display for Steps<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return writeln!(f, "No implementation steps.");
        }

        for (index, step) in self.steps.iter().enumerate() {
            writeln!(
                f,
                "{}. {} `{}`: {}",
                index + 1,
                self.icon(index),
                step.filepath,
                step.task_description
            )?;
        }
        Ok(())
    }
}
