//! Coder stage: writes one implementation step per invocation.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::Agent;
use crate::{
    error::{AgentError, Result},
    llm::ChatMessage,
    models::{CoderState, ImplementationStep, RunState},
    observer::RunEvent,
    prompts,
};

static FILE_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<FILE_CONTENT>\s*(.*?)\s*</FILE_CONTENT>").unwrap());

/// Pulls the file payload out of a coder reply.
///
/// The first `<FILE_CONTENT>`…`</FILE_CONTENT>` pair wins; surrounding
/// whitespace inside the tags is dropped.
///
/// # Errors
///
/// Returns `AgentError::EmptyContent` for an empty reply and
/// `AgentError::MissingContentBlock` if no tag pair is present.
///
/// # Examples
///
/// ```rust
/// use blueprint_core::agent::extract_file_content;
///
/// let reply = "Sure!\n<FILE_CONTENT>\n<h1>Hi</h1>\n</FILE_CONTENT>";
/// assert_eq!(extract_file_content(reply).unwrap(), "<h1>Hi</h1>");
/// assert!(extract_file_content("<h1>Hi</h1>").is_err());
/// ```
pub fn extract_file_content(raw: &str) -> Result<&str> {
    if raw.is_empty() {
        return Err(AgentError::EmptyContent);
    }
    FILE_CONTENT
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(AgentError::MissingContentBlock)
}

impl Agent {
    /// Executes the next implementation step, or marks the run done.
    ///
    /// Once every step is written further calls only re-assert `Done`.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::MissingState` if the architect has not run and
    /// `AgentError::StepFailed` wrapping whatever broke the current step.
    pub fn code(&self, state: &mut RunState) -> Result<()> {
        if state.coder_state.is_none() {
            let task_plan = state
                .task_plan
                .clone()
                .ok_or(AgentError::MissingState("task_plan"))?;
            state.coder_state = Some(CoderState::new(task_plan));
        }
        let coder_state = state
            .coder_state
            .as_mut()
            .ok_or(AgentError::MissingState("coder_state"))?;

        let total = coder_state.total_steps();
        let Some(task) = coder_state.current_step().cloned() else {
            self.emit(RunEvent::AllStepsCompleted);
            state.mark_done();
            return Ok(());
        };
        let step = coder_state.current_step_idx + 1;

        self.write_step(&task, step, total)
            .map_err(|e| AgentError::step_failed(step, total, &task.filepath, e))?;

        self.emit(RunEvent::StepFinished {
            step,
            total,
            filepath: task.filepath,
        });
        coder_state.advance();
        Ok(())
    }

    fn write_step(&self, task: &ImplementationStep, step: usize, total: usize) -> Result<()> {
        let existing = self.sandbox.read(&task.filepath)?;
        let project_files = self.sandbox.list(".")?;

        self.emit(RunEvent::StepStarted {
            step,
            total,
            filepath: task.filepath.clone(),
        });

        let user_prompt = prompts::coder_user_prompt(task, &project_files, &existing);
        if self.debug {
            debug!("Coder prompt for {}:\n{user_prompt}", task.filepath);
        }
        let messages = [
            ChatMessage::system(prompts::coder_system_prompt()),
            ChatMessage::user(user_prompt),
        ];
        let reply = self.model.generate_text(&messages)?;
        if self.debug {
            debug!("Coder reply for {}:\n{reply}", task.filepath);
        }

        let content = extract_file_content(&reply)?;
        let written = self.sandbox.write(&task.filepath, content)?;
        debug!("{written}");
        Ok(())
    }
}
