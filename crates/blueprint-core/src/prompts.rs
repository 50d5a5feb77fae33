//! Instruction templates for each stage.

use crate::models::ImplementationStep;

/// Opening/closing markers the coder must wrap file content in.
pub const CONTENT_OPEN: &str = "<FILE_CONTENT>";
pub const CONTENT_CLOSE: &str = "</FILE_CONTENT>";

/// Prompt asking for a high-level [`Plan`](crate::models::Plan).
pub fn planner_prompt(user_prompt: &str) -> String {
    format!(
        "You are the PLANNER agent. Convert the user prompt into a COMPLETE engineering project plan.\n\
         List the features the project needs and every file it consists of, with the purpose of each file.\n\
         Keep file paths relative to the project root.\n\n\
         User request:\n{user_prompt}"
    )
}

/// Prompt asking for a [`TaskPlan`](crate::models::TaskPlan) derived from a serialized plan.
pub fn architect_prompt(plan_json: &str) -> String {
    format!(
        "You are the ARCHITECT agent. Given this project plan, break it down into explicit engineering tasks.\n\n\
         RULES:\n\
         - For each file in the plan, create one or more IMPLEMENTATION STEPS.\n\
         - In each step, name the exact file path and describe concretely what to implement: \
         variables, functions, classes and components to define.\n\
         - Mention how this step depends on or is used by previous steps.\n\
         - Order steps so that dependencies are implemented first.\n\
         - Each step must be SELF-CONTAINED but also carry FORWARD the relevant context from earlier steps.\n\n\
         Project Plan:\n{plan_json}"
    )
}

/// Fixed system instruction for every coder call.
pub fn coder_system_prompt() -> &'static str {
    "You are the CODER agent.\n\
     You are implementing one specific file of a larger project.\n\
     Always produce the complete, working content of that file.\n\
     Keep naming and imports consistent with the other project files.\n\
     Never write anything outside the requested file."
}

/// User instruction for one coder step.
pub fn coder_user_prompt(step: &ImplementationStep, project_files: &str, existing: &str) -> String {
    format!(
        "Task: {task}\n\
         File: {file}\n\
         Project files:\n{project_files}\n\
         Existing content:\n{existing}\n\
         Return the FULL final content for this file only.\n\
         Do not explain.\n\
         Wrap output exactly with:\n\
         {CONTENT_OPEN}\n\
         ...content...\n\
         {CONTENT_CLOSE}",
        task = step.task_description,
        file = step.filepath,
    )
}
