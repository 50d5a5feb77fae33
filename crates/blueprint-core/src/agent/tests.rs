//! Tests for the agent module.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use serde_json::{json, Value};
use tempfile::TempDir;

use super::*;
use crate::{
    llm::{ChatMessage, StructuredRequest},
    models::{Plan, RunStatus, TaskPlan},
    prompts,
};

/// Replays canned replies in order and records what it was asked.
#[derive(Default)]
struct ScriptedModel {
    structured: Mutex<VecDeque<Option<Value>>>,
    text: Mutex<VecDeque<String>>,
    schema_names: Mutex<Vec<String>>,
    text_calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedModel {
    fn new(structured: Vec<Option<Value>>, text: Vec<&str>) -> Self {
        Self {
            structured: Mutex::new(structured.into()),
            text: Mutex::new(text.into_iter().map(String::from).collect()),
            ..Self::default()
        }
    }
}

impl LanguageModel for ScriptedModel {
    fn generate_structured(&self, request: &StructuredRequest) -> Result<Option<Value>> {
        self.schema_names
            .lock()
            .unwrap()
            .push(request.schema_name.clone());
        Ok(self.structured.lock().unwrap().pop_front().flatten())
    }

    fn generate_text(&self, messages: &[ChatMessage]) -> Result<String> {
        self.text_calls.lock().unwrap().push(messages.to_vec());
        Ok(self.text.lock().unwrap().pop_front().unwrap_or_default())
    }
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<RunEvent>>>);

impl Recorder {
    fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap().iter().map(ToString::to_string).collect()
    }
}

impl RunObserver for Recorder {
    fn notify(&self, event: &RunEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

fn two_file_plan() -> Value {
    json!({
        "name": "Static Page",
        "description": "A two-file static page",
        "techstack": "html, css",
        "features": ["landing section"],
        "files": [
            {"path": "index.html", "purpose": "markup"},
            {"path": "style.css", "purpose": "styles"}
        ]
    })
}

fn two_step_task_plan() -> Value {
    json!({
        "implementation_steps": [
            {"filepath": "index.html", "task_description": "Write the markup linking style.css"},
            {"filepath": "style.css", "task_description": "Style the page"}
        ]
    })
}

/// Helper function to create a test agent
fn create_test_agent(model: Arc<ScriptedModel>, recorder: Recorder) -> (TempDir, Agent) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let agent = AgentBuilder::new()
        .with_project_root(temp_dir.path().join("generated_project"))
        .with_shared_model(model)
        .with_observer(recorder)
        .with_debug(false)
        .build()
        .expect("Failed to create agent");
    (temp_dir, agent)
}

#[test]
fn test_two_file_end_to_end() {
    let model = Arc::new(ScriptedModel::new(
        vec![Some(two_file_plan()), Some(two_step_task_plan())],
        vec![
            "<FILE_CONTENT>\n<link rel=\"stylesheet\" href=\"style.css\">\n</FILE_CONTENT>",
            "Here you go:\n<FILE_CONTENT>body { margin: 0; }</FILE_CONTENT>",
        ],
    ));
    let recorder = Recorder::default();
    let (_temp_dir, agent) = create_test_agent(Arc::clone(&model), recorder.clone());

    let state = agent
        .run_blocking("Build a two-file static page")
        .expect("run succeeds");

    assert_eq!(state.status, RunStatus::Done);
    assert!(state.finished_at.is_some());
    // planner, architect, coder x3
    assert_eq!(state.transitions, 5);

    let coder_state = state.coder_state.as_ref().unwrap();
    assert_eq!(coder_state.current_step_idx, 2);
    assert_eq!(coder_state.task_plan.plan.name, "Static Page");
    assert_eq!(state.plan.as_ref().unwrap().files.len(), 2);

    let sandbox = agent.sandbox();
    assert_eq!(
        sandbox.read("index.html").unwrap(),
        "<link rel=\"stylesheet\" href=\"style.css\">"
    );
    assert_eq!(sandbox.read("style.css").unwrap(), "body { margin: 0; }");
    assert_eq!(sandbox.list(".").unwrap(), "index.html\nstyle.css");

    assert_eq!(
        recorder.lines(),
        vec![
            "[Architect] Generated 2 implementation steps.",
            "[Coder] Step 1/2: index.html",
            "[Coder] Finished step 1/2: index.html",
            "[Coder] Step 2/2: style.css",
            "[Coder] Finished step 2/2: style.css",
            "[Coder] All steps completed.",
        ]
    );

    assert_eq!(*model.schema_names.lock().unwrap(), vec!["Plan", "TaskPlan"]);
}

#[test]
fn test_coder_sees_project_files_and_existing_content() {
    let model = Arc::new(ScriptedModel::new(
        vec![Some(two_file_plan()), Some(two_step_task_plan())],
        vec![
            "<FILE_CONTENT>new markup</FILE_CONTENT>",
            "<FILE_CONTENT>css</FILE_CONTENT>",
        ],
    ));
    let (_temp_dir, agent) = create_test_agent(Arc::clone(&model), Recorder::default());
    agent.sandbox().write("index.html", "old markup").unwrap();

    agent.run_blocking("page").unwrap();

    let calls = model.text_calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0][0].content, prompts::coder_system_prompt());
    let first = &calls[0][1].content;
    assert!(first.contains("File: index.html"));
    assert!(first.contains("Project files:\nindex.html\n"));
    assert!(first.contains("Existing content:\nold markup\n"));

    let second = &calls[1][1].content;
    assert!(second.contains("File: style.css"));
    assert!(second.contains("Existing content:\n\n"));
}

#[test]
fn test_coder_done_is_idempotent() {
    let (_temp_dir, agent) = create_test_agent(
        Arc::new(ScriptedModel::default()),
        Recorder::default(),
    );
    let mut state = RunState::new("p");
    state.task_plan = Some(TaskPlan::default());

    agent.code(&mut state).unwrap();
    assert!(state.is_done());
    let finished_at = state.finished_at;

    agent.code(&mut state).unwrap();
    assert!(state.is_done());
    assert_eq!(state.finished_at, finished_at);
    assert_eq!(state.coder_state.as_ref().unwrap().current_step_idx, 0);
    assert_eq!(agent.sandbox().list(".").unwrap(), "No files found.");
}

#[test]
fn test_missing_tags_fail_with_step_context() {
    let model = Arc::new(ScriptedModel::new(
        vec![Some(two_file_plan()), Some(two_step_task_plan())],
        vec![
            "<FILE_CONTENT>ok</FILE_CONTENT>",
            "body { margin: 0; }",
        ],
    ));
    let (_temp_dir, agent) = create_test_agent(model, Recorder::default());

    let err = agent.run_blocking("page").unwrap_err();
    match &err {
        AgentError::StepFailed {
            step,
            total,
            filepath,
            source,
        } => {
            assert_eq!((*step, *total), (2, 2));
            assert_eq!(filepath, "style.css");
            assert!(matches!(**source, AgentError::MissingContentBlock));
        }
        other => panic!("expected StepFailed, got {other:?}"),
    }
    assert!(err.to_string().contains("2/2"));
    assert_eq!(agent.sandbox().read("index.html").unwrap(), "ok");
    assert_eq!(agent.sandbox().read("style.css").unwrap(), "");
}

#[test]
fn test_empty_reply_fails_step() {
    let mut state = RunState::new("p");
    state.task_plan = Some(serde_json::from_value(two_step_task_plan()).unwrap());
    let (_temp_dir, agent) = create_test_agent(
        Arc::new(ScriptedModel::new(vec![], vec![""])),
        Recorder::default(),
    );

    let err = agent.code(&mut state).unwrap_err();
    match err {
        AgentError::StepFailed { step, source, .. } => {
            assert_eq!(step, 1);
            assert!(matches!(*source, AgentError::EmptyContent));
        }
        other => panic!("expected StepFailed, got {other:?}"),
    }
    assert_eq!(state.coder_state.as_ref().unwrap().current_step_idx, 0);
    assert!(!state.is_done());
}

#[test]
fn test_escaping_step_path_fails() {
    let mut state = RunState::new("p");
    state.task_plan = Some(serde_json::from_value(json!({
        "implementation_steps": [
            {"filepath": "../outside.txt", "task_description": "escape"}
        ]
    })).unwrap());
    let (_temp_dir, agent) = create_test_agent(
        Arc::new(ScriptedModel::new(vec![], vec!["<FILE_CONTENT>x</FILE_CONTENT>"])),
        Recorder::default(),
    );

    let err = agent.code(&mut state).unwrap_err();
    match err {
        AgentError::StepFailed { source, .. } => {
            assert!(matches!(*source, AgentError::PathEscape { .. }));
        }
        other => panic!("expected StepFailed, got {other:?}"),
    }
}

#[test]
fn test_planner_empty_response() {
    let (_temp_dir, agent) = create_test_agent(
        Arc::new(ScriptedModel::new(vec![None], vec![])),
        Recorder::default(),
    );
    let err = agent.run_blocking("page").unwrap_err();
    assert!(matches!(
        err,
        AgentError::EmptyModelResponse { stage: "planner" }
    ));
}

#[test]
fn test_architect_empty_response() {
    let (_temp_dir, agent) = create_test_agent(
        Arc::new(ScriptedModel::new(vec![Some(two_file_plan()), None], vec![])),
        Recorder::default(),
    );
    let err = agent.run_blocking("page").unwrap_err();
    assert!(matches!(
        err,
        AgentError::EmptyModelResponse { stage: "architect" }
    ));
}

#[test]
fn test_blank_prompt_rejected() {
    let model = Arc::new(ScriptedModel::default());
    let (_temp_dir, agent) = create_test_agent(Arc::clone(&model), Recorder::default());
    let err = agent.run_blocking("   ").unwrap_err();
    assert!(matches!(err, AgentError::InvalidInput { .. }));
    assert!(model.schema_names.lock().unwrap().is_empty());
}

#[test]
fn test_stages_require_previous_output() {
    let (_temp_dir, agent) = create_test_agent(
        Arc::new(ScriptedModel::default()),
        Recorder::default(),
    );
    let mut state = RunState::new("p");
    assert!(matches!(
        agent.architect(&mut state),
        Err(AgentError::MissingState("plan"))
    ));
    assert!(matches!(
        agent.code(&mut state),
        Err(AgentError::MissingState("task_plan"))
    ));
}

#[test]
fn test_architect_replaces_echoed_plan() {
    let (_temp_dir, agent) = create_test_agent(
        Arc::new(ScriptedModel::new(
            vec![Some(json!({
                "implementation_steps": [],
                "plan": {"name": "hallucinated", "description": "", "techstack": ""}
            }))],
            vec![],
        )),
        Recorder::default(),
    );
    let mut state = RunState::new("p");
    let plan: Plan = serde_json::from_value(two_file_plan()).unwrap();
    state.plan = Some(plan.clone());

    agent.architect(&mut state).unwrap();
    assert_eq!(state.task_plan.unwrap().plan, plan);
}

#[test]
fn test_recursion_limit() {
    let model = Arc::new(ScriptedModel::new(
        vec![Some(two_file_plan()), Some(two_step_task_plan())],
        vec!["<FILE_CONTENT>a</FILE_CONTENT>", "<FILE_CONTENT>b</FILE_CONTENT>"],
    ));
    let temp_dir = TempDir::new().unwrap();
    let agent = AgentBuilder::new()
        .with_project_root(temp_dir.path())
        .with_shared_model(model)
        .with_observer(Recorder::default())
        .with_recursion_limit(4)
        .build()
        .unwrap();

    let err = agent.run_blocking("page").unwrap_err();
    assert!(matches!(err, AgentError::RecursionLimit { limit: 4 }));
    // Both files were written before the final Done transition was refused.
    assert_eq!(agent.sandbox().read("style.css").unwrap(), "b");
}

#[test]
fn test_exact_limit_is_enough() {
    let model = Arc::new(ScriptedModel::new(
        vec![Some(two_file_plan()), Some(two_step_task_plan())],
        vec!["<FILE_CONTENT>a</FILE_CONTENT>", "<FILE_CONTENT>b</FILE_CONTENT>"],
    ));
    let temp_dir = TempDir::new().unwrap();
    let agent = AgentBuilder::new()
        .with_project_root(temp_dir.path())
        .with_shared_model(model)
        .with_observer(Recorder::default())
        .with_recursion_limit(5)
        .build()
        .unwrap();

    let state = agent.run_blocking("page").unwrap();
    assert_eq!(state.transitions, 5);
}

#[test]
fn test_builder_requires_model() {
    let temp_dir = TempDir::new().unwrap();
    let err = AgentBuilder::new()
        .with_project_root(temp_dir.path())
        .build()
        .unwrap_err();
    assert!(matches!(err, AgentError::Configuration { .. }));
}

#[test]
fn test_builder_rejects_zero_limit() {
    let temp_dir = TempDir::new().unwrap();
    let err = AgentBuilder::new()
        .with_project_root(temp_dir.path())
        .with_model(ScriptedModel::default())
        .with_recursion_limit(0)
        .build()
        .unwrap_err();
    assert!(matches!(err, AgentError::Configuration { .. }));
}

#[tokio::test]
async fn test_async_run() {
    let model = Arc::new(ScriptedModel::new(
        vec![Some(two_file_plan()), Some(two_step_task_plan())],
        vec!["<FILE_CONTENT>a</FILE_CONTENT>", "<FILE_CONTENT>b</FILE_CONTENT>"],
    ));
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("out");
    let agent = AgentBuilder::new()
        .with_project_root(&root)
        .with_shared_model(model)
        .with_observer(Recorder::default())
        .build()
        .unwrap();

    let state = agent.run("Build a two-file static page").await.unwrap();
    assert!(state.is_done());
    assert_eq!(std::fs::read_to_string(root.join("index.html")).unwrap(), "a");
    assert_eq!(std::fs::read_to_string(root.join("style.css")).unwrap(), "b");
}
