//! Core library for the Blueprint project generator.
//!
//! This crate turns a natural-language request into a set of files on disk.
//! A run passes through three stages, each backed by a language model:
//!
//! - **Planner**: request → [`Plan`] (name, stack, features, files)
//! - **Architect**: plan → [`TaskPlan`] (ordered per-file implementation steps)
//! - **Coder**: writes one step's file per invocation until every step is done
//!
//! All file access goes through a [`Sandbox`] confined to the project root.
//! The model is an injected [`LanguageModel`]; [`ChatCompletionsClient`] talks
//! to any OpenAI-compatible endpoint.
//!
//! # Display Architecture
//!
//! Domain models implement [`std::fmt::Display`] as markdown, and the
//! [`display`] wrappers add context such as step progress. The CLI renders
//! that markdown in the terminal.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use blueprint_core::{AgentBuilder, ChatCompletionsClient, ModelConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let agent = AgentBuilder::new()
//!     .with_project_root("generated_project")
//!     .with_model(ChatCompletionsClient::new(ModelConfig::from_env()?))
//!     .build()?;
//!
//! let state = agent.run("Build a two-file static page").await?;
//! println!("{state}");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod display;
pub mod error;
pub mod llm;
pub mod models;
pub mod observer;
pub mod prompts;
pub mod tools;

// Re-export commonly used types
pub use agent::{Agent, AgentBuilder, Graph, Node};
pub use config::ModelConfig;
pub use display::{Elapsed, LocalDateTime, Steps};
pub use error::{AgentError, Result};
pub use llm::{ChatCompletionsClient, ChatMessage, LanguageModel, StructuredRequest};
pub use models::{CoderState, ImplementationStep, Plan, RunState, RunStatus, TaskPlan};
pub use observer::{LogObserver, RunEvent, RunObserver};
pub use tools::{Sandbox, ToolCall, ToolOutput};
