//! Data models threaded through a run.
//!
//! The planner produces a [`Plan`], the architect turns it into a
//! [`TaskPlan`], and the coder walks that plan with a [`CoderState`]. All of
//! it lives in a single [`RunState`] owned by the control loop.
//!
//! [`Plan`] and [`TaskPlan`] derive [`schemars::JsonSchema`]: their schemas
//! are the structured-output contract with the model. Display
//! implementations live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use blueprint_core::models::{CoderState, ImplementationStep, TaskPlan};
//!
//! let task_plan = TaskPlan {
//!     implementation_steps: vec![ImplementationStep {
//!         filepath: "index.html".to_string(),
//!         task_description: "Create the page skeleton".to_string(),
//!     }],
//!     ..TaskPlan::default()
//! };
//!
//! let mut coder = CoderState::new(task_plan);
//! assert_eq!(coder.current_step().unwrap().filepath, "index.html");
//! coder.advance();
//! assert!(coder.is_finished());
//! ```

pub mod coder_state;
pub mod plan;
pub mod run_state;
pub mod status;
pub mod task_plan;


pub use coder_state::CoderState;
pub use plan::{File, Plan};
pub use run_state::RunState;
pub use status::RunStatus;
pub use task_plan::{ImplementationStep, TaskPlan};
