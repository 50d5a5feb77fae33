//! Markdown formatting for run results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! wrappers in this module add context such as step progress or local
//! timestamps. Everything produces markdown, which the CLI either renders
//! with a terminal skin or prints as-is.
//!
//! - [`collections`]: [`Steps`], a step list with progress icons
//! - [`datetime`]: [`LocalDateTime`] and [`Elapsed`]
//! - [`models`]: Display implementations for the domain models

pub mod collections;
pub mod datetime;
pub mod models;

pub use collections::Steps;
pub use datetime::{Elapsed, LocalDateTime};
