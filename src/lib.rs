//! Chorus - multi-model answer aggregator
//!
//! This library fans a single question out to several text-generation HTTP
//! endpoints, extracts and scores every reply, and fuses the best ones into
//! one consolidated answer.

// Allow certain clippy warnings that are stylistic
#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::format_push_string)] // Performance improvement but stylistic
#![allow(clippy::return_self_not_must_use)] // Builder pattern is clear enough
#![allow(clippy::items_after_statements)] // Locally-scoped use statements are fine

pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod logger;
pub mod messages;
pub mod pipeline;
pub mod sources;
pub mod ui;

// Re-export important structs and functions for easier testing
pub use config::Config;
pub use pipeline::{Candidate, FetchOutcome, Orchestrator, RawResult};
pub use sources::Source;
