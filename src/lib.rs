//! `issue_tracker` - Local-first issue tracker
//!
//! This crate provides the `issue-tracker` CLI on top of [`tracker_lib`].
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Configuration layering (defaults, workspace file, environment)
//! - [`format`] - Terminal output formatting
//! - [`logging`] - tracing subscriber setup
//!
//! The issue store, labeling, filtering, export and publish logic live in
//! the `tracker-lib` crate.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;

pub use tracker_lib::{Result, TrackerError};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
