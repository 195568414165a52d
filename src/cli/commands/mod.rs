//! Command implementations.
//!
//! Each command opens the store from the [`Workspace`](crate::cli::Workspace),
//! does one operation and prints the result. Diagnostics go through
//! `tracing`; user-facing output goes to stdout.

pub mod add;
pub mod close;
pub mod list;
pub mod publish;
pub mod push;
