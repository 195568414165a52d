//! Error types for `tracker-lib`.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for tracker-lib operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    // === Repository Errors ===
    /// No repository marker was found between the start directory and the filesystem root.
    #[error("Not a git repository (or any of the parent directories): {}", start.display())]
    NotARepository { start: PathBuf },

    // === Store Errors ===
    /// The store file exists but could not be read.
    #[error("Could not read issue store {}: {source}", path.display())]
    StoreUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file does not contain a valid issue array.
    #[error("Could not parse issue store {}: {reason}", path.display())]
    StoreCorrupt { path: PathBuf, reason: String },

    /// The store file could not be written.
    #[error("Could not write issue store {}: {source}", path.display())]
    StoreUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Issue Errors ===
    /// Issue ID input is not a number.
    #[error("Invalid issue ID '{input}': please provide a number")]
    InvalidIssueId { input: String },

    /// Issue with the specified ID was not found.
    #[error("Issue with ID #{id} not found")]
    IssueNotFound { id: u64 },

    /// The highest stored ID leaves no room for another one.
    #[error("Cannot assign a new issue ID: #{max_id} is already the largest possible")]
    IdSpaceExhausted { max_id: u64 },

    /// Issue titles must contain something other than whitespace.
    #[error("Issue title cannot be empty")]
    EmptyTitle,

    // === Export Errors ===
    /// Export format is not one of the supported ones.
    #[error("Unknown format '{format}'. Supported formats: markdown, json")]
    UnsupportedFormat { format: String },

    // === Publish Errors ===
    /// Neither the helper CLI nor the environment produced a complete credential set.
    #[error(
        "No credentials available: authenticate the '{helper}' CLI ('{helper} auth login'), \
         or set GITHUB_TOKEN, GITHUB_OWNER and GITHUB_REPO"
    )]
    CredentialsUnavailable { helper: String },

    /// A single remote issue creation failed.
    #[error("Failed to create remote issue for local ID #{id}: {reason}")]
    RemoteCreateFailed { id: u64, reason: String },

    // === Configuration Errors ===
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TrackerError {
    #[must_use]
    pub fn remote_create(id: u64, reason: impl Into<String>) -> Self {
        Self::RemoteCreateFailed {
            id,
            reason: reason.into(),
        }
    }

    /// Whether the surrounding operation should keep going after this error.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::RemoteCreateFailed { .. })
    }
}

/// Result type using `TrackerError`.
pub type Result<T> = std::result::Result<T, TrackerError>;
