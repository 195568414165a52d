//! Issue store backed by the repository's JSON file.
//!
//! The store is loaded whole, mutated in memory and written back whole.
//! There is no locking: two processes that load, mutate and save at the same
//! time race, and the last save wins.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};

use crate::error::{Result, TrackerError};
use crate::jsonfile;
use crate::labels::{Labeler, normalize_labels};
use crate::locate;
use crate::model::{Issue, Status};
use crate::query::{ListFilters, filter_issues};

/// Result of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The issue went from open to closed.
    Closed,
    /// The issue was already closed; nothing changed.
    AlreadyClosed,
}

/// Issues of one repository plus the file they came from.
#[derive(Debug, Clone)]
pub struct IssueStore {
    issues: Vec<Issue>,
    path: PathBuf,
}

impl IssueStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Load the store at `path`. A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnreadable` or `StoreCorrupt` if the file cannot be used.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let issues = jsonfile::load(path)?;
        Ok(Self {
            issues,
            path: path.to_path_buf(),
        })
    }

    /// Find the repository root above `start_dir` and open its store.
    ///
    /// # Errors
    ///
    /// Returns `NotARepository` if no repository encloses `start_dir`, or any
    /// error from [`IssueStore::open`].
    pub fn locate(start_dir: &Path) -> Result<Self> {
        let root = locate::find_repo_root(start_dir)?;
        Self::open(locate::store_path(&root))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write every issue back to the store file.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnwritable` on I/O failure.
    pub fn save(&self) -> Result<()> {
        jsonfile::save(&self.path, &self.issues)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    /// The ID the next created issue will receive.
    ///
    /// # Errors
    ///
    /// Returns `IdSpaceExhausted` if the largest stored ID is `u64::MAX`.
    pub fn next_id(&self) -> Result<u64> {
        let max_id = self.issues.iter().map(|issue| issue.id).max().unwrap_or(0);
        max_id
            .checked_add(1)
            .ok_or(TrackerError::IdSpaceExhausted { max_id })
    }

    /// List issues matching `filters`, in store order.
    #[must_use]
    pub fn list_issues(&self, filters: &ListFilters) -> Vec<&Issue> {
        filter_issues(&self.issues, filters)
    }

    /// Open issues in store order.
    #[must_use]
    pub fn open_issues(&self) -> Vec<&Issue> {
        self.issues.iter().filter(|issue| issue.is_open()).collect()
    }

    // ========================================================================
    // Mutations (in memory; call `save` to persist)
    // ========================================================================

    /// Create a new open issue with the default label rules.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTitle` if the title is blank, or `IdSpaceExhausted` if
    /// no further ID can be assigned.
    pub fn create_issue(&mut self, title: &str, created_at: DateTime<FixedOffset>) -> Result<Issue> {
        self.create_issue_with(title, created_at, &Labeler::default())
    }

    /// Create a new open issue, labeling it with `labeler`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTitle` if the title is blank, or `IdSpaceExhausted` if
    /// no further ID can be assigned.
    pub fn create_issue_with(
        &mut self,
        title: &str,
        created_at: DateTime<FixedOffset>,
        labeler: &Labeler<'_>,
    ) -> Result<Issue> {
        if title.trim().is_empty() {
            return Err(TrackerError::EmptyTitle);
        }

        let mut issue = Issue::new(self.next_id()?, title, created_at);
        labeler.apply(&mut issue);

        tracing::info!(id = issue.id, labels = ?issue.labels, "Created issue");
        self.issues.push(issue.clone());
        Ok(issue)
    }

    /// Close an open issue.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if no issue has this ID.
    pub fn close_issue(&mut self, id: u64) -> Result<CloseOutcome> {
        let issue = self
            .issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or(TrackerError::IssueNotFound { id })?;

        if issue.status == Status::Closed {
            tracing::debug!(id, "Issue already closed");
            return Ok(CloseOutcome::AlreadyClosed);
        }

        issue.status = Status::Closed;
        tracing::info!(id, "Closed issue");
        Ok(CloseOutcome::Closed)
    }

    /// Replace the whole collection.
    pub fn replace_all(&mut self, mut issues: Vec<Issue>) {
        for issue in &mut issues {
            normalize_labels(&mut issue.labels);
        }
        self.issues = issues;
    }

    /// Drop every issue.
    pub fn clear(&mut self) {
        self.issues.clear();
    }
}

/// Parse a user-supplied issue ID.
///
/// # Errors
///
/// Returns `InvalidIssueId` if the input is not a non-negative integer.
pub fn parse_issue_id(input: &str) -> Result<u64> {
    input
        .trim()
        .parse::<u64>()
        .map_err(|_| TrackerError::InvalidIssueId {
            input: input.to_string(),
        })
}
