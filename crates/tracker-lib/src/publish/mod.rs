//! Push open issues to a remote tracker, then clear the local store.
//!
//! The batch runs in three phases: resolve credentials (see
//! [`credentials`]), create one remote issue per open local issue, then
//! rewrite the local store. Per-issue failures do not stop the batch.
//!
//! With the default [`ClearPolicy::All`] the store is emptied even when some
//! creations failed, so those issues exist neither remotely nor locally any
//! more. The failures are returned in [`PublishReport::failed`] so callers can
//! at least tell the user what was lost. [`ClearPolicy::KeepFailed`] keeps
//! them instead.

pub mod credentials;
pub mod github;

pub use credentials::{
    CredentialProvider, Credentials, EnvProvider, HelperCliProvider, RepoTarget, Resolution,
    resolve_credentials,
};
pub use github::{CreatedIssue, DEFAULT_API_URL, GitHubClient, RemoteTracker};

use crate::error::{Result, TrackerError};
use crate::model::Issue;
use crate::store::IssueStore;

/// What to do with the local store after the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClearPolicy {
    /// Write an empty store regardless of per-issue failures.
    #[default]
    All,
    /// Keep the open issues whose remote creation failed; drop everything else.
    KeepFailed,
}

/// A local issue that now exists remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedIssue {
    pub local_id: u64,
    pub title: String,
    pub remote: CreatedIssue,
}

/// A local issue whose remote creation failed.
#[derive(Debug)]
pub struct PublishFailure {
    pub issue: Issue,
    pub error: TrackerError,
}

/// Summary of one publish batch.
#[derive(Debug)]
pub struct PublishReport {
    pub target: RepoTarget,
    pub published: Vec<PublishedIssue>,
    pub failed: Vec<PublishFailure>,
    /// Closed issues that were not sent.
    pub skipped_closed: usize,
    /// Issues left in the local store after the clear step.
    pub retained: usize,
}

impl PublishReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Create every open issue remotely, then rewrite the local store per `policy`.
///
/// `on_result` is called after each attempt so callers can report progress
/// while the batch runs.
///
/// # Errors
///
/// Returns `StoreUnwritable` if the final store write fails. Per-issue
/// remote failures are collected in the report, never returned. A fatal
/// error from the remote (see [`TrackerError::is_fatal`]) stops the batch
/// and is returned before the store is touched.
pub fn publish_open_issues<R, F>(
    store: &mut IssueStore,
    remote: &R,
    target: &RepoTarget,
    policy: ClearPolicy,
    mut on_result: F,
) -> Result<PublishReport>
where
    R: RemoteTracker + ?Sized,
    F: FnMut(&Issue, std::result::Result<&CreatedIssue, &TrackerError>),
{
    let mut published = Vec::new();
    let mut failed = Vec::new();

    let open = store.open_issues();
    let skipped_closed = store.len() - open.len();

    for issue in open {
        match remote.create_issue(target, issue.id, &issue.title, &issue.labels) {
            Ok(remote_issue) => {
                tracing::info!(local_id = issue.id, remote = ?remote_issue.number, "Published issue");
                on_result(issue, Ok(&remote_issue));
                published.push(PublishedIssue {
                    local_id: issue.id,
                    title: issue.title.clone(),
                    remote: remote_issue,
                });
            }
            Err(error) if error.is_fatal() => {
                tracing::error!(local_id = issue.id, %error, "Aborting publish batch");
                return Err(error);
            }
            Err(error) => {
                tracing::warn!(local_id = issue.id, %error, "Remote issue creation failed");
                on_result(issue, Err(&error));
                failed.push(PublishFailure {
                    issue: issue.clone(),
                    error,
                });
            }
        }
    }

    match policy {
        ClearPolicy::All => {
            if !failed.is_empty() {
                tracing::warn!(
                    failed = failed.len(),
                    "Clearing local store although some issues were not published"
                );
            }
            store.clear();
        }
        ClearPolicy::KeepFailed => {
            store.replace_all(failed.iter().map(|f| f.issue.clone()).collect());
        }
    }
    store.save()?;

    Ok(PublishReport {
        target: target.clone(),
        published,
        failed,
        skipped_closed,
        retained: store.len(),
    })
}
