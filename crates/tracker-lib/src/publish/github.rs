//! Remote issue creation over the GitHub REST API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};

use super::credentials::RepoTarget;
use crate::error::{Result, TrackerError};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response from GitHub when creating an issue.
///
/// Both fields are best-effort: a 2xx status alone means the issue exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreatedIssue {
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    labels: &'a [String],
}

/// Something that can create issues in a remote repository.
pub trait RemoteTracker {
    /// Create one issue carrying `title` and `labels`.
    ///
    /// `local_id` is only used to attribute failures.
    ///
    /// # Errors
    ///
    /// Returns `RemoteCreateFailed` if the remote rejects the issue or cannot be reached.
    fn create_issue(
        &self,
        target: &RepoTarget,
        local_id: u64,
        title: &str,
        labels: &[String],
    ) -> Result<CreatedIssue>;
}

/// Blocking GitHub REST client with bearer-token auth.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http_client: Client,
    api_url: String,
}

impl GitHubClient {
    /// Build a client for `api_url` (normally [`DEFAULT_API_URL`]).
    ///
    /// # Errors
    ///
    /// Returns `Config` if the token is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| TrackerError::Config("token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static("2022-11-28"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("issue-tracker/", env!("CARGO_PKG_VERSION"))),
        );

        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TrackerError::Config(format!("could not build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn issues_url(&self, target: &RepoTarget) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.api_url, target.owner, target.repo
        )
    }
}

impl RemoteTracker for GitHubClient {
    fn create_issue(
        &self,
        target: &RepoTarget,
        local_id: u64,
        title: &str,
        labels: &[String],
    ) -> Result<CreatedIssue> {
        let url = self.issues_url(target);
        tracing::debug!(%url, local_id, "Creating remote issue");

        let res = self
            .http_client
            .post(&url)
            .json(&CreateIssueRequest { title, labels })
            .send()
            .map_err(|e| TrackerError::remote_create(local_id, e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            return Err(TrackerError::remote_create(
                local_id,
                format!("{status} - {}", body.trim()),
            ));
        }

        // The issue was created; a body we cannot read must not turn that into a failure.
        let body = res.text().unwrap_or_default();
        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            tracing::warn!(local_id, error = %e, "Created issue but could not read the response body");
            CreatedIssue::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn target() -> RepoTarget {
        RepoTarget::new("octo", "cat")
    }

    #[test]
    fn test_create_issue_sends_title_labels_and_auth() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/repos/octo/cat/issues")
            .match_header("authorization", "Bearer s3cret")
            .match_header("accept", "application/vnd.github+json")
            .match_header("user-agent", Matcher::Regex("^issue-tracker/".to_string()))
            .match_body(Matcher::Json(json!({
                "title": "BUG: crash on save",
                "labels": ["bug"]
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"number": 42, "html_url": "https://github.com/octo/cat/issues/42"}"#)
            .create();

        let client = GitHubClient::new(&server.url(), "s3cret").unwrap();
        let created = client
            .create_issue(&target(), 1, "BUG: crash on save", &["bug".to_string()])
            .unwrap();

        mock.assert();
        assert_eq!(created.number, Some(42));
        assert_eq!(created.html_url, "https://github.com/octo/cat/issues/42");
    }

    #[test]
    fn test_success_status_with_unreadable_body_is_success() {
        for body in ["", "<html>ok</html>"] {
            let mut server = Server::new();
            let mock = server
                .mock("POST", "/repos/octo/cat/issues")
                .with_status(201)
                .with_body(body)
                .create();

            let client = GitHubClient::new(&server.url(), "tok").unwrap();
            let created = client.create_issue(&target(), 5, "x", &[]).unwrap();

            mock.assert();
            assert_eq!(created, CreatedIssue::default());
        }
    }

    #[test]
    fn test_create_issue_error_status() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/repos/octo/cat/issues")
            .with_status(422)
            .with_body(r#"{"message": "Validation Failed"}"#)
            .create();

        let client = GitHubClient::new(&format!("{}/", server.url()), "tok").unwrap();
        let err = client.create_issue(&target(), 7, "x", &[]).unwrap_err();

        mock.assert();
        match err {
            TrackerError::RemoteCreateFailed { id, reason } => {
                assert_eq!(id, 7);
                assert!(reason.contains("422"));
                assert!(reason.contains("Validation Failed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unreachable_server() {
        // Port 9 (discard) on localhost is almost never listening.
        let client = GitHubClient::new("http://127.0.0.1:9", "tok").unwrap();
        let err = client.create_issue(&target(), 3, "x", &[]).unwrap_err();
        assert!(matches!(err, TrackerError::RemoteCreateFailed { id: 3, .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_invalid_token_rejected() {
        assert!(matches!(
            GitHubClient::new(DEFAULT_API_URL, "bad\ntoken"),
            Err(TrackerError::Config(_))
        ));
    }
}
