//! Helpers for driving the `issue-tracker` binary against a scratch repository.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use predicates::Predicate;
use tempfile::TempDir;

/// Variables that would leak the developer's own setup into a test run.
const SCRUBBED_VARS: &[&str] = &[
    "GITHUB_TOKEN",
    "GITHUB_OWNER",
    "GITHUB_REPO",
    "ISSUE_TRACKER_API_URL",
    "ISSUE_TRACKER_HELPER",
    "ISSUE_TRACKER_NO_HELPER",
    "RUST_LOG",
];

/// A temporary repository: a directory with a `.git` marker.
pub struct TrackerWorkspace {
    dir: TempDir,
}

impl TrackerWorkspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        fs::create_dir(dir.path().join(".git")).expect("create .git marker");
        Self { dir }
    }

    /// A temp directory with no repository marker.
    pub fn without_repo() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_path(&self) -> PathBuf {
        self.root().join(".issue_tracker.json")
    }

    /// Raw store contents, or `None` if the file does not exist.
    pub fn store_contents(&self) -> Option<String> {
        fs::read_to_string(self.store_path()).ok()
    }

    pub fn store_json(&self) -> serde_json::Value {
        let raw = self.store_contents().expect("store file exists");
        serde_json::from_str(&raw).expect("store is valid JSON")
    }

    pub fn write_store(&self, contents: &str) {
        fs::write(self.store_path(), contents).expect("write store");
    }

    /// Create a subdirectory and return its path.
    pub fn subdir(&self, name: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::create_dir_all(&path).expect("create subdir");
        path
    }
}

/// Captured result of one CLI invocation.
pub struct RunOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    #[track_caller]
    pub fn assert_success(&self, label: &str) -> &Self {
        assert!(
            self.status.success(),
            "{label} failed\nstdout:\n{}\nstderr:\n{}",
            self.stdout,
            self.stderr
        );
        self
    }

    #[track_caller]
    pub fn assert_failure(&self, label: &str) -> &Self {
        assert!(
            !self.status.success(),
            "{label} unexpectedly succeeded\nstdout:\n{}",
            self.stdout
        );
        assert_eq!(self.status.code(), Some(1), "{label} exit code");
        self
    }

    #[track_caller]
    pub fn assert_stdout(&self, predicate: impl Predicate<str>, label: &str) -> &Self {
        assert!(
            predicate.eval(&self.stdout),
            "{label}: stdout does not satisfy {predicate}\nstdout:\n{}",
            self.stdout
        );
        self
    }

    #[track_caller]
    pub fn assert_stderr(&self, predicate: impl Predicate<str>, label: &str) -> &Self {
        assert!(
            predicate.eval(&self.stderr),
            "{label}: stderr does not satisfy {predicate}\nstderr:\n{}",
            self.stderr
        );
        self
    }
}

/// Run the binary in the workspace root with a clean environment and the
/// helper tier disabled.
pub fn run_tracker<I, S>(workspace: &TrackerWorkspace, args: I, label: &str) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_tracker_with_env(workspace, args, &[("ISSUE_TRACKER_NO_HELPER", "1")], label)
}

/// Run the binary in the workspace root with extra environment variables.
pub fn run_tracker_with_env<I, S>(
    workspace: &TrackerWorkspace,
    args: I,
    env: &[(&str, &str)],
    label: &str,
) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_tracker_in(workspace.root(), args, env, label)
}

/// Run the binary from `cwd`.
pub fn run_tracker_in<I, S>(cwd: &Path, args: I, env: &[(&str, &str)], label: &str) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::cargo_bin("issue-tracker").expect("binary is built");
    cmd.current_dir(cwd).args(args);
    for var in SCRUBBED_VARS {
        cmd.env_remove(var);
    }
    for (key, value) in env {
        cmd.env(key, value);
    }

    let output = cmd
        .output()
        .unwrap_or_else(|e| panic!("{label}: failed to spawn: {e}"));
    RunOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
