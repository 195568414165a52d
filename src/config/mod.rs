//! Configuration management for `issue_tracker`.
//!
//! Configuration is layered, later layers winning:
//! - Built-in defaults
//! - Workspace config (`<repo-root>/.issue_tracker.yaml`)
//! - Environment variable overrides (`ISSUE_TRACKER_*`)
//!
//! The process environment is read exactly once into an [`EnvSnapshot`]
//! and handed to whatever needs it, so nothing below the CLI touches
//! `std::env` directly.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use tracker_lib::publish::DEFAULT_API_URL;

use crate::{Result, TrackerError};

/// Workspace config file name, placed next to the store.
pub const CONFIG_FILE_NAME: &str = ".issue_tracker.yaml";

/// Overrides the GitHub API base URL.
pub const ENV_API_URL: &str = "ISSUE_TRACKER_API_URL";
/// Overrides the helper program used for tier-1 credentials.
pub const ENV_HELPER: &str = "ISSUE_TRACKER_HELPER";
/// Disables the helper tier when truthy.
pub const ENV_NO_HELPER: &str = "ISSUE_TRACKER_NO_HELPER";

/// Default helper program.
pub const DEFAULT_HELPER: &str = "gh";

/// Frozen copy of the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Variables that are not valid UTF-8 are skipped.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    #[must_use]
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Non-empty value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Whether `key` holds `1`, `true` or `yes` (case-insensitive).
    #[must_use]
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            )
        })
    }

    /// The raw variable map, for providers that read their own keys.
    #[must_use]
    pub fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the GitHub REST API.
    pub api_url: String,
    /// Helper program queried for repository and token.
    pub helper: String,
    /// Whether the helper tier is tried at all.
    pub use_helper: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            helper: DEFAULT_HELPER.to_string(),
            use_helper: true,
        }
    }
}

/// On-disk shape of `.issue_tracker.yaml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_url: Option<String>,
    helper: Option<String>,
    use_helper: Option<bool>,
}

/// Path of the workspace config file for a repository root.
#[must_use]
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load configuration for the repository at `root`.
///
/// # Errors
///
/// Returns `TrackerError::Config` if the workspace file exists but cannot be
/// read or parsed.
pub fn load(root: &Path, env: &EnvSnapshot) -> Result<Config> {
    let mut config = Config::default();

    if let Some(file) = load_file(&config_path(root))? {
        config.apply_file(file);
    }
    config.apply_env(env);

    debug!(
        api_url = %config.api_url,
        helper = %config.helper,
        use_helper = config.use_helper,
        "Loaded configuration"
    );
    Ok(config)
}

fn load_file(path: &Path) -> Result<Option<FileConfig>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(TrackerError::Config(format!(
                "cannot read {}: {e}",
                path.display()
            )));
        }
    };

    // An empty file deserializes to unit, not a mapping.
    if raw.trim().is_empty() {
        return Ok(Some(FileConfig::default()));
    }

    serde_yaml::from_str(&raw)
        .map(Some)
        .map_err(|e| TrackerError::Config(format!("invalid {}: {e}", path.display())))
}

impl Config {
    fn apply_file(&mut self, file: FileConfig) {
        if let Some(api_url) = file.api_url {
            self.api_url = api_url;
        }
        if let Some(helper) = file.helper {
            self.helper = helper;
        }
        if let Some(use_helper) = file.use_helper {
            self.use_helper = use_helper;
        }
    }

    fn apply_env(&mut self, env: &EnvSnapshot) {
        if let Some(api_url) = env.get(ENV_API_URL) {
            self.api_url = api_url.to_string();
        }
        if let Some(helper) = env.get(ENV_HELPER) {
            self.helper = helper.to_string();
        }
        if env.is_truthy(ENV_NO_HELPER) {
            self.use_helper = false;
        }
    }
}
