//! Credential and target-repository resolution.
//!
//! Providers are tried in order; the first one that yields a complete
//! [`Credentials`] wins. A provider that cannot produce one returns
//! [`Resolution::Unresolved`] rather than an error.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::error::{Result, TrackerError};

/// Environment variable holding the API token for the fallback tier.
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
/// Environment variable holding the repository owner for the fallback tier.
pub const ENV_OWNER: &str = "GITHUB_OWNER";
/// Environment variable holding the repository name for the fallback tier.
pub const ENV_REPO: &str = "GITHUB_REPO";

/// Repository that receives published issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    pub owner: String,
    pub repo: String,
}

impl RepoTarget {
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parse an `owner/name` slug. Anything else (including empty parts) is `None`.
    #[must_use]
    pub fn parse_slug(slug: &str) -> Option<Self> {
        let mut parts = slug.trim().split('/');
        let owner = parts.next()?.trim();
        let repo = parts.next()?.trim();
        if parts.next().is_some() || owner.is_empty() || repo.is_empty() {
            return None;
        }
        Some(Self::new(owner, repo))
    }
}

impl fmt::Display for RepoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A complete credential bundle.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub target: RepoTarget,
    /// Name of the provider that produced these credentials.
    pub source: &'static str,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("target", &self.target)
            .field("source", &self.source)
            .finish()
    }
}

/// Outcome of asking one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(Credentials),
    Unresolved { reason: String },
}

impl Resolution {
    fn unresolved(reason: impl Into<String>) -> Self {
        Self::Unresolved {
            reason: reason.into(),
        }
    }
}

/// A source of credentials and target repository.
pub trait CredentialProvider {
    /// Short name used in logs and user messages.
    fn name(&self) -> &'static str;

    /// Try to produce a complete credential bundle.
    fn resolve(&self) -> Resolution;
}

// ============================================================================
// Tier 1: helper CLI
// ============================================================================

/// Asks an external helper CLI (`gh` by default) for the repository and token.
#[derive(Debug, Clone)]
pub struct HelperCliProvider {
    program: String,
    working_dir: PathBuf,
}

impl HelperCliProvider {
    #[must_use]
    pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the helper and return its trimmed stdout, or why it failed.
    fn run(&self, args: &[&str]) -> std::result::Result<String, String> {
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|e| format!("could not run '{}': {e}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "'{} {}' exited with {}: {}",
                self.program,
                args.join(" "),
                output.status,
                stderr.trim()
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl CredentialProvider for HelperCliProvider {
    fn name(&self) -> &'static str {
        "helper"
    }

    fn resolve(&self) -> Resolution {
        let slug = match self.run(&[
            "repo",
            "view",
            "--json",
            "name,owner",
            "--jq",
            ".owner.login + \"/\" + .name",
        ]) {
            Ok(slug) => slug,
            Err(reason) => return Resolution::unresolved(reason),
        };
        let Some(target) = RepoTarget::parse_slug(&slug) else {
            return Resolution::unresolved(format!("unexpected repository slug '{slug}'"));
        };

        let token = match self.run(&["auth", "token"]) {
            Ok(token) => token,
            Err(reason) => return Resolution::unresolved(reason),
        };
        if token.is_empty() {
            return Resolution::unresolved("helper returned an empty token");
        }

        Resolution::Resolved(Credentials {
            token,
            target,
            source: self.name(),
        })
    }
}

// ============================================================================
// Tier 2: environment
// ============================================================================

/// Reads token, owner and repository from an environment snapshot.
#[derive(Debug, Clone, Default)]
pub struct EnvProvider {
    vars: HashMap<String, String>,
}

impl EnvProvider {
    #[must_use]
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl CredentialProvider for EnvProvider {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn resolve(&self) -> Resolution {
        let mut values = Vec::with_capacity(3);
        let mut missing = Vec::new();
        for key in [ENV_TOKEN, ENV_OWNER, ENV_REPO] {
            match self.get(key) {
                Some(value) => values.push(value),
                None => missing.push(key),
            }
        }

        match values.as_slice() {
            &[token, owner, repo] => Resolution::Resolved(Credentials {
                token: token.to_string(),
                target: RepoTarget::new(owner, repo),
                source: self.name(),
            }),
            _ => Resolution::unresolved(format!("missing {}", missing.join(", "))),
        }
    }
}

/// Try each provider in order and return the first complete credential set.
///
/// `helper` only names the helper CLI in the error message.
///
/// # Errors
///
/// Returns `CredentialsUnavailable` when every provider is unresolved.
pub fn resolve_credentials(
    providers: &[&dyn CredentialProvider],
    helper: &str,
) -> Result<Credentials> {
    for provider in providers {
        match provider.resolve() {
            Resolution::Resolved(credentials) => {
                tracing::info!(
                    provider = provider.name(),
                    target = %credentials.target,
                    "Resolved publish credentials"
                );
                return Ok(credentials);
            }
            Resolution::Unresolved { reason } => {
                tracing::warn!(provider = provider.name(), %reason, "Credential provider unresolved");
            }
        }
    }

    Err(TrackerError::CredentialsUnavailable {
        helper: helper.to_string(),
    })
}
