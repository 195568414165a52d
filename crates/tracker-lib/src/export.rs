//! Static exports of the whole store.

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::{Result, TrackerError};
use crate::model::Issue;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(TrackerError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Render every issue, open and closed, in store order.
///
/// # Errors
///
/// Returns `StoreUnwritable` only if JSON serialization fails.
pub fn export(issues: &[Issue], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Markdown => Ok(render_markdown(issues)),
        ExportFormat::Json => render_json(issues),
    }
}

/// Render a Markdown document with one bullet block per issue.
#[must_use]
pub fn render_markdown(issues: &[Issue]) -> String {
    let mut out = String::from("# Project Issues\n\n");
    for issue in issues {
        let _ = write!(
            out,
            "\n- **[{}]** {} `[ID: {}]`\n  - **Labels**: {}\n  - **Created**: {}\n",
            issue.status,
            issue.title,
            issue.id,
            issue.labels.join(", "),
            issue.created_at.format("%Y-%m-%d"),
        );
    }
    out
}

/// Render the issues as a pretty JSON array (2-space indent).
///
/// # Errors
///
/// Returns `StoreUnwritable` if serialization fails.
pub fn render_json(issues: &[Issue]) -> Result<String> {
    crate::jsonfile::to_pretty_json(std::path::Path::new("<export>"), issues)
}
