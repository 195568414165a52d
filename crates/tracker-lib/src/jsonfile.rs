//! JSON file I/O for the issue store.
//!
//! The whole store is one pretty-printed JSON array. Every save rewrites the
//! file through a sibling temp file and a rename, so readers see either the
//! old array or the new one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, TrackerError};
use crate::labels::normalize_labels;
use crate::model::Issue;

/// Load issues from the store file.
///
/// A missing file is an empty store.
///
/// # Errors
///
/// Returns `StoreUnreadable` if the file exists but cannot be read, or
/// `StoreCorrupt` if it is not a valid issue array.
pub fn load(path: &Path) -> Result<Vec<Issue>> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Store file missing, starting empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(TrackerError::StoreUnreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let issues: Vec<Issue> =
        serde_json::from_slice(&data).map_err(|e| TrackerError::StoreCorrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    tracing::debug!(path = %path.display(), count = issues.len(), "Loaded issues");
    Ok(issues)
}

/// Serialize issues the way they are stored: 2-space pretty JSON.
///
/// Labels are normalized on the way out.
///
/// # Errors
///
/// Returns `StoreUnwritable` if serialization fails.
pub fn to_pretty_json(path: &Path, issues: &[Issue]) -> Result<String> {
    let normalized: Vec<Issue> = issues
        .iter()
        .cloned()
        .map(|mut issue| {
            normalize_labels(&mut issue.labels);
            issue
        })
        .collect();

    serde_json::to_string_pretty(&normalized).map_err(|e| TrackerError::StoreUnwritable {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

/// Save issues to the store file with an atomic write.
///
/// # Errors
///
/// Returns `StoreUnwritable` on any I/O failure.
pub fn save(path: &Path, issues: &[Issue]) -> Result<()> {
    let json = to_pretty_json(path, issues)?;

    let tmp_path = temp_path(path);
    if let Err(source) = write_and_rename(&tmp_path, path, json.as_bytes()) {
        // Whatever step failed, the temp file must not outlive the save.
        let _ = fs::remove_file(&tmp_path);
        return Err(TrackerError::StoreUnwritable {
            path: path.to_path_buf(),
            source,
        });
    }

    tracing::debug!(path = %path.display(), count = issues.len(), "Saved issues");
    Ok(())
}

fn write_and_rename(tmp_path: &Path, path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp_path, path)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
