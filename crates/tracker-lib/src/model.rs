//! Core data types for tracker-lib.
//!
//! Field order of [`Issue`] is the on-disk field order, so it must stay
//! `id, title, status, labels, created_at`.

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Issue lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Open,
    Closed,
}

impl Status {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

/// `null` and a missing field both load as no labels.
fn nullable_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The primary issue entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    /// Unique, positive ID assigned as max + 1.
    pub id: u64,

    /// Title as supplied by the user, prefix tokens included.
    pub title: String,

    /// Workflow status.
    pub status: Status,

    /// Sorted, duplicate-free labels.
    #[serde(default, deserialize_with = "nullable_labels")]
    pub labels: Vec<String>,

    /// Creation timestamp with the creator's UTC offset.
    pub created_at: DateTime<FixedOffset>,
}

impl Issue {
    /// Build a fresh open issue with no labels.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>, created_at: DateTime<FixedOffset>) -> Self {
        Self {
            id,
            title: title.into(),
            status: Status::Open,
            labels: Vec::new(),
            created_at,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }

    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// Current local time with its offset, the timestamp stamped on new issues.
#[must_use]
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}
