//! Query and filter types for issue listing.

use crate::model::Issue;

/// Filter options for listing issues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    /// Keep only issues carrying exactly this label (case-sensitive).
    pub label: Option<String>,
    /// Include closed issues (default: open only).
    pub include_closed: bool,
}

impl ListFilters {
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub const fn include_closed(mut self, include: bool) -> Self {
        self.include_closed = include;
        self
    }

    /// Whether a single issue passes the filters.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        if !self.include_closed && !issue.is_open() {
            return false;
        }

        // An empty label filter means "no filter".
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => issue.has_label(label),
            _ => true,
        }
    }
}

/// Filter issues, keeping their store order.
#[must_use]
pub fn filter_issues<'a>(issues: &'a [Issue], filters: &ListFilters) -> Vec<&'a Issue> {
    issues.iter().filter(|issue| filters.matches(issue)).collect()
}
