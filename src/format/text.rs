//! Plain text formatting for the `list` view.

use tracker_lib::{Issue, Status};
use unicode_width::UnicodeWidthStr;

/// Horizontal rule framing the list view.
pub const RULE: &str = "--------------------------------------------------";

/// Heading printed between the two top rules.
pub const LIST_TITLE: &str = "                 Issue Tracker";

/// Display columns reserved for the title in a list line.
const TITLE_COLUMNS: usize = 50;

/// Display columns reserved for the id in a list line.
const ID_COLUMNS: usize = 3;

/// Status marker characters.
pub mod markers {
    /// Open issue.
    pub const OPEN: &str = "⚪️";
    /// Closed issue.
    pub const CLOSED: &str = "✅";
}

/// Return the marker for a status.
#[must_use]
pub const fn format_status_marker(status: Status) -> &'static str {
    match status {
        Status::Open => markers::OPEN,
        Status::Closed => markers::CLOSED,
    }
}

/// Join labels with `", "`.
#[must_use]
pub fn format_labels(labels: &[String]) -> String {
    labels.join(", ")
}

/// Left-align `text` in a field of `width` display columns.
///
/// Text already wider than the field is returned unchanged.
#[must_use]
pub fn pad_to_width(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    let mut out = String::with_capacity(text.len() + width.saturating_sub(used));
    out.push_str(text);
    for _ in used..width {
        out.push(' ');
    }
    out
}

/// The three header lines of the list view.
#[must_use]
pub fn format_list_header() -> String {
    format!("{RULE}\n{LIST_TITLE}\n{RULE}")
}

/// Format a single list line.
///
/// Format: `{marker} ID: {id:<3} | {title:<50} | Labels: {labels}`
#[must_use]
pub fn format_issue_line(issue: &Issue) -> String {
    format!(
        "{} ID: {:<width$} | {} | Labels: {}",
        format_status_marker(issue.status),
        issue.id,
        pad_to_width(&issue.title, TITLE_COLUMNS),
        format_labels(&issue.labels),
        width = ID_COLUMNS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn make_issue(id: u64, title: &str) -> Issue {
        let created = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap();
        Issue::new(id, title, created)
    }

    #[test]
    fn test_open_line_layout() {
        let mut issue = make_issue(1, "BUG: crash on save");
        issue.labels = vec!["bug".to_string()];
        let line = format_issue_line(&issue);
        let expected = format!(
            "⚪️ ID: 1   | BUG: crash on save{} | Labels: bug",
            " ".repeat(50 - "BUG: crash on save".len())
        );
        assert_eq!(line, expected);
    }

    #[test]
    fn test_closed_marker_and_empty_labels() {
        let mut issue = make_issue(12, "tidy up");
        issue.status = Status::Closed;
        let line = format_issue_line(&issue);
        assert!(line.starts_with("✅ ID: 12  | tidy up"));
        assert!(line.ends_with("| Labels: "));
    }

    #[test]
    fn test_wide_id_not_truncated() {
        let issue = make_issue(1234, "x");
        assert!(format_issue_line(&issue).contains("ID: 1234 | x"));
    }

    #[test]
    fn test_pad_to_width_counts_columns() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        // CJK characters take two columns each.
        assert_eq!(pad_to_width("日本", 6), "日本  ");
        assert_eq!(pad_to_width("longer", 3), "longer");
    }

    #[test]
    fn test_format_labels() {
        assert_eq!(format_labels(&[]), "");
        assert_eq!(
            format_labels(&["bug".to_string(), "ui".to_string()]),
            "bug, ui"
        );
    }

    #[test]
    fn test_header() {
        let header = format_list_header();
        let lines: Vec<&str> = header.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], RULE);
        assert_eq!(lines[1].trim(), "Issue Tracker");
    }
}
