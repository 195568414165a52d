//! Terminal output formatting for `issue_tracker`.
//!
//! Everything here returns `String`s; the command modules decide where
//! they are printed.

mod text;

pub use text::{
    LIST_TITLE, RULE, format_issue_line, format_labels, format_list_header, format_status_marker,
    pad_to_width,
};
