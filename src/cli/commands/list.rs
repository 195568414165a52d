//! List command implementation.

use anyhow::Result;
use tracker_lib::{IssueStore, ListFilters, store_path};

use crate::cli::{ListArgs, Workspace};
use crate::format::{RULE, format_issue_line, format_list_header};

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn execute(args: &ListArgs, ws: &Workspace) -> Result<()> {
    let store = IssueStore::open(store_path(&ws.root))?;
    let filters = build_filters(args);
    let issues = store.list_issues(&filters);

    println!("{}", format_list_header());
    for issue in &issues {
        println!("{}", format_issue_line(issue));
    }
    if issues.is_empty() {
        println!("No issues found.");
    }
    println!("{RULE}");
    Ok(())
}

fn build_filters(args: &ListArgs) -> ListFilters {
    let mut filters = ListFilters::default().include_closed(args.all);
    if let Some(label) = &args.label {
        filters = filters.with_label(label.clone());
    }
    filters
}
