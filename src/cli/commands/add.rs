//! Add command implementation.

use anyhow::{Context, Result};
use tracker_lib::{IssueStore, model, store_path};

use crate::cli::{AddArgs, Workspace};
use crate::format::format_labels;

/// Execute the add command.
///
/// # Errors
///
/// Returns an error if the title is blank or the store cannot be read or written.
pub fn execute(args: &AddArgs, ws: &Workspace) -> Result<()> {
    let title = args.title.join(" ");

    let mut store = IssueStore::open(store_path(&ws.root))?;
    let issue = store.create_issue(&title, model::now())?;
    store.save().context("Error saving issues")?;

    println!("Successfully added issue #{}: {}", issue.id, issue.title);
    println!("Labels: {}", format_labels(&issue.labels));
    Ok(())
}
