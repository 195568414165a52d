//! Close command implementation.

use anyhow::{Context, Result};
use tracker_lib::{CloseOutcome, IssueStore, parse_issue_id, store_path};

use crate::cli::{CloseArgs, Workspace};

/// Execute the close command.
///
/// Closing an already-closed issue is reported and leaves the store file alone.
///
/// # Errors
///
/// Returns an error if the ID is not a number, no issue has that ID, or the
/// store cannot be read or written.
pub fn execute(args: &CloseArgs, ws: &Workspace) -> Result<()> {
    let id = parse_issue_id(&args.id)?;

    let mut store = IssueStore::open(store_path(&ws.root))?;
    match store.close_issue(id)? {
        CloseOutcome::AlreadyClosed => {
            println!("Issue #{id} is already closed.");
        }
        CloseOutcome::Closed => {
            store.save().context("Error saving updated issues")?;
            println!("Successfully closed issue #{id}.");
        }
    }
    Ok(())
}
