//! Publish command implementation.

use anyhow::Result;
use tracker_lib::{ExportFormat, IssueStore, export, store_path};

use crate::cli::{PublishArgs, Workspace};

/// Execute the publish command.
///
/// The format is checked before the store is read, so an unknown format
/// fails without touching anything.
///
/// # Errors
///
/// Returns an error if the format is unsupported or the store cannot be read.
pub fn execute(args: &PublishArgs, ws: &Workspace) -> Result<()> {
    let format: ExportFormat = args.format.parse()?;
    let store = IssueStore::open(store_path(&ws.root))?;
    let rendered = export(store.issues(), format)?;

    if rendered.ends_with('\n') {
        print!("{rendered}");
    } else {
        println!("{rendered}");
    }
    Ok(())
}
