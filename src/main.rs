//! `issue-tracker` - Local-first issue tracker
//!
//! Keeps development tasks in `.issue_tracker.json` at the repository root,
//! labels them from their title prefix, and publishes them as Markdown/JSON
//! or as GitHub issues.

use issue_tracker::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
