//! `tracker-lib` - Local-first issue store and publish pipeline.
//!
//! Issues live in one JSON array at `<repo-root>/.issue_tracker.json`.
//! Nothing in this crate reads the process environment or the working
//! directory on its own; callers pass paths, environment snapshots and
//! endpoints in explicitly.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use tracker_lib::{IssueStore, ListFilters};
//!
//! let mut store = IssueStore::locate(Path::new(".")).unwrap();
//! let issue = store.create_issue("BUG: crash on save", tracker_lib::model::now()).unwrap();
//! assert_eq!(issue.labels, vec!["bug"]);
//! store.save().unwrap();
//!
//! for issue in store.list_issues(&ListFilters::default().with_label("bug")) {
//!     println!("#{} {}", issue.id, issue.title);
//! }
//! ```

pub mod error;
pub mod export;
pub mod jsonfile;
pub mod labels;
pub mod locate;
pub mod model;
pub mod publish;
pub mod query;
pub mod store;

pub use error::{Result, TrackerError};
pub use export::{ExportFormat, export};
pub use labels::{LabelRule, Labeler, auto_label};
pub use locate::{STORE_FILE_NAME, find_repo_root, store_path};
pub use model::{Issue, Status};
pub use query::{ListFilters, filter_issues};
pub use store::{CloseOutcome, IssueStore, parse_issue_id};
