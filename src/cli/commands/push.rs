//! Push command implementation.
//!
//! Resolves credentials (helper CLI first, then `GITHUB_*` variables),
//! creates one GitHub issue per open local issue and then rewrites the
//! local store. By default the store is emptied even when some creations
//! failed; `--keep-failed` retains those issues instead.

use anyhow::{Context, Result};
use tracing::warn;
use tracker_lib::publish::{
    ClearPolicy, CredentialProvider, Credentials, EnvProvider, GitHubClient, HelperCliProvider,
    PublishReport, publish_open_issues, resolve_credentials,
};
use tracker_lib::{IssueStore, TrackerError, store_path};

use crate::cli::{PushArgs, Workspace};

/// Execute the push command.
///
/// # Errors
///
/// Returns an error if no credentials can be resolved, the HTTP client
/// cannot be built, or the store cannot be read or rewritten. Individual
/// remote failures are reported but do not fail the command.
pub fn execute(args: &PushArgs, ws: &Workspace) -> Result<()> {
    let credentials = resolve(ws)?;
    announce_source(&credentials, ws);

    let mut store = IssueStore::open(store_path(&ws.root))?;
    let client = GitHubClient::new(&ws.config.api_url, &credentials.token)?;
    let policy = if args.keep_failed {
        ClearPolicy::KeepFailed
    } else {
        ClearPolicy::All
    };

    println!("Publishing open issues to {}...", credentials.target);
    let report = publish_open_issues(
        &mut store,
        &client,
        &credentials.target,
        policy,
        |issue, outcome| match outcome {
            Ok(_) => println!("Successfully created GitHub issue for: \"{}\"", issue.title),
            Err(error) => eprintln!(
                "Error creating GitHub issue for local ID #{}: {}",
                issue.id,
                failure_reason(error)
            ),
        },
    )
    .context("Error clearing local issues")?;

    print_summary(&report, policy);
    Ok(())
}

fn resolve(ws: &Workspace) -> Result<Credentials> {
    let helper = HelperCliProvider::new(&ws.config.helper, &ws.root);
    let env = EnvProvider::new(ws.env.vars().clone());

    let mut providers: Vec<&dyn CredentialProvider> = Vec::with_capacity(2);
    if ws.config.use_helper {
        providers.push(&helper);
    }
    providers.push(&env);

    Ok(resolve_credentials(&providers, helper.program())?)
}

fn announce_source(credentials: &Credentials, ws: &Workspace) {
    if credentials.source == "helper" {
        println!(
            "Detected repository '{}' and using auth token from '{}' CLI.",
            credentials.target, ws.config.helper
        );
    } else if ws.config.use_helper {
        println!(
            "Could not get repository info or token from '{}' CLI. Falling back to environment variables.",
            ws.config.helper
        );
    }
}

fn failure_reason(error: &TrackerError) -> String {
    match error {
        TrackerError::RemoteCreateFailed { reason, .. } => reason.clone(),
        other => other.to_string(),
    }
}

fn print_summary(report: &PublishReport, policy: ClearPolicy) {
    println!(
        "Finished. Published {} issues to GitHub.",
        report.published.len()
    );

    if !report.is_complete() {
        warn!(
            failed = report.failed.len(),
            "Some issues could not be published"
        );
    }

    match policy {
        ClearPolicy::All => println!("Successfully cleared all local issues."),
        ClearPolicy::KeepFailed if report.retained == 0 => {
            println!("Successfully cleared all local issues.");
        }
        ClearPolicy::KeepFailed => println!(
            "Kept {} unpublished issue(s) in the local store.",
            report.retained
        ),
    }
}
