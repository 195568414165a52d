//! Command-line interface for `issue_tracker`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing::debug;
use tracker_lib::find_repo_root;

use crate::config::{self, Config, EnvSnapshot};
use crate::logging;

/// `issue-tracker` - Local-first issue tracker.
#[derive(Parser, Debug)]
#[command(name = "issue-tracker", arg_required_else_help = true)]
#[command(
    author,
    version,
    about = "A simple CLI tool for managing development issues",
    long_about = None,
    after_help = "Issues live in .issue_tracker.json at the repository root. \
                  Prefix titles with 'BUG:', 'FEAT:', etc. for auto-labeling."
)]
pub struct Cli {
    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new issue; words are joined with a space
    Add(AddArgs),

    /// List open issues
    List(ListArgs),

    /// Close an issue by its ID
    Close(CloseArgs),

    /// Print all issues as markdown or json
    #[command(after_help = "Example: issue-tracker publish markdown > ISSUES.md")]
    Publish(PublishArgs),

    /// Create GitHub issues for every open issue, then clear the local store
    #[command(after_help = "Uses the 'gh' CLI for repository detection and authentication \
                            when available, otherwise GITHUB_TOKEN, GITHUB_OWNER and \
                            GITHUB_REPO.")]
    Push(PushArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Issue title
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub title: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only show issues carrying this label
    #[arg(long)]
    pub label: Option<String>,

    /// Show closed issues as well
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct CloseArgs {
    /// Issue ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Output format (markdown, json)
    pub format: String,
}

#[derive(Args, Debug, Default)]
pub struct PushArgs {
    /// Keep issues whose remote creation failed instead of clearing them
    #[arg(long)]
    pub keep_failed: bool,
}

/// Process-wide inputs captured once at startup.
#[derive(Debug)]
pub struct Workspace {
    /// Repository root containing the store.
    pub root: PathBuf,
    pub config: Config,
    pub env: EnvSnapshot,
}

impl Workspace {
    /// Locate the repository from the working directory and load config.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory is unavailable, no
    /// repository encloses it, or the config file is malformed.
    pub fn discover(env: EnvSnapshot) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let cwd = dunce::canonicalize(&cwd).unwrap_or(cwd);
        let root = find_repo_root(&cwd)?;
        let config = config::load(&root, &env)?;
        debug!(root = %root.display(), "Using repository root");
        Ok(Self { root, config, env })
    }
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = parse_args();
    logging::init_logging(cli.verbose, cli.quiet, None)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let ws = Workspace::discover(EnvSnapshot::capture())?;

    match cli.command {
        Commands::Add(args) => commands::add::execute(&args, &ws),
        Commands::List(args) => commands::list::execute(&args, &ws),
        Commands::Close(args) => commands::close::execute(&args, &ws),
        Commands::Publish(args) => commands::publish::execute(&args, &ws),
        Commands::Push(args) => commands::push::execute(&args, &ws),
    }
}

/// Parse the process arguments, exiting on usage errors.
///
/// An unknown command prints the error followed by the full help text.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            if shows_full_help(err.kind()) {
                let _ = Cli::command().write_help(&mut std::io::stderr());
            }
            std::process::exit(err.exit_code());
        }
    }
}

const fn shows_full_help(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::InvalidSubcommand)
}
