//! Command-line interface for the lunch decision engine.
//!
//! Every subcommand reads its options from CLI flags, `LUNCHPICK_*`
//! environment variables and configuration files through `ortho_config`, acts
//! on the JSON state kept in the data directory and prints its result as
//! pretty JSON on stdout.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod admin;
mod error;
mod rank;
mod report;
mod swipe;
mod workspace;

pub use error::CliError;

use admin::{AdminArgs, ForgetArgs, run_admin, run_forget};
use rank::{RankArgs, TopArgs, run_rank, run_top};
use report::{ReportArgs, run_report};
use swipe::{SwipeArgs, run_swipe};

pub(crate) const ARG_DATA_DIR: &str = "data-dir";
pub(crate) const ARG_CATALOG: &str = "catalog";
pub(crate) const ARG_DATE: &str = "date";
pub(crate) const ARG_PREFERENCES: &str = "preferences";
pub(crate) const ARG_MODE: &str = "mode";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_USER: &str = "user";
pub(crate) const ARG_ACTION: &str = "action";
pub(crate) const ARG_KIND: &str = "kind";
pub(crate) const ARG_TARGET: &str = "target";
pub(crate) const ENV_RANK_PREFERENCES: &str = "LUNCHPICK_CMDS_RANK_PREFERENCES";
pub(crate) const ENV_TOP_PREFERENCES: &str = "LUNCHPICK_CMDS_TOP_PREFERENCES";
pub(crate) const ENV_TOP_USER: &str = "LUNCHPICK_CMDS_TOP_USER";
pub(crate) const ENV_SWIPE_USER: &str = "LUNCHPICK_CMDS_SWIPE_USER";
pub(crate) const ENV_REPORT_KIND: &str = "LUNCHPICK_CMDS_REPORT_KIND";
pub(crate) const ENV_REPORT_USER: &str = "LUNCHPICK_CMDS_REPORT_USER";
pub(crate) const ENV_FORGET_USER: &str = "LUNCHPICK_CMDS_FORGET_USER";
pub(crate) const ENV_ADMIN_USER: &str = "LUNCHPICK_CMDS_ADMIN_USER";
pub(crate) const ENV_ADMIN_ACTION: &str = "LUNCHPICK_CMDS_ADMIN_ACTION";
pub(crate) const ENV_ADMIN_TARGET: &str = "LUNCHPICK_CMDS_ADMIN_TARGET";

/// Install the log formatter on stderr.
///
/// `RUST_LOG` selects what is shown and defaults to `warn`. Records emitted
/// through the `log` facade by the engine crates are captured as well.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        log::debug!("a global logger was already installed");
    }
}

/// Run the lunchpick CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, inputs or the engine
/// reject the request.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => run_rank(args),
        Command::Top(args) => run_top(args),
        Command::Swipe(args) => run_swipe(args),
        Command::Report(args) => run_report(args),
        Command::Forget(args) => run_forget(args),
        Command::Admin(args) => run_admin(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "lunchpick",
    about = "Decide together where to have lunch",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank the catalog against a preference file.
    Rank(RankArgs),
    /// Rank the catalog and submit the best three as today's top.
    Top(TopArgs),
    /// Like, dislike, undo or reset on today's swipe session.
    Swipe(SwipeArgs),
    /// Print matches, consensus tables or similar users.
    Report(ReportArgs),
    /// Delete a user and everything they recorded.
    Forget(ForgetArgs),
    /// Administrative statistics and clean-up.
    Admin(AdminArgs),
}

#[cfg(test)]
mod tests;
