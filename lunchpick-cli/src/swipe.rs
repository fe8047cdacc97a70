//! `swipe` command implementation.
//!
//! Each invocation resumes the user's session for the day from the stored
//! decisions, applies one action and exits. A match is printed once and then
//! acknowledged, so the next invocation continues with the following venue.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use lunchpick_core::UserId;
use lunchpick_swipe::{SwipeOutcome, SwipeSession, SwipeState};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::workspace::{WorkspaceConfig, acting_user, write_json};
use crate::{
    ARG_ACTION, ARG_CATALOG, ARG_DATA_DIR, ARG_DATE, ARG_USER, CliError, ENV_SWIPE_USER,
};

/// One step of a swipe session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SwipeAction {
    /// Show the venue on display without deciding.
    #[default]
    Show,
    /// Like the venue on display.
    Like,
    /// Dislike the venue on display.
    Dislike,
    /// Withdraw the most recent decision.
    Undo,
    /// Withdraw every decision of the day.
    Reset,
}

/// CLI arguments for the `swipe` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "swipe",
    long_about = "Walk through the catalog one venue at a time. Liking a \
                 venue someone else liked today reports a match.",
    about = "Like, dislike, undo or reset today's swipes"
)]
#[ortho_config(prefix = "LUNCHPICK")]
pub(crate) struct SwipeArgs {
    /// Swiping user, as "First Last".
    #[arg(long = ARG_USER, value_name = "name")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Action to apply (defaults to `show`).
    #[arg(long = ARG_ACTION, value_enum)]
    #[serde(default)]
    pub(crate) action: Option<SwipeAction>,
    /// Directory holding the engine state.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Override the catalog path (`<data-dir>/catalog.json`).
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Day to act on (defaults to today).
    #[arg(long = ARG_DATE, value_name = "yyyy-mm-dd")]
    #[serde(default)]
    pub(crate) date: Option<NaiveDate>,
}

impl SwipeArgs {
    pub(crate) fn into_config(self) -> Result<SwipeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SwipeConfig::try_from(merged)
    }
}

/// Resolved `swipe` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SwipeConfig {
    pub(crate) user: String,
    pub(crate) action: SwipeAction,
    pub(crate) workspace: WorkspaceConfig,
}

impl TryFrom<SwipeArgs> for SwipeConfig {
    type Error = CliError;

    fn try_from(args: SwipeArgs) -> Result<Self, Self::Error> {
        let user = args.user.ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_SWIPE_USER,
        })?;
        Ok(Self {
            user,
            action: args.action.unwrap_or_default(),
            workspace: WorkspaceConfig::resolve(args.data_dir, args.catalog, args.date),
        })
    }
}

/// What `swipe` prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SwipeReport {
    pub(crate) user: UserId,
    pub(crate) date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) outcome: Option<SwipeOutcome>,
    /// Venue shown next, absent once the catalog is exhausted.
    pub(crate) next: Option<String>,
}

pub(crate) fn run_swipe(args: SwipeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_swipe_with(args, &mut stdout)
}

pub(crate) fn run_swipe_with(args: SwipeArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_swipe(&config)?;
    write_json(writer, &report)
}

pub(crate) fn execute_swipe(config: &SwipeConfig) -> Result<SwipeReport, CliError> {
    let catalog = config.workspace.load_catalog()?;
    let store = config.workspace.store();
    let user = acting_user(&store, &config.user)?;
    let mut session = SwipeSession::resume(&store, &catalog, user, config.workspace.date)?;
    let outcome = match config.action {
        SwipeAction::Show => None,
        SwipeAction::Like => Some(session.like()?),
        SwipeAction::Dislike => Some(session.dislike()?),
        SwipeAction::Undo => Some(session.undo()?),
        SwipeAction::Reset => Some(session.reset()?),
    };
    if matches!(session.state(), SwipeState::MatchPending { .. }) {
        session.acknowledge();
    }
    Ok(SwipeReport {
        user: session.user().clone(),
        date: session.date(),
        outcome,
        next: session.current().map(str::to_owned),
    })
}
