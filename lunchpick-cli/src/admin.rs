//! `admin` and `forget` command implementations.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use lunchpick_consensus::{AdminSession, DailyStats};
use lunchpick_core::{DeletionReport, delete_user, find_user};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::workspace::{WorkspaceConfig, user_id, write_json};
use crate::{
    ARG_ACTION, ARG_DATA_DIR, ARG_DATE, ARG_TARGET, ARG_USER, CliError, ENV_ADMIN_ACTION,
    ENV_ADMIN_TARGET, ENV_ADMIN_USER, ENV_FORGET_USER,
};

/// Administrative operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum AdminAction {
    /// Print activity figures for the day.
    Stats,
    /// Remove every swipe made on the day.
    ClearDay,
    /// Remove every stored swipe.
    ClearAll,
    /// Delete `--target` with all their swipes and tops.
    DeleteUser,
}

/// CLI arguments for the `admin` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "admin",
    long_about = "Run an administrative action. The acting user must be \
                 registered with the admin role in users.json.",
    about = "Administrative statistics and clean-up"
)]
#[ortho_config(prefix = "LUNCHPICK")]
pub(crate) struct AdminArgs {
    /// Acting admin, as "First Last".
    #[arg(long = ARG_USER, value_name = "name")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Action to run.
    #[arg(long = ARG_ACTION, value_enum)]
    #[serde(default)]
    pub(crate) action: Option<AdminAction>,
    /// User to delete, as "First Last".
    #[arg(long = ARG_TARGET, value_name = "name")]
    #[serde(default)]
    pub(crate) target: Option<String>,
    /// Directory holding the engine state.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Day to act on (defaults to today).
    #[arg(long = ARG_DATE, value_name = "yyyy-mm-dd")]
    #[serde(default)]
    pub(crate) date: Option<NaiveDate>,
}

impl AdminArgs {
    pub(crate) fn into_config(self) -> Result<AdminConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AdminConfig::try_from(merged)
    }
}

/// Resolved `admin` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AdminConfig {
    pub(crate) user: String,
    pub(crate) action: AdminAction,
    pub(crate) target: Option<String>,
    pub(crate) workspace: WorkspaceConfig,
}

impl TryFrom<AdminArgs> for AdminConfig {
    type Error = CliError;

    fn try_from(args: AdminArgs) -> Result<Self, Self::Error> {
        let user = args.user.ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_ADMIN_USER,
        })?;
        let action = args.action.ok_or(CliError::MissingArgument {
            field: ARG_ACTION,
            env: ENV_ADMIN_ACTION,
        })?;
        if action == AdminAction::DeleteUser && args.target.is_none() {
            return Err(CliError::MissingArgument {
                field: ARG_TARGET,
                env: ENV_ADMIN_TARGET,
            });
        }
        Ok(Self {
            user,
            action,
            target: args.target,
            workspace: WorkspaceConfig::resolve(args.data_dir, None, args.date),
        })
    }
}

/// What `admin` prints.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum AdminOutcome {
    Stats(DailyStats),
    Cleared { removed: usize },
    Deleted(DeletionReport),
}

pub(crate) fn run_admin(args: AdminArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_admin_with(args, &mut stdout)
}

pub(crate) fn run_admin_with(args: AdminArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let outcome = execute_admin(&config)?;
    write_json(writer, &outcome)
}

pub(crate) fn execute_admin(config: &AdminConfig) -> Result<AdminOutcome, CliError> {
    let store = config.workspace.store();
    let admin = find_user(&store, &user_id(&config.user)?)?;
    let session = AdminSession::new(&store, admin)?;
    let date = config.workspace.date;
    let outcome = match config.action {
        AdminAction::Stats => AdminOutcome::Stats(session.stats(date)?),
        AdminAction::ClearDay => AdminOutcome::Cleared {
            removed: session.clear_swipes_on(date)?,
        },
        AdminAction::ClearAll => AdminOutcome::Cleared {
            removed: session.clear_all_swipes()?,
        },
        AdminAction::DeleteUser => {
            let target = config.target.as_deref().ok_or(CliError::MissingArgument {
                field: ARG_TARGET,
                env: ENV_ADMIN_TARGET,
            })?;
            AdminOutcome::Deleted(session.delete_user(&user_id(target)?)?)
        }
    };
    Ok(outcome)
}

/// CLI arguments for the `forget` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "forget",
    about = "Delete a user and everything they recorded"
)]
#[ortho_config(prefix = "LUNCHPICK")]
pub(crate) struct ForgetArgs {
    /// User to delete, as "First Last".
    #[arg(long = ARG_USER, value_name = "name")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Directory holding the engine state.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
}

impl ForgetArgs {
    pub(crate) fn into_config(self) -> Result<ForgetConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ForgetConfig::try_from(merged)
    }
}

/// Resolved `forget` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ForgetConfig {
    pub(crate) user: String,
    pub(crate) workspace: WorkspaceConfig,
}

impl TryFrom<ForgetArgs> for ForgetConfig {
    type Error = CliError;

    fn try_from(args: ForgetArgs) -> Result<Self, Self::Error> {
        let user = args.user.ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_FORGET_USER,
        })?;
        Ok(Self {
            user,
            workspace: WorkspaceConfig::resolve(args.data_dir, None, None),
        })
    }
}

pub(crate) fn run_forget(args: ForgetArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_forget_with(args, &mut stdout)
}

pub(crate) fn run_forget_with(args: ForgetArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = config.workspace.store();
    let report = delete_user(&store, &user_id(&config.user)?)?;
    write_json(writer, &report)
}
