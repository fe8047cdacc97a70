//! `report` command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use lunchpick_consensus::{
    ConsensusEntry, SimilarityEntry, consensus, like_consensus, similarity,
};
use lunchpick_core::EngineStore;
use lunchpick_swipe::{MatchReport, matches_for};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::workspace::{WorkspaceConfig, user_id, write_json};
use crate::{
    ARG_DATA_DIR, ARG_DATE, ARG_KIND, ARG_USER, CliError, ENV_REPORT_KIND, ENV_REPORT_USER,
};

/// Views over the day's shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ReportKind {
    /// Venues `--user` matched on, with whom.
    Matches,
    /// Venues ranked by daily top points.
    Consensus,
    /// Venues ranked by distinct likers.
    Likes,
    /// Users ranked by how closely their daily top agrees with `--user`.
    Similarity,
}

impl ReportKind {
    const fn needs_user(self) -> bool {
        matches!(self, Self::Matches | Self::Similarity)
    }
}

/// CLI arguments for the `report` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "report",
    about = "Print matches, consensus tables or similar users"
)]
#[ortho_config(prefix = "LUNCHPICK")]
pub(crate) struct ReportArgs {
    /// Report to print.
    #[arg(long = ARG_KIND, value_enum)]
    #[serde(default)]
    pub(crate) kind: Option<ReportKind>,
    /// User the report is about, as "First Last".
    #[arg(long = ARG_USER, value_name = "name")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Directory holding the engine state.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Day to report on (defaults to today).
    #[arg(long = ARG_DATE, value_name = "yyyy-mm-dd")]
    #[serde(default)]
    pub(crate) date: Option<NaiveDate>,
}

impl ReportArgs {
    pub(crate) fn into_config(self) -> Result<ReportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReportConfig::try_from(merged)
    }
}

/// Resolved `report` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportConfig {
    pub(crate) kind: ReportKind,
    pub(crate) user: Option<String>,
    pub(crate) workspace: WorkspaceConfig,
}

impl TryFrom<ReportArgs> for ReportConfig {
    type Error = CliError;

    fn try_from(args: ReportArgs) -> Result<Self, Self::Error> {
        let kind = args.kind.ok_or(CliError::MissingArgument {
            field: ARG_KIND,
            env: ENV_REPORT_KIND,
        })?;
        if kind.needs_user() && args.user.is_none() {
            return Err(CliError::MissingArgument {
                field: ARG_USER,
                env: ENV_REPORT_USER,
            });
        }
        Ok(Self {
            kind,
            user: args.user,
            workspace: WorkspaceConfig::resolve(args.data_dir, None, args.date),
        })
    }
}

impl ReportConfig {
    fn user(&self) -> Result<lunchpick_core::UserId, CliError> {
        let raw = self.user.as_deref().ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_REPORT_USER,
        })?;
        user_id(raw)
    }
}

/// What `report` prints.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum Report {
    Matches(MatchReport),
    Venues(Vec<ConsensusEntry>),
    Users(Vec<SimilarityEntry>),
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_report_with(args, &mut stdout)
}

pub(crate) fn run_report_with(args: ReportArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_report(&config)?;
    write_json(writer, &report)
}

pub(crate) fn execute_report(config: &ReportConfig) -> Result<Report, CliError> {
    let store = config.workspace.store();
    let date = config.workspace.date;
    let report = match config.kind {
        ReportKind::Matches => Report::Matches(matches_for(&store, &config.user()?, date)?),
        ReportKind::Consensus => Report::Venues(consensus(&store.load_tops()?, date)),
        ReportKind::Likes => Report::Venues(like_consensus(&store.load_swipes()?, date)),
        ReportKind::Similarity => {
            Report::Users(similarity(&store.load_tops()?, date, &config.user()?))
        }
    };
    Ok(report)
}
