//! `rank` and `top` command implementations.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::Parser;
use lunchpick_consensus::submit_daily_top;
use lunchpick_core::{DailyTop, PreferenceVector};
use lunchpick_scorer::{Computation, Ranking, RankingMode, ScoredVenue};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::workspace::{WorkspaceConfig, acting_user, load_json, require_existing, write_json};
use crate::{
    ARG_CATALOG, ARG_DATA_DIR, ARG_DATE, ARG_LIMIT, ARG_MODE, ARG_PREFERENCES, ARG_USER,
    CliError, ENV_RANK_PREFERENCES, ENV_TOP_PREFERENCES, ENV_TOP_USER,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "rank",
    long_about = "Rank every venue of the catalog against a JSON preference \
                 file holding importance weights (0-10) for base criteria \
                 and slider positions (0-10, 5 meaning no preference) for \
                 directional criteria.",
    about = "Rank the catalog against a preference file"
)]
#[ortho_config(prefix = "LUNCHPICK")]
pub(crate) struct RankArgs {
    /// Path to a JSON preference file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) preferences: Option<Utf8PathBuf>,
    /// Ranking method: `directional` (1-10) or `weighted` (0-100).
    #[arg(long = ARG_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) mode: Option<RankingMode>,
    /// Print only the best N venues.
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
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

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) preferences: Utf8PathBuf,
    pub(crate) mode: RankingMode,
    pub(crate) limit: Option<usize>,
    pub(crate) workspace: WorkspaceConfig,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let preferences = args.preferences.ok_or(CliError::MissingArgument {
            field: ARG_PREFERENCES,
            env: ENV_RANK_PREFERENCES,
        })?;
        Ok(Self {
            preferences,
            mode: args.mode.unwrap_or_default(),
            limit: args.limit,
            workspace: WorkspaceConfig::resolve(args.data_dir, args.catalog, args.date),
        })
    }
}

impl RankConfig {
    fn rank(&self) -> Result<Ranking, CliError> {
        require_existing(&self.preferences, ARG_PREFERENCES)?;
        let preferences: PreferenceVector = load_json(&self.preferences, ARG_PREFERENCES)?;
        let catalog = self.workspace.load_catalog()?;
        Ok(self.mode.rank(&catalog, &preferences)?)
    }
}

/// What `rank` prints.
#[derive(Debug, Serialize)]
pub(crate) struct RankOutput<'a> {
    pub(crate) mode: RankingMode,
    pub(crate) computation: Computation,
    pub(crate) venues: &'a [ScoredVenue],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub(crate) incomplete: &'a [String],
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &mut stdout)
}

pub(crate) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_rank(&config, writer)
}

pub(crate) fn execute_rank(config: &RankConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let ranking = config.rank()?;
    let venues = config
        .limit
        .map_or_else(|| ranking.entries(), |limit| ranking.top(limit));
    write_json(
        writer,
        &RankOutput {
            mode: config.mode,
            computation: ranking.computation(),
            venues,
            incomplete: ranking.incomplete(),
        },
    )
}

/// CLI arguments for the `top` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "top",
    long_about = "Rank the catalog like `rank` does, then store the best \
                 three venues as the user's daily top. A second submission \
                 on the same day replaces the first.",
    about = "Submit today's top three"
)]
#[ortho_config(prefix = "LUNCHPICK")]
pub(crate) struct TopArgs {
    /// Path to a JSON preference file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) preferences: Option<Utf8PathBuf>,
    /// Submitting user, as "First Last".
    #[arg(long = ARG_USER, value_name = "name")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Ranking method: `directional` (1-10) or `weighted` (0-100).
    #[arg(long = ARG_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) mode: Option<RankingMode>,
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

impl TopArgs {
    pub(crate) fn into_config(self) -> Result<TopConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        TopConfig::try_from(merged)
    }
}

/// Resolved `top` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TopConfig {
    pub(crate) rank: RankConfig,
    pub(crate) user: String,
}

impl TryFrom<TopArgs> for TopConfig {
    type Error = CliError;

    fn try_from(args: TopArgs) -> Result<Self, Self::Error> {
        let preferences = args.preferences.ok_or(CliError::MissingArgument {
            field: ARG_PREFERENCES,
            env: ENV_TOP_PREFERENCES,
        })?;
        let user = args.user.ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_TOP_USER,
        })?;
        Ok(Self {
            rank: RankConfig {
                preferences,
                mode: args.mode.unwrap_or_default(),
                limit: None,
                workspace: WorkspaceConfig::resolve(args.data_dir, args.catalog, args.date),
            },
            user,
        })
    }
}

pub(crate) fn run_top(args: TopArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_top_with(args, &mut stdout)
}

pub(crate) fn run_top_with(args: TopArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let top = execute_top(&config)?;
    write_json(writer, &top)
}

pub(crate) fn execute_top(config: &TopConfig) -> Result<DailyTop, CliError> {
    let ranking = config.rank.rank()?;
    let store = config.rank.workspace.store();
    let user = acting_user(&store, &config.user)?;
    Ok(submit_daily_top(
        &store,
        &user,
        config.rank.workspace.date,
        &ranking,
    )?)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
