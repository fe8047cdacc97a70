//! Error types emitted by the lunchpick CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use lunchpick_consensus::ConsensusError;
use lunchpick_core::{DirectoryError, StoreError, UserError};
use lunchpick_scorer::RankingError;
use lunchpick_swipe::SwipeError;
use thiserror::Error;

/// Errors emitted by the lunchpick CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the input.
        field: &'static str,
        /// Resolved path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the input.
        field: &'static str,
        /// Resolved path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the input.
        field: &'static str,
        /// Resolved path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening a JSON input failed.
    #[error("failed to open {field} at {path:?}")]
    OpenInput {
        /// Flag naming the input.
        field: &'static str,
        /// Resolved path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A JSON input could not be decoded.
    #[error("failed to parse {field} JSON at {path:?}")]
    ParseInput {
        /// Flag naming the input.
        field: &'static str,
        /// Resolved path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The `--user` value is not a usable name.
    #[error("invalid --user value")]
    InvalidUser(#[from] UserError),
    /// A user directory operation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// Reading or writing engine state failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Ranking the catalog failed.
    #[error("ranking failed")]
    Ranking(#[from] RankingError),
    /// A swipe action failed.
    #[error("swipe failed")]
    Swipe(#[from] SwipeError),
    /// A consensus or admin action failed.
    #[error("group action failed")]
    Consensus(#[from] ConsensusError),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
