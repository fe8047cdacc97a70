//! Errors raised by group-level operations.

use lunchpick_core::{DailyTopError, DirectoryError, StoreError, UserError};
use thiserror::Error;

/// Errors raised while submitting tops or running admin actions.
#[derive(Debug, Error)]
pub enum ConsensusError {
    /// The backing store failed.
    #[error("consensus store unavailable")]
    Store(#[from] StoreError),
    /// The ranking could not be turned into a daily top.
    #[error("invalid daily top")]
    DailyTop(#[from] DailyTopError),
    /// The acting user may not perform the request.
    #[error(transparent)]
    User(#[from] UserError),
    /// A user directory operation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
