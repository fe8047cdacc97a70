//! Errors raised by swipe sessions.

use lunchpick_core::StoreError;
use thiserror::Error;

/// Errors raised while recording or reading swipes.
///
/// Invalid actions, such as undoing with nothing to undo, are not errors; they
/// surface as [`SwipeOutcome::NoOp`](crate::SwipeOutcome::NoOp).
#[derive(Debug, Error)]
pub enum SwipeError {
    /// The backing store failed.
    #[error("swipe store unavailable")]
    Store(#[from] StoreError),
}
