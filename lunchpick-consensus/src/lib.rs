//! Group decisions built from everyone's daily tops and swipes.
//!
//! - [`submit_daily_top`] stores the head of a personal ranking as a user's
//!   top three for the day.
//! - [`consensus`] folds every daily top into one rank-weighted table;
//!   [`like_consensus`] does the same from the day's likes.
//! - [`similarity`] tells a user whose tops look most like theirs.
//! - [`AdminSession`] gates the maintenance actions and daily statistics.
//!
//! Users who submitted nothing on a day are absent from every aggregate.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod admin;
mod consensus;
mod error;
mod similarity;
mod submit;

pub use admin::{AdminSession, DailyStats, TOP_LIKED_LIMIT};
pub use consensus::{ConsensusEntry, consensus, like_consensus, rank_points};
pub use error::ConsensusError;
pub use similarity::{SimilarityEntry, similarity};
pub use submit::submit_daily_top;
