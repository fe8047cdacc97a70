//! Swipe sessions and same-day matches.
//!
//! A [`SwipeSession`] walks one user through the catalog for one day, storing
//! a like or dislike per venue. A like on a venue other users already liked
//! that day is a match and is reported to the liker straight away;
//! [`matches_for`] lists every match a user has, including those completed by
//! people who swiped later.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod matches;
mod session;

pub use error::SwipeError;
pub use matches::{MATCH_SAMPLE_SIZE, MatchEvent, MatchReport, VenueMatch, matches_for};
pub use session::{NoOpReason, SwipeOutcome, SwipeSession, SwipeState};
