//! Facade crate for the lunchpick decision engine.
//!
//! This crate re-exports the core domain types together with the ranking,
//! swiping and consensus components. The JSON file store sits behind the
//! `store-json` feature.

#![forbid(unsafe_code)]

pub use lunchpick_core::{
    Catalog, Criterion, DailyPick, DailyTop, Direction, EngineStore, Importance, Preference,
    PreferenceVector, Role, StoreError, SwipeDecision, User, UserId, Venue,
};

#[cfg(feature = "store-json")]
pub use lunchpick_core::JsonFileStore;

pub use lunchpick_consensus::{
    AdminSession, ConsensusEntry, ConsensusError, DailyStats, SimilarityEntry, consensus,
    like_consensus, similarity, submit_daily_top,
};
pub use lunchpick_scorer::{
    Computation, DirectionalRanker, Ranker, Ranking, RankingError, RankingMode, ScoredVenue,
    WeightedRanker,
};
pub use lunchpick_swipe::{
    MatchEvent, MatchReport, SwipeError, SwipeOutcome, SwipeSession, SwipeState, matches_for,
};
