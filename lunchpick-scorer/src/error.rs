//! Errors raised while ranking venues.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised by the rankers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    /// Hard filters or missing values left nothing to rank.
    #[error("no venue left to rank: {filtered} filtered out, {incomplete} missing values")]
    NoCandidates {
        /// Venues removed by the user's hard filters.
        filtered: usize,
        /// Venues skipped because a criterion value was missing.
        incomplete: usize,
    },
    /// The catalog declares no criterion the ranker can score.
    #[error("catalog declares no base criterion to rank on")]
    NoCriteria,
}
