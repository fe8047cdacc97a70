//! Output types shared by both rankers.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use lunchpick_core::{DAILY_TOP_SIZE, DailyPick, Venue};
use serde::Serialize;

/// How the final scores of a [`Ranking`] were computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Computation {
    /// Every contribution used the user's importance weights.
    Weighted,
    /// All importance weights were zero; every criterion counted once.
    EqualWeights,
    /// No criterion contributed; scores are the plain mean of base scores.
    BaseMean,
}

impl Computation {
    /// Report whether the ranking fell back from the user's weights.
    #[must_use]
    pub const fn is_fallback(self) -> bool {
        !matches!(self, Self::Weighted)
    }
}

/// A venue together with its per-criterion and aggregate scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredVenue {
    /// The ranked venue.
    pub venue: Venue,
    /// Score of each criterion that took part in the computation.
    pub criterion_scores: BTreeMap<String, f64>,
    /// Aggregate score used for ordering.
    pub score: f64,
}

impl ScoredVenue {
    /// Name of the underlying venue.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.venue.name
    }
}

/// Venues ordered by descending score.
///
/// Ties keep catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    entries: Vec<ScoredVenue>,
    computation: Computation,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    incomplete: Vec<String>,
}

impl Ranking {
    pub(crate) const fn new(
        entries: Vec<ScoredVenue>,
        computation: Computation,
        incomplete: Vec<String>,
    ) -> Self {
        Self {
            entries,
            computation,
            incomplete,
        }
    }

    /// Every ranked venue, best first.
    #[must_use]
    pub fn entries(&self) -> &[ScoredVenue] {
        &self.entries
    }

    /// The best `n` venues, or all of them when fewer exist.
    ///
    /// # Examples
    /// ```
    /// use lunchpick_core::test_support::fixtures::lunch_catalog;
    /// use lunchpick_core::PreferenceVector;
    /// use lunchpick_scorer::{Ranker, WeightedRanker};
    ///
    /// # fn main() -> Result<(), lunchpick_scorer::RankingError> {
    /// let ranking = WeightedRanker.rank(&lunch_catalog(), &PreferenceVector::new())?;
    /// assert_eq!(ranking.top(3).len(), 3);
    /// assert_eq!(ranking.top(10).len(), 4);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn top(&self, n: usize) -> &[ScoredVenue] {
        self.entries.get(..n).unwrap_or(&self.entries)
    }

    /// How the scores were computed.
    #[must_use]
    pub const fn computation(&self) -> Computation {
        self.computation
    }

    /// Names of venues skipped because a needed value was missing.
    #[must_use]
    pub fn incomplete(&self) -> &[String] {
        &self.incomplete
    }

    /// The top entries shaped as picks for a daily top.
    #[must_use]
    pub fn daily_picks(&self) -> Vec<DailyPick> {
        self.top(DAILY_TOP_SIZE)
            .iter()
            .map(|entry| DailyPick {
                venue: entry.venue.name.clone(),
                score: entry.score,
            })
            .collect()
    }

    /// Number of ranked venues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether nothing was ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
