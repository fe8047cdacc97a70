//! Rank a catalog against one user's preferences.
//!
//! Two rankers share the same preparation: hard filters run first, then every
//! venue missing a value the ranker needs is set aside. The directional ranker
//! also sets aside venues whose base values are off the 1-10 scale. What
//! remains is scored column by column so each criterion is normalised over the
//! candidate set.

use std::collections::BTreeMap;
use std::str::FromStr;

use lunchpick_core::{Catalog, Criterion, Direction, Importance, PreferenceVector, Venue};
use serde::{Deserialize, Serialize};

use crate::error::RankingError;
use crate::filters::apply_hard_filters;
use crate::normalise::{DIRECTIONAL_MAX, DIRECTIONAL_MIN, directional, mirrored, normalize};
use crate::types::{Computation, Ranking, ScoredVenue};

/// Ranks the venues of a catalog for one preference vector.
pub trait Ranker: Send + Sync {
    /// Produce a total order of the catalog's venues, best first.
    ///
    /// # Errors
    /// Returns [`RankingError::NoCandidates`] when filters and missing values
    /// leave nothing to rank, and [`RankingError::NoCriteria`] when the
    /// catalog offers nothing to score on.
    fn rank(
        &self,
        catalog: &Catalog,
        preferences: &PreferenceVector,
    ) -> Result<Ranking, RankingError>;
}

/// Percentage ranker over min–max normalised base criteria.
///
/// Final scores lie in `0.0..=100.0`. Directional criteria are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightedRanker;

/// Ranker on the 1–10 scale that honours directional preferences.
///
/// Base criteria are taken as already scaled 1–10. Each directional criterion
/// the user leans on counts with the largest base importance, so a strong
/// preference weighs as much as the user's most important base criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionalRanker;

/// Which ranker a caller wants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// [`DirectionalRanker`].
    #[default]
    Directional,
    /// [`WeightedRanker`].
    Weighted,
}

impl RankingMode {
    /// Rank with the ranker this mode names.
    ///
    /// # Errors
    /// Propagates the chosen ranker's [`RankingError`].
    pub fn rank(
        self,
        catalog: &Catalog,
        preferences: &PreferenceVector,
    ) -> Result<Ranking, RankingError> {
        match self {
            Self::Directional => DirectionalRanker.rank(catalog, preferences),
            Self::Weighted => WeightedRanker.rank(catalog, preferences),
        }
    }
}

impl FromStr for RankingMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "directional" => Ok(Self::Directional),
            "weighted" => Ok(Self::Weighted),
            other => Err(format!("unknown ranking mode '{other}'")),
        }
    }
}

/// Venues eligible for scoring, in catalog order.
struct Candidates<'a> {
    venues: Vec<&'a Venue>,
    incomplete: Vec<String>,
}

impl<'a> Candidates<'a> {
    /// Apply hard filters, then set aside venues lacking a `required` value
    /// or holding an `on_scale` value outside the 1-10 scale.
    fn gather(
        catalog: &'a Catalog,
        preferences: &PreferenceVector,
        required: &[&Criterion],
        on_scale: &[&Criterion],
    ) -> Result<Self, RankingError> {
        let passing = apply_hard_filters(catalog.venues(), preferences);
        let filtered = catalog.len() - passing.len();
        let mut venues = Vec::with_capacity(passing.len());
        let mut incomplete = Vec::new();
        for venue in passing {
            if required
                .iter()
                .any(|criterion| venue.value(&criterion.name).is_none())
            {
                log::debug!("skipping '{}': missing a criterion value", venue.name);
                incomplete.push(venue.name.clone());
            } else if let Some((criterion, value)) = off_scale(venue, on_scale) {
                log::warn!(
                    "skipping '{}': {criterion} value {value} is off the 1-10 scale",
                    venue.name
                );
                incomplete.push(venue.name.clone());
            } else {
                venues.push(venue);
            }
        }
        if venues.is_empty() {
            return Err(RankingError::NoCandidates {
                filtered,
                incomplete: incomplete.len(),
            });
        }
        Ok(Self { venues, incomplete })
    }

    fn column(&self, criterion: &str) -> Vec<f64> {
        self.venues
            .iter()
            .map(|venue| venue.value(criterion).unwrap_or(f64::NAN))
            .collect()
    }
}

/// First criterion whose value lies outside `DIRECTIONAL_MIN..=DIRECTIONAL_MAX`.
fn off_scale<'c>(venue: &Venue, criteria: &[&'c Criterion]) -> Option<(&'c str, f64)> {
    criteria.iter().find_map(|criterion| {
        venue
            .value(&criterion.name)
            .filter(|value| !(DIRECTIONAL_MIN..=DIRECTIONAL_MAX).contains(value))
            .map(|value| (criterion.name.as_str(), value))
    })
}

/// Per-venue accumulator while columns are scored.
struct Row<'a> {
    venue: &'a Venue,
    scores: BTreeMap<String, f64>,
    weighted: f64,
}

impl<'a> Row<'a> {
    fn for_each(candidates: &Candidates<'a>) -> Vec<Self> {
        candidates
            .venues
            .iter()
            .map(|venue| Self {
                venue,
                scores: BTreeMap::new(),
                weighted: 0.0,
            })
            .collect()
    }

    #[expect(clippy::float_arithmetic, reason = "accumulates a weighted sum")]
    fn add(rows: &mut [Self], criterion: &str, column: Vec<f64>, weight: f64) {
        for (row, score) in rows.iter_mut().zip(column) {
            row.scores.insert(criterion.to_owned(), score);
            row.weighted += weight * score;
        }
    }
}

fn into_ranking(
    scored: impl Iterator<Item = ScoredVenue>,
    computation: Computation,
    incomplete: Vec<String>,
) -> Ranking {
    let mut entries: Vec<ScoredVenue> = scored.collect();
    // `sort_by` is stable, so ties keep catalog order.
    entries.sort_by(|left, right| right.score.total_cmp(&left.score));
    if computation.is_fallback() {
        log::warn!("ranking fell back to {computation:?}: no weighted criterion applied");
    }
    Ranking::new(entries, computation, incomplete)
}

fn importance_weight(preferences: &PreferenceVector, criterion: &Criterion) -> f64 {
    weight_of(preferences.importance(&criterion.name))
}

fn weight_of(importance: Importance) -> f64 {
    f64::from(importance.get())
}

impl Ranker for WeightedRanker {
    #[expect(
        clippy::float_arithmetic,
        reason = "final scores are a weighted mean scaled to 100"
    )]
    fn rank(
        &self,
        catalog: &Catalog,
        preferences: &PreferenceVector,
    ) -> Result<Ranking, RankingError> {
        let base: Vec<&Criterion> = catalog.base_criteria().collect();
        if base.is_empty() {
            return Err(RankingError::NoCriteria);
        }
        let candidates = Candidates::gather(catalog, preferences, &base, &[])?;

        let all_ignored = base
            .iter()
            .all(|criterion| preferences.importance(&criterion.name).is_ignored());
        let computation = if all_ignored {
            Computation::EqualWeights
        } else {
            Computation::Weighted
        };

        let mut rows = Row::for_each(&candidates);
        let mut total_weight = 0.0;
        for criterion in &base {
            let weight = if all_ignored {
                weight_of(Importance::UNIT)
            } else {
                importance_weight(preferences, criterion)
            };
            let invert = criterion.direction == Direction::LowerIsBetter;
            let column = normalize(&candidates.column(&criterion.name), invert);
            Row::add(&mut rows, &criterion.name, column, weight);
            total_weight += weight;
        }

        let scored = rows.into_iter().map(|row| ScoredVenue {
            venue: row.venue.clone(),
            criterion_scores: row.scores,
            score: row.weighted / total_weight * 100.0,
        });
        Ok(into_ranking(scored, computation, candidates.incomplete))
    }
}

impl DirectionalRanker {
    /// Largest base importance, or [`Importance::UNIT`] when every base
    /// importance is zero.
    fn directional_weight(preferences: &PreferenceVector, base: &[&Criterion]) -> f64 {
        let largest = base
            .iter()
            .map(|criterion| preferences.importance(&criterion.name))
            .max()
            .filter(|max| !max.is_ignored())
            .unwrap_or(Importance::UNIT);
        weight_of(largest)
    }

    /// Base values are already on the 1-10 scale; lower-is-better ones are
    /// mirrored so that 10 is always best.
    fn base_column(candidates: &Candidates<'_>, criterion: &Criterion) -> Vec<f64> {
        let column = candidates.column(&criterion.name);
        if criterion.direction == Direction::LowerIsBetter {
            column.into_iter().map(mirrored).collect()
        } else {
            column
        }
    }
}

impl Ranker for DirectionalRanker {
    #[expect(
        clippy::float_arithmetic,
        reason = "final scores are a weighted mean on the 1-10 scale"
    )]
    #[expect(
        clippy::cast_precision_loss,
        reason = "criterion counts are tiny compared to f64 precision"
    )]
    fn rank(
        &self,
        catalog: &Catalog,
        preferences: &PreferenceVector,
    ) -> Result<Ranking, RankingError> {
        let base: Vec<&Criterion> = catalog.base_criteria().collect();
        let leaning: Vec<&Criterion> = catalog
            .directional_criteria()
            .filter(|criterion| preferences.preference(&criterion.name).leaning().is_some())
            .collect();
        if base.is_empty() && leaning.is_empty() {
            return Err(RankingError::NoCriteria);
        }
        let required: Vec<&Criterion> = base.iter().chain(&leaning).copied().collect();
        let candidates = Candidates::gather(catalog, preferences, &required, &base)?;

        let mut rows = Row::for_each(&candidates);
        let mut total_weight = 0.0;
        let mut base_sums = vec![0.0; rows.len()];
        for criterion in &base {
            let column = Self::base_column(&candidates, criterion);
            for (sum, score) in base_sums.iter_mut().zip(&column) {
                *sum += score;
            }
            let weight = importance_weight(preferences, criterion);
            Row::add(&mut rows, &criterion.name, column, weight);
            total_weight += weight;
        }

        let directional_weight = Self::directional_weight(preferences, &base);
        for criterion in &leaning {
            let preference = preferences.preference(&criterion.name);
            let series = candidates.column(&criterion.name);
            if let Some(column) = directional(&series, preference, criterion.low_is_best) {
                Row::add(&mut rows, &criterion.name, column, directional_weight);
                total_weight += directional_weight;
            }
        }

        let computation = if total_weight > 0.0 {
            Computation::Weighted
        } else {
            Computation::BaseMean
        };
        let base_count = base.len() as f64;
        let scored = rows
            .into_iter()
            .zip(base_sums)
            .map(|(row, base_sum)| {
                let score = match computation {
                    Computation::BaseMean => base_sum / base_count,
                    _ => row.weighted / total_weight,
                };
                ScoredVenue {
                    venue: row.venue.clone(),
                    criterion_scores: row.scores,
                    score: round_hundredths(score),
                }
            });
        Ok(into_ranking(scored, computation, candidates.incomplete))
    }
}

#[expect(clippy::float_arithmetic, reason = "rounds to two decimals")]
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
