//! Turn a personal ranking into the day's daily top.

use chrono::NaiveDate;
use lunchpick_core::store::modify_tops;
use lunchpick_core::{DailyTop, EngineStore, UserId};
use lunchpick_scorer::Ranking;

use crate::error::ConsensusError;

/// Store the first three entries of `ranking` as `user`'s top for `date`.
///
/// A later submission for the same day replaces the earlier one.
///
/// # Errors
/// Returns [`ConsensusError::DailyTop`] when the ranking is empty and
/// [`ConsensusError::Store`] when the submission cannot be persisted.
pub fn submit_daily_top<S>(
    store: &S,
    user: &UserId,
    date: NaiveDate,
    ranking: &Ranking,
) -> Result<DailyTop, ConsensusError>
where
    S: EngineStore + ?Sized,
{
    let top = DailyTop::new(user.clone(), date, ranking.daily_picks())?;
    let replaced = modify_tops(store, |tops| tops.upsert(top.clone()))?;
    if replaced.is_some() {
        log::info!("{user} replaced their daily top for {date}");
    } else {
        log::info!("{user} submitted a daily top for {date}");
    }
    Ok(top)
}
