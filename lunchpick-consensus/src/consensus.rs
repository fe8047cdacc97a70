//! Group-level venue tables.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use lunchpick_core::{SwipeLog, TopLog, UserId};
use serde::Serialize;

/// Points a daily-top pick earns for its rank.
///
/// Ranks 1, 2 and 3 earn 3, 2 and 1; anything else earns nothing.
#[must_use]
pub const fn rank_points(rank: u32) -> u32 {
    4_u32.saturating_sub(rank)
}

/// One row of a consensus table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusEntry {
    /// Venue the row describes.
    pub venue: String,
    /// Accumulated points.
    pub weight: u32,
    /// Distinct users who contributed.
    pub voters: usize,
}

#[derive(Default)]
struct Tally {
    weight: u32,
    voters: BTreeSet<UserId>,
}

fn into_table(tallies: BTreeMap<String, Tally>) -> Vec<ConsensusEntry> {
    let mut entries: Vec<ConsensusEntry> = tallies
        .into_iter()
        .map(|(venue, tally)| ConsensusEntry {
            venue,
            weight: tally.weight,
            voters: tally.voters.len(),
        })
        .collect();
    // Tallies come out of the map in name order, so the stable sort breaks
    // remaining ties alphabetically.
    entries.sort_by_key(|entry| (Reverse(entry.weight), Reverse(entry.voters)));
    entries
}

/// Rank-weighted popularity of every venue picked in a daily top on `date`.
///
/// Ordered by weight, then voter count, both descending, then venue name.
///
/// # Examples
/// ```
/// use lunchpick_consensus::consensus;
/// use lunchpick_core::test_support::fixtures::lunch_day;
/// use lunchpick_core::{DailyPick, DailyTop, TopLog, UserId};
///
/// # fn main() -> Result<(), lunchpick_core::DailyTopError> {
/// let pick = |venue: &str| DailyPick { venue: venue.to_owned(), score: 0.0 };
/// let mut tops = TopLog::default();
/// tops.upsert(DailyTop::new(UserId::new("Ann"), lunch_day(), vec![pick("X"), pick("Y")])?);
/// tops.upsert(DailyTop::new(UserId::new("Bob"), lunch_day(), vec![pick("Y")])?);
///
/// let table = consensus(&tops, lunch_day());
/// assert_eq!(table[0].venue, "Y");
/// assert_eq!((table[0].weight, table[0].voters), (5, 2));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn consensus(tops: &TopLog, date: NaiveDate) -> Vec<ConsensusEntry> {
    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
    for top in tops.on(date) {
        for (rank, venue) in top.ranked() {
            let tally = tallies.entry(venue.to_owned()).or_default();
            tally.weight = tally.weight.saturating_add(rank_points(rank));
            tally.voters.insert(top.user.clone());
        }
    }
    into_table(tallies)
}

/// The same table built from the day's likes: one point per liker.
#[must_use]
pub fn like_consensus(swipes: &SwipeLog, date: NaiveDate) -> Vec<ConsensusEntry> {
    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
    for decision in swipes.on(date).into_iter().filter(|decision| decision.liked) {
        let tally = tallies.entry(decision.venue.clone()).or_default();
        if tally.voters.insert(decision.user.clone()) {
            tally.weight = tally.weight.saturating_add(1);
        }
    }
    into_table(tallies)
}
