//! Taste similarity between users' daily tops.

use std::cmp::Reverse;

use chrono::NaiveDate;
use lunchpick_core::{DailyTop, TopLog, UserId};
use serde::Serialize;

use crate::consensus::rank_points;

/// How close another user's daily top is to the requester's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimilarityEntry {
    /// The other user.
    pub user: UserId,
    /// Sum of both sides' rank points over shared venues.
    pub similarity: u32,
    /// Shared venues in the requester's order.
    pub shared: Vec<String>,
}

/// Compare `user`'s daily top on `date` with everyone else's.
///
/// Each venue both picked scores `(4 - rank_a) + (4 - rank_b)`. Users with no
/// shared venue are left out. Ordered by similarity descending, then user id.
/// A requester with no daily top that day gets an empty list.
///
/// # Examples
/// ```
/// use lunchpick_consensus::similarity;
/// use lunchpick_core::test_support::fixtures::lunch_day;
/// use lunchpick_core::{DailyPick, DailyTop, TopLog, UserId};
///
/// # fn main() -> Result<(), lunchpick_core::DailyTopError> {
/// let picks = |venues: &[&str]| -> Vec<DailyPick> {
///     venues.iter().map(|v| DailyPick { venue: (*v).to_owned(), score: 0.0 }).collect()
/// };
/// let mut tops = TopLog::default();
/// tops.upsert(DailyTop::new(UserId::new("A"), lunch_day(), picks(&["X", "Y", "Z"]))?);
/// tops.upsert(DailyTop::new(UserId::new("B"), lunch_day(), picks(&["Y", "X", "W"]))?);
///
/// let close = similarity(&tops, lunch_day(), &UserId::new("A"));
/// assert_eq!(close[0].similarity, 10);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn similarity(tops: &TopLog, date: NaiveDate, user: &UserId) -> Vec<SimilarityEntry> {
    let Some(mine) = tops.get(user, date) else {
        return Vec::new();
    };
    let mut entries: Vec<SimilarityEntry> = tops
        .on(date)
        .filter(|other| &other.user != user)
        .filter_map(|other| compare(mine, other))
        .collect();
    entries.sort_by(|left, right| {
        (Reverse(left.similarity), &left.user).cmp(&(Reverse(right.similarity), &right.user))
    });
    entries
}

fn compare(mine: &DailyTop, other: &DailyTop) -> Option<SimilarityEntry> {
    let mut similarity = 0_u32;
    let mut shared = Vec::new();
    for (rank, venue) in mine.ranked() {
        if let Some(their_rank) = other.rank_of(venue) {
            similarity = similarity
                .saturating_add(rank_points(rank))
                .saturating_add(rank_points(their_rank));
            shared.push(venue.to_owned());
        }
    }
    (!shared.is_empty()).then(|| SimilarityEntry {
        user: other.user.clone(),
        similarity,
        shared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lunchpick_core::DailyPick;
    use lunchpick_core::test_support::fixtures::lunch_day;
    use rstest::rstest;

    fn top(user: &str, venues: &[&str]) -> DailyTop {
        let picks = venues
            .iter()
            .map(|venue| DailyPick {
                venue: (*venue).to_owned(),
                score: 0.0,
            })
            .collect();
        DailyTop::new(UserId::new(user), lunch_day(), picks)
            .unwrap_or_else(|err| panic!("top: {err}"))
    }

    fn tops(entries: &[(&str, &[&str])]) -> TopLog {
        let mut log = TopLog::default();
        for (user, venues) in entries {
            log.upsert(top(user, venues));
        }
        log
    }

    #[rstest]
    fn shared_x_and_y_score_ten() {
        let log = tops(&[("A", &["X", "Y", "Z"]), ("B", &["Y", "X", "W"])]);
        let result = similarity(&log, lunch_day(), &UserId::new("A"));
        assert_eq!(
            result,
            [SimilarityEntry {
                user: UserId::new("B"),
                similarity: 10,
                shared: vec!["X".to_owned(), "Y".to_owned()],
            }]
        );
    }

    #[rstest]
    fn disjoint_tops_are_left_out() {
        let log = tops(&[("A", &["X"]), ("B", &["W"])]);
        assert!(similarity(&log, lunch_day(), &UserId::new("A")).is_empty());
    }

    #[rstest]
    fn missing_requester_top_yields_nothing() {
        let log = tops(&[("B", &["X"])]);
        assert!(similarity(&log, lunch_day(), &UserId::new("A")).is_empty());
    }

    #[rstest]
    fn ordered_by_similarity_then_user() {
        let log = tops(&[
            ("A", &["X", "Y", "Z"]),
            ("D", &["Z"]),
            ("C", &["X"]),
            ("B", &["Z"]),
        ]);
        let order: Vec<(String, u32)> = similarity(&log, lunch_day(), &UserId::new("A"))
            .into_iter()
            .map(|entry| (entry.user.to_string(), entry.similarity))
            .collect();
        assert_eq!(
            order,
            [
                ("C".to_owned(), 6),
                ("B".to_owned(), 4),
                ("D".to_owned(), 4)
            ]
        );
    }
}
