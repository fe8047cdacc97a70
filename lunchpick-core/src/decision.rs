//! Per-day records written by users: swipe decisions and top-3 submissions.
//!
//! Both logs are keyed. [`SwipeLog::record`] replaces any earlier decision for
//! the same `(user, venue, date)` and [`TopLog::upsert`] replaces any earlier
//! submission for the same `(user, date)`.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::UserId;

/// Maximum number of venues in a daily top submission.
pub const DAILY_TOP_SIZE: usize = 3;

/// One like or dislike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeDecision {
    /// Deciding user.
    pub user: UserId,
    /// Venue name.
    pub venue: String,
    /// Day the decision applies to.
    pub date: NaiveDate,
    /// `true` for a like.
    pub liked: bool,
}

impl SwipeDecision {
    /// Construct a decision.
    pub fn new(user: UserId, venue: impl Into<String>, date: NaiveDate, liked: bool) -> Self {
        Self {
            user,
            venue: venue.into(),
            date,
            liked,
        }
    }

    fn same_key(&self, other: &Self) -> bool {
        self.user == other.user && self.venue == other.venue && self.date == other.date
    }
}

/// Ordered log of swipe decisions, oldest first.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use lunchpick_core::{SwipeDecision, SwipeLog, UserId};
///
/// let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap_or_default();
/// let ada = UserId::new("Ada Lovelace");
/// let mut log = SwipeLog::default();
/// log.record(SwipeDecision::new(ada.clone(), "Pho 11", day, true));
/// log.record(SwipeDecision::new(ada.clone(), "Pho 11", day, false));
///
/// assert_eq!(log.len(), 1);
/// assert_eq!(log.latest(&ada, "Pho 11", day).map(|d| d.liked), Some(false));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwipeLog {
    decisions: Vec<SwipeDecision>,
}

impl SwipeLog {
    /// Wrap an existing ordered list of decisions.
    #[must_use]
    pub const fn from_decisions(decisions: Vec<SwipeDecision>) -> Self {
        Self { decisions }
    }

    /// Append a decision, dropping any earlier one with the same key.
    ///
    /// Returns the replaced decision, if there was one.
    pub fn record(&mut self, decision: SwipeDecision) -> Option<SwipeDecision> {
        let replaced = self
            .decisions
            .iter()
            .position(|existing| existing.same_key(&decision))
            .map(|index| self.decisions.remove(index));
        self.decisions.push(decision);
        replaced
    }

    /// Return the most recent decision for a key.
    #[must_use]
    pub fn latest(&self, user: &UserId, venue: &str, date: NaiveDate) -> Option<&SwipeDecision> {
        self.decisions
            .iter()
            .rev()
            .find(|d| &d.user == user && d.venue == venue && d.date == date)
    }

    /// Decisions for one user on one day, oldest first, latest per venue.
    #[must_use]
    pub fn decisions_for(&self, user: &UserId, date: NaiveDate) -> Vec<&SwipeDecision> {
        let mut latest: Vec<&SwipeDecision> = Vec::new();
        for decision in self
            .decisions
            .iter()
            .filter(|d| &d.user == user && d.date == date)
        {
            latest.retain(|existing| existing.venue != decision.venue);
            latest.push(decision);
        }
        latest
    }

    /// Remove and return the most recent decision a user made on a day.
    pub fn pop_latest_for(&mut self, user: &UserId, date: NaiveDate) -> Option<SwipeDecision> {
        let index = self
            .decisions
            .iter()
            .rposition(|d| &d.user == user && d.date == date)?;
        Some(self.decisions.remove(index))
    }

    /// Remove every decision a user made on a day, returning how many went.
    pub fn remove_for(&mut self, user: &UserId, date: NaiveDate) -> usize {
        self.remove_where(|d| &d.user == user && d.date == date)
    }

    /// Remove every decision by a user, on any day.
    pub fn remove_user(&mut self, user: &UserId) -> usize {
        self.remove_where(|d| &d.user == user)
    }

    /// Remove every decision made on a day, by anyone.
    pub fn remove_date(&mut self, date: NaiveDate) -> usize {
        self.remove_where(|d| d.date == date)
    }

    /// Remove everything.
    pub fn clear(&mut self) -> usize {
        let removed = self.decisions.len();
        self.decisions.clear();
        removed
    }

    fn remove_where(&mut self, predicate: impl Fn(&SwipeDecision) -> bool) -> usize {
        let before = self.decisions.len();
        self.decisions.retain(|d| !predicate(d));
        before - self.decisions.len()
    }

    /// Users whose latest decision for `(venue, date)` is a like, sorted.
    #[must_use]
    pub fn likers(&self, venue: &str, date: NaiveDate) -> Vec<UserId> {
        let mut latest: BTreeMap<&UserId, bool> = BTreeMap::new();
        for decision in self
            .decisions
            .iter()
            .filter(|d| d.venue == venue && d.date == date)
        {
            latest.insert(&decision.user, decision.liked);
        }
        latest
            .into_iter()
            .filter_map(|(user, liked)| liked.then(|| user.clone()))
            .collect()
    }

    /// Latest decisions made on `date`, one per `(user, venue)`, oldest first.
    #[must_use]
    pub fn on(&self, date: NaiveDate) -> Vec<&SwipeDecision> {
        let mut latest: Vec<&SwipeDecision> = Vec::new();
        for decision in self.decisions.iter().filter(|d| d.date == date) {
            latest.retain(|existing| !existing.same_key(decision));
            latest.push(decision);
        }
        latest
    }

    /// Iterate over every stored decision, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &SwipeDecision> {
        self.decisions.iter()
    }

    /// Number of stored decisions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Report whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

/// Errors returned by [`DailyTop::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DailyTopError {
    /// No venues were supplied.
    #[error("a daily top needs at least one venue")]
    Empty,
    /// More than three venues were supplied.
    #[error("a daily top holds at most {max} venues, got {count}")]
    TooManyPicks {
        /// Supplied count.
        count: usize,
        /// Allowed maximum.
        max: usize,
    },
    /// The same venue appeared twice.
    #[error("venue '{venue}' appears more than once in the daily top")]
    DuplicatePick {
        /// Repeated venue.
        venue: String,
    },
}

/// One ranked entry of a daily top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPick {
    /// Venue name.
    pub venue: String,
    /// Final score the venue had when the top was submitted.
    pub score: f64,
}

/// A user's top-3 venues for one day, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDailyTop")]
pub struct DailyTop {
    /// Submitting user.
    pub user: UserId,
    /// Day the submission applies to.
    pub date: NaiveDate,
    picks: Vec<DailyPick>,
}

#[derive(Deserialize)]
struct RawDailyTop {
    user: UserId,
    date: NaiveDate,
    picks: Vec<DailyPick>,
}

impl TryFrom<RawDailyTop> for DailyTop {
    type Error = DailyTopError;

    fn try_from(raw: RawDailyTop) -> Result<Self, Self::Error> {
        Self::new(raw.user, raw.date, raw.picks)
    }
}

impl DailyTop {
    /// Validate and construct a daily top.
    pub fn new(user: UserId, date: NaiveDate, picks: Vec<DailyPick>) -> Result<Self, DailyTopError> {
        if picks.is_empty() {
            return Err(DailyTopError::Empty);
        }
        if picks.len() > DAILY_TOP_SIZE {
            return Err(DailyTopError::TooManyPicks {
                count: picks.len(),
                max: DAILY_TOP_SIZE,
            });
        }
        let mut seen = HashSet::new();
        for pick in &picks {
            if !seen.insert(pick.venue.as_str()) {
                return Err(DailyTopError::DuplicatePick {
                    venue: pick.venue.clone(),
                });
            }
        }
        Ok(Self { user, date, picks })
    }

    /// Picks, best first.
    #[must_use]
    pub fn picks(&self) -> &[DailyPick] {
        &self.picks
    }

    /// Return the 1-based rank of `venue`, if it was picked.
    #[must_use]
    pub fn rank_of(&self, venue: &str) -> Option<u32> {
        self.picks
            .iter()
            .position(|pick| pick.venue == venue)
            .and_then(|index| u32::try_from(index + 1).ok())
    }

    /// Iterate over `(rank, venue)` pairs, rank starting at 1.
    pub fn ranked(&self) -> impl Iterator<Item = (u32, &str)> {
        (1_u32..).zip(self.picks.iter().map(|pick| pick.venue.as_str()))
    }
}

/// Stored daily tops, at most one per `(user, date)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopLog {
    tops: Vec<DailyTop>,
}

impl TopLog {
    /// Insert a submission, replacing any earlier one for the same key.
    ///
    /// Returns the replaced submission, if there was one.
    pub fn upsert(&mut self, top: DailyTop) -> Option<DailyTop> {
        match self
            .tops
            .iter_mut()
            .find(|existing| existing.user == top.user && existing.date == top.date)
        {
            Some(slot) => Some(std::mem::replace(slot, top)),
            None => {
                self.tops.push(top);
                None
            }
        }
    }

    /// Return a user's submission for a day.
    #[must_use]
    pub fn get(&self, user: &UserId, date: NaiveDate) -> Option<&DailyTop> {
        self.tops
            .iter()
            .find(|top| &top.user == user && top.date == date)
    }

    /// Submissions for a day in submission order.
    pub fn on(&self, date: NaiveDate) -> impl Iterator<Item = &DailyTop> {
        self.tops.iter().filter(move |top| top.date == date)
    }

    /// Remove every submission by a user.
    pub fn remove_user(&mut self, user: &UserId) -> usize {
        let before = self.tops.len();
        self.tops.retain(|top| &top.user != user);
        before - self.tops.len()
    }

    /// Number of stored submissions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tops.len()
    }

    /// Report whether nothing has been submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap_or_default()
    }

    fn pick(venue: &str) -> DailyPick {
        DailyPick {
            venue: venue.into(),
            score: 50.0,
        }
    }

    #[rstest]
    fn pop_latest_ignores_other_users_and_days(day: NaiveDate) {
        let ada = UserId::new("Ada Lovelace");
        let bob = UserId::new("Bob Smith");
        let mut log = SwipeLog::default();
        log.record(SwipeDecision::new(ada.clone(), "A", day, true));
        log.record(SwipeDecision::new(ada.clone(), "B", day, false));
        log.record(SwipeDecision::new(bob.clone(), "A", day, true));
        log.record(SwipeDecision::new(
            ada.clone(),
            "C",
            day.succ_opt().unwrap_or(day),
            true,
        ));

        let popped = log.pop_latest_for(&ada, day);
        assert_eq!(popped.map(|d| d.venue), Some("B".to_owned()));
        assert_eq!(log.decisions_for(&ada, day).len(), 1);
        assert_eq!(log.len(), 3);
    }

    #[rstest]
    fn likers_follow_latest_decision(day: NaiveDate) {
        let ada = UserId::new("Ada Lovelace");
        let bob = UserId::new("Bob Smith");
        let mut log = SwipeLog::default();
        log.record(SwipeDecision::new(ada.clone(), "A", day, true));
        log.record(SwipeDecision::new(bob.clone(), "A", day, true));
        log.record(SwipeDecision::new(bob, "A", day, false));

        assert_eq!(log.likers("A", day), vec![ada]);
    }

    #[rstest]
    fn likers_resolve_appended_duplicates(day: NaiveDate) {
        let ada = UserId::new("Ada Lovelace");
        let log = SwipeLog::from_decisions(vec![
            SwipeDecision::new(ada.clone(), "A", day, false),
            SwipeDecision::new(ada.clone(), "A", day, true),
        ]);
        assert_eq!(log.likers("A", day), vec![ada.clone()]);
        assert_eq!(log.decisions_for(&ada, day).len(), 1);
        assert_eq!(log.on(day).len(), 1);
    }

    #[rstest]
    fn remove_for_only_touches_one_user_day(day: NaiveDate) {
        let ada = UserId::new("Ada Lovelace");
        let bob = UserId::new("Bob Smith");
        let mut log = SwipeLog::default();
        log.record(SwipeDecision::new(ada.clone(), "A", day, true));
        log.record(SwipeDecision::new(ada.clone(), "B", day, true));
        log.record(SwipeDecision::new(bob, "A", day, true));

        assert_eq!(log.remove_for(&ada, day), 2);
        assert_eq!(log.len(), 1);
    }

    #[rstest]
    #[case(Vec::new(), DailyTopError::Empty)]
    #[case(
        vec![pick("A"), pick("B"), pick("C"), pick("D")],
        DailyTopError::TooManyPicks { count: 4, max: 3 }
    )]
    #[case(
        vec![pick("A"), pick("A")],
        DailyTopError::DuplicatePick { venue: "A".into() }
    )]
    fn daily_top_validation(
        day: NaiveDate,
        #[case] picks: Vec<DailyPick>,
        #[case] expected: DailyTopError,
    ) {
        let result = DailyTop::new(UserId::new("Ada Lovelace"), day, picks);
        assert_eq!(result, Err(expected));
    }

    #[rstest]
    #[case("[]")]
    #[case(r#"[{"venue": "A", "score": 9}, {"venue": "B", "score": 8},
               {"venue": "C", "score": 7}, {"venue": "D", "score": 6}]"#)]
    #[case(r#"[{"venue": "A", "score": 9}, {"venue": "A", "score": 8}]"#)]
    fn stored_tops_are_validated_on_load(#[case] picks: &str) {
        let json = format!(r#"{{"user": "Ada Lovelace", "date": "2024-05-06", "picks": {picks}}}"#);
        assert!(serde_json::from_str::<DailyTop>(&json).is_err());
        let log = format!("[{json}]");
        assert!(serde_json::from_str::<TopLog>(&log).is_err());
    }

    #[rstest]
    fn stored_top_reloads(day: NaiveDate) {
        let top = DailyTop::new(UserId::new("Ada Lovelace"), day, vec![pick("A"), pick("B")])
            .unwrap_or_else(|err| panic!("valid top: {err}"));
        let json = serde_json::to_string(&top).unwrap_or_else(|err| panic!("encode: {err}"));
        let decoded: DailyTop =
            serde_json::from_str(&json).unwrap_or_else(|err| panic!("decode: {err}"));
        assert_eq!(decoded, top);
    }

    #[rstest]
    fn upsert_replaces_same_user_day(day: NaiveDate) {
        let ada = UserId::new("Ada Lovelace");
        let mut log = TopLog::default();
        let first = DailyTop::new(ada.clone(), day, vec![pick("A")])
            .unwrap_or_else(|err| panic!("valid top: {err}"));
        let second = DailyTop::new(ada.clone(), day, vec![pick("B"), pick("C")])
            .unwrap_or_else(|err| panic!("valid top: {err}"));

        assert!(log.upsert(first).is_none());
        let replaced = log.upsert(second);
        assert_eq!(replaced.map(|top| top.picks().len()), Some(1));
        assert_eq!(log.len(), 1);
        assert_eq!(log.get(&ada, day).and_then(|top| top.rank_of("C")), Some(2));
    }
}
