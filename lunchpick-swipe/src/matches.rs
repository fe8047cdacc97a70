//! Match events and the per-user "my matches" view.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use lunchpick_core::{EngineStore, SwipeLog, UserDirectory, UserId};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::error::SwipeError;

/// Largest number of matched people named in a match notification.
pub const MATCH_SAMPLE_SIZE: usize = 3;

/// A same-day mutual like, as shown to the user who triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchEvent {
    /// Venue both sides liked.
    pub venue: String,
    /// Day of the match.
    pub date: NaiveDate,
    /// Display names of up to [`MATCH_SAMPLE_SIZE`] other likers, sorted.
    pub matched_users: Vec<String>,
    /// Number of other users who liked the venue that day.
    pub total: usize,
}

impl MatchEvent {
    /// Build an event from every other liker, sampling names when too many.
    pub(crate) fn sample<R: Rng + ?Sized>(
        venue: String,
        date: NaiveDate,
        others: &[UserId],
        users: &UserDirectory,
        rng: &mut R,
    ) -> Self {
        let names: Vec<String> = others
            .iter()
            .map(|id| users.display_name(id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut matched_users: Vec<String> = if names.len() > MATCH_SAMPLE_SIZE {
            names
                .choose_multiple(rng, MATCH_SAMPLE_SIZE)
                .cloned()
                .collect()
        } else {
            names
        };
        matched_users.sort();
        Self {
            venue,
            date,
            matched_users,
            total: others.len(),
        }
    }
}

/// Other users who liked `venue` on `date`, excluding `user`.
pub(crate) fn other_likers(
    swipes: &SwipeLog,
    user: &UserId,
    venue: &str,
    date: NaiveDate,
) -> Vec<UserId> {
    swipes
        .likers(venue, date)
        .into_iter()
        .filter(|liker| liker != user)
        .collect()
}

/// One liked venue and who else liked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueMatch {
    /// Venue the user liked.
    pub venue: String,
    /// Display names of the other likers, sorted.
    pub with: Vec<String>,
}

/// Everything a user matched on during one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    /// User the report is for.
    pub user: UserId,
    /// Day covered.
    pub date: NaiveDate,
    /// Matched venues in the order the user liked them.
    pub venues: Vec<VenueMatch>,
    /// Every person matched on at least one venue, sorted.
    pub people: BTreeSet<String>,
}

impl MatchReport {
    /// Report whether the user matched with anyone.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

/// List the matches `user` has on `date`.
///
/// Unlike the swipe notification, this view is exhaustive and symmetric: the
/// first liker of a venue sees everyone who liked it after them.
///
/// # Errors
/// Returns [`SwipeError::Store`] when users or swipes cannot be loaded.
pub fn matches_for<S>(store: &S, user: &UserId, date: NaiveDate) -> Result<MatchReport, SwipeError>
where
    S: EngineStore + ?Sized,
{
    let swipes = store.load_swipes()?;
    let users = store.load_users()?;
    let venues: Vec<VenueMatch> = swipes
        .decisions_for(user, date)
        .into_iter()
        .filter(|decision| decision.liked)
        .filter_map(|decision| {
            let others = other_likers(&swipes, user, &decision.venue, date);
            if others.is_empty() {
                return None;
            }
            let mut with: Vec<String> = others.iter().map(|id| users.display_name(id)).collect();
            with.sort();
            with.dedup();
            Some(VenueMatch {
                venue: decision.venue.clone(),
                with,
            })
        })
        .collect();
    let people = venues
        .iter()
        .flat_map(|entry| entry.with.iter().cloned())
        .collect();
    Ok(MatchReport {
        user: user.clone(),
        date,
        venues,
        people,
    })
}
