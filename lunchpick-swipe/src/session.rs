//! The per-user, per-day swipe state machine.

use chrono::NaiveDate;
use lunchpick_core::store::modify_swipes;
use lunchpick_core::{Catalog, EngineStore, SwipeDecision, UserId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::error::SwipeError;
use crate::matches::{MatchEvent, other_likers};

/// Where a session stands in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SwipeState {
    /// Showing the venue at `index`.
    Browsing {
        /// Position in catalog order.
        index: usize,
    },
    /// A like just produced a match the user has not acknowledged yet.
    MatchPending {
        /// The match being shown.
        event: MatchEvent,
        /// Where browsing continues after acknowledgement.
        resume_index: usize,
    },
    /// Every venue has been swiped.
    Exhausted,
}

/// Why an action changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoOpReason {
    /// Undo before the first swipe.
    AtStart,
    /// Like or dislike after the last venue.
    Exhausted,
    /// A match must be acknowledged first.
    MatchPending,
    /// Acknowledge without a pending match.
    NothingPending,
}

/// Result of one session action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum SwipeOutcome {
    /// A decision was stored without producing a match.
    Recorded {
        /// Venue swiped.
        venue: String,
        /// Whether it was a like.
        liked: bool,
        /// A dislike on a venue other users liked today.
        missed_match: bool,
    },
    /// A like matched other users' likes.
    Matched(MatchEvent),
    /// The most recent decision was withdrawn.
    Undone {
        /// Venue whose decision was removed, if one was stored.
        venue: Option<String>,
    },
    /// Every decision of the day was withdrawn.
    Reset {
        /// Number of decisions removed.
        removed: usize,
    },
    /// A pending match was dismissed.
    Acknowledged,
    /// The action was not applicable in the current state.
    NoOp(NoOpReason),
}

/// One user's swipes through a catalog on one day.
///
/// Every action reads the swipe log, applies a keyed change and writes it
/// back through the [`EngineStore`]; the session itself only holds the
/// browsing position. Matches are announced only to the user whose like
/// completes them.
///
/// # Examples
/// ```
/// use lunchpick_core::test_support::MemoryStore;
/// use lunchpick_core::test_support::fixtures::{lunch_day, named_catalog};
/// use lunchpick_core::UserId;
/// use lunchpick_swipe::{SwipeOutcome, SwipeSession, SwipeState};
///
/// # fn main() -> Result<(), lunchpick_swipe::SwipeError> {
/// let store = MemoryStore::default();
/// let catalog = named_catalog(&["A", "B"]);
/// let mut session = SwipeSession::start(&store, &catalog, UserId::new("Ann Lee"), lunch_day());
///
/// assert!(matches!(session.like()?, SwipeOutcome::Recorded { .. }));
/// assert_eq!(session.state(), &SwipeState::Browsing { index: 1 });
/// # Ok(())
/// # }
/// ```
pub struct SwipeSession<'a, S: EngineStore + ?Sized, R: Rng = ChaCha8Rng> {
    store: &'a S,
    catalog: &'a Catalog,
    user: UserId,
    date: NaiveDate,
    state: SwipeState,
    rng: R,
}

impl<'a, S: EngineStore + ?Sized> SwipeSession<'a, S> {
    /// Start browsing from the first venue.
    #[must_use]
    pub fn start(store: &'a S, catalog: &'a Catalog, user: UserId, date: NaiveDate) -> Self {
        let state = browsing_at(0, catalog);
        Self {
            store,
            catalog,
            user,
            date,
            state,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Continue after the decisions the user already stored for `date`.
    ///
    /// Venues are shown in catalog order, so the number of stored decisions on
    /// catalog venues is the position to continue from.
    ///
    /// # Errors
    /// Returns [`SwipeError::Store`] when the swipe log cannot be loaded.
    pub fn resume(
        store: &'a S,
        catalog: &'a Catalog,
        user: UserId,
        date: NaiveDate,
    ) -> Result<Self, SwipeError> {
        let swipes = store.load_swipes()?;
        let done = swipes
            .decisions_for(&user, date)
            .into_iter()
            .filter(|decision| catalog.venue(&decision.venue).is_some())
            .count();
        log::debug!("resuming swipes for {user} on {date} at {done}");
        let mut session = Self::start(store, catalog, user, date);
        session.state = browsing_at(done, catalog);
        Ok(session)
    }
}

impl<'a, S: EngineStore + ?Sized, R: Rng> SwipeSession<'a, S, R> {
    /// Replace the random source used to sample matched names.
    #[must_use]
    pub fn with_rng<R2: Rng>(self, rng: R2) -> SwipeSession<'a, S, R2> {
        SwipeSession {
            store: self.store,
            catalog: self.catalog,
            user: self.user,
            date: self.date,
            state: self.state,
            rng,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SwipeState {
        &self.state
    }

    /// User driving the session.
    #[must_use]
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Day the decisions are recorded for.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Name of the venue on show, if browsing.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        match self.state {
            SwipeState::Browsing { index } => self
                .catalog
                .venues()
                .get(index)
                .map(|venue| venue.name.as_str()),
            SwipeState::MatchPending { .. } | SwipeState::Exhausted => None,
        }
    }

    /// Like the venue on show.
    ///
    /// The user directory is read before the like is stored, so a failed read
    /// leaves both the swipe log and the session untouched.
    ///
    /// # Errors
    /// Returns [`SwipeError::Store`] when the directory cannot be read or the
    /// swipe cannot be persisted.
    pub fn like(&mut self) -> Result<SwipeOutcome, SwipeError> {
        let (index, venue) = match self.on_show() {
            Ok(showing) => showing,
            Err(reason) => return Ok(SwipeOutcome::NoOp(reason)),
        };
        let users = self.store.load_users()?;
        let others = self.record(&venue, true)?;
        if others.is_empty() {
            self.state = browsing_at(index + 1, self.catalog);
            return Ok(SwipeOutcome::Recorded {
                venue,
                liked: true,
                missed_match: false,
            });
        }
        let event = MatchEvent::sample(venue, self.date, &others, &users, &mut self.rng);
        log::info!(
            "{} matched on '{}' with {} other(s)",
            self.user,
            event.venue,
            event.total
        );
        self.state = SwipeState::MatchPending {
            event: event.clone(),
            resume_index: index + 1,
        };
        Ok(SwipeOutcome::Matched(event))
    }

    /// Dislike the venue on show. Dislikes never produce a match.
    ///
    /// # Errors
    /// Returns [`SwipeError::Store`] when the swipe cannot be persisted.
    pub fn dislike(&mut self) -> Result<SwipeOutcome, SwipeError> {
        let (index, venue) = match self.on_show() {
            Ok(showing) => showing,
            Err(reason) => return Ok(SwipeOutcome::NoOp(reason)),
        };
        let others = self.record(&venue, false)?;
        self.state = browsing_at(index + 1, self.catalog);
        Ok(SwipeOutcome::Recorded {
            venue,
            liked: false,
            missed_match: !others.is_empty(),
        })
    }

    /// Dismiss a pending match and continue browsing.
    pub fn acknowledge(&mut self) -> SwipeOutcome {
        match self.state {
            SwipeState::MatchPending { resume_index, .. } => {
                self.state = browsing_at(resume_index, self.catalog);
                SwipeOutcome::Acknowledged
            }
            SwipeState::Browsing { .. } | SwipeState::Exhausted => {
                SwipeOutcome::NoOp(NoOpReason::NothingPending)
            }
        }
    }

    /// Withdraw the user's most recent decision of the day and step back.
    ///
    /// # Errors
    /// Returns [`SwipeError::Store`] when the swipe log cannot be updated.
    pub fn undo(&mut self) -> Result<SwipeOutcome, SwipeError> {
        let index = match self.state {
            SwipeState::MatchPending { .. } => {
                return Ok(SwipeOutcome::NoOp(NoOpReason::MatchPending));
            }
            SwipeState::Browsing { index } => index,
            SwipeState::Exhausted => self.catalog.len(),
        };
        let Some(previous) = index.checked_sub(1) else {
            return Ok(SwipeOutcome::NoOp(NoOpReason::AtStart));
        };
        let (user, date) = (&self.user, self.date);
        let removed = modify_swipes(self.store, |log| log.pop_latest_for(user, date))?;
        if let Some(decision) = &removed {
            log::debug!("{} withdrew their swipe on '{}'", self.user, decision.venue);
        }
        self.state = SwipeState::Browsing { index: previous };
        Ok(SwipeOutcome::Undone {
            venue: removed.map(|decision| decision.venue),
        })
    }

    /// Withdraw every decision of the day and start over.
    ///
    /// # Errors
    /// Returns [`SwipeError::Store`] when the swipe log cannot be updated.
    pub fn reset(&mut self) -> Result<SwipeOutcome, SwipeError> {
        let (user, date) = (&self.user, self.date);
        let removed = modify_swipes(self.store, |log| log.remove_for(user, date))?;
        log::info!("{} reset {removed} swipe(s) for {date}", self.user);
        self.state = browsing_at(0, self.catalog);
        Ok(SwipeOutcome::Reset { removed })
    }

    fn on_show(&self) -> Result<(usize, String), NoOpReason> {
        match self.state {
            SwipeState::MatchPending { .. } => Err(NoOpReason::MatchPending),
            SwipeState::Exhausted => Err(NoOpReason::Exhausted),
            SwipeState::Browsing { index } => self
                .catalog
                .venues()
                .get(index)
                .map(|venue| (index, venue.name.clone()))
                .ok_or(NoOpReason::Exhausted),
        }
    }

    /// Store the decision and return the other users who like the venue.
    fn record(&self, venue: &str, liked: bool) -> Result<Vec<UserId>, SwipeError> {
        let decision = SwipeDecision::new(self.user.clone(), venue, self.date, liked);
        let (user, date) = (&self.user, self.date);
        let others = modify_swipes(self.store, |log| {
            log.record(decision);
            other_likers(log, user, venue, date)
        })?;
        log::debug!(
            "{} {} '{venue}' on {date}",
            self.user,
            if liked { "liked" } else { "disliked" }
        );
        Ok(others)
    }
}

fn browsing_at(index: usize, catalog: &Catalog) -> SwipeState {
    if index >= catalog.len() {
        SwipeState::Exhausted
    } else {
        SwipeState::Browsing { index }
    }
}
