//! Administrative actions and daily statistics.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use lunchpick_core::store::modify_swipes;
use lunchpick_core::{DeletionReport, EngineStore, User, UserError, UserId, delete_user};
use serde::Serialize;

use crate::consensus::{ConsensusEntry, like_consensus};
use crate::error::ConsensusError;

/// Number of venues listed in [`DailyStats::top_liked`].
pub const TOP_LIKED_LIMIT: usize = 5;

/// Activity figures for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyStats {
    /// Day the figures cover.
    pub date: NaiveDate,
    /// Users in the directory.
    pub registered_users: usize,
    /// Stored swipe decisions across all days.
    pub total_swipes: usize,
    /// Swipe decisions made on `date`.
    pub swipes_on_day: usize,
    /// Users who swiped on `date`.
    pub active_users: usize,
    /// Most liked venues on `date`.
    pub top_liked: Vec<ConsensusEntry>,
}

/// Actions reserved for users with the admin role.
pub struct AdminSession<'a, S: EngineStore + ?Sized> {
    store: &'a S,
    admin: User,
}

impl<'a, S: EngineStore + ?Sized> AdminSession<'a, S> {
    /// Open a session for `admin`.
    ///
    /// # Errors
    /// Returns [`UserError::NotAdmin`] when the user lacks the admin role.
    pub fn new(store: &'a S, admin: User) -> Result<Self, ConsensusError> {
        if !admin.is_admin() {
            log::warn!("{} attempted an admin action", admin.id);
            return Err(UserError::NotAdmin { id: admin.id }.into());
        }
        Ok(Self { store, admin })
    }

    /// The acting admin.
    #[must_use]
    pub const fn admin(&self) -> &User {
        &self.admin
    }

    /// Remove every swipe made on `date`, returning how many went.
    ///
    /// # Errors
    /// Returns [`ConsensusError::Store`] when the swipe log cannot be updated.
    pub fn clear_swipes_on(&self, date: NaiveDate) -> Result<usize, ConsensusError> {
        let removed = modify_swipes(self.store, |swipes| swipes.remove_date(date))?;
        log::info!("{} cleared {removed} swipe(s) for {date}", self.admin.id);
        Ok(removed)
    }

    /// Remove every stored swipe, returning how many went.
    ///
    /// # Errors
    /// Returns [`ConsensusError::Store`] when the swipe log cannot be updated.
    pub fn clear_all_swipes(&self) -> Result<usize, ConsensusError> {
        let removed = modify_swipes(self.store, |swipes| swipes.clear())?;
        log::info!("{} cleared all {removed} swipe(s)", self.admin.id);
        Ok(removed)
    }

    /// Delete a user and everything they recorded.
    ///
    /// # Errors
    /// Returns [`ConsensusError::Directory`] when the user is unknown or the
    /// store fails.
    pub fn delete_user(&self, id: &UserId) -> Result<DeletionReport, ConsensusError> {
        Ok(delete_user(self.store, id)?)
    }

    /// Figures for the admin dashboard.
    ///
    /// # Errors
    /// Returns [`ConsensusError::Store`] when users or swipes cannot be loaded.
    pub fn stats(&self, date: NaiveDate) -> Result<DailyStats, ConsensusError> {
        let users = self.store.load_users()?;
        let swipes = self.store.load_swipes()?;
        let today = swipes.on(date);
        let active: BTreeSet<&UserId> = today.iter().map(|decision| &decision.user).collect();
        let mut top_liked = like_consensus(&swipes, date);
        top_liked.truncate(TOP_LIKED_LIMIT);
        Ok(DailyStats {
            date,
            registered_users: users.len(),
            total_swipes: swipes.len(),
            swipes_on_day: today.len(),
            active_users: active.len(),
            top_liked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lunchpick_core::test_support::MemoryStore;
    use lunchpick_core::test_support::fixtures::lunch_day;
    use lunchpick_core::{Role, SwipeDecision, SwipeLog, register_user};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> MemoryStore {
        let store = MemoryStore::default();
        let day = lunch_day();
        let yesterday = day.pred_opt().unwrap_or(day);
        for (first, last) in [("Ann", "Lee"), ("Bob", "Ray"), ("Cy", "Dee")] {
            register_user(&store, first, last, None).unwrap_or_else(|err| panic!("{err}"));
        }
        let swipes = SwipeLog::from_decisions(vec![
            SwipeDecision::new(UserId::new("Ann Lee"), "Soup Bar", day, true),
            SwipeDecision::new(UserId::new("Bob Ray"), "Soup Bar", day, true),
            SwipeDecision::new(UserId::new("Bob Ray"), "Salad Lab", day, false),
            SwipeDecision::new(UserId::new("Cy Dee"), "Soup Bar", yesterday, true),
        ]);
        store
            .save_swipes(&swipes)
            .unwrap_or_else(|err| panic!("{err}"));
        store
    }

    fn admin() -> User {
        User::member("Root", "Admin")
            .unwrap_or_else(|err| panic!("{err}"))
            .with_role(Role::Admin)
    }

    #[rstest]
    fn members_cannot_open_a_session(store: MemoryStore) {
        let member = User::member("Ann", "Lee").unwrap_or_else(|err| panic!("{err}"));
        let denied = AdminSession::new(&store, member);
        assert!(matches!(
            denied,
            Err(ConsensusError::User(UserError::NotAdmin { .. }))
        ));
    }

    #[rstest]
    fn stats_cover_the_day(store: MemoryStore) {
        let session = AdminSession::new(&store, admin()).unwrap_or_else(|err| panic!("{err}"));
        let stats = session
            .stats(lunch_day())
            .unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(stats.registered_users, 3);
        assert_eq!(stats.total_swipes, 4);
        assert_eq!(stats.swipes_on_day, 3);
        assert_eq!(stats.active_users, 2);
        assert_eq!(
            stats.top_liked,
            [ConsensusEntry {
                venue: "Soup Bar".to_owned(),
                weight: 2,
                voters: 2,
            }]
        );
    }

    #[rstest]
    fn clearing_a_day_keeps_other_days(store: MemoryStore) {
        let session = AdminSession::new(&store, admin()).unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(session.clear_swipes_on(lunch_day()).ok(), Some(3));
        assert_eq!(session.clear_all_swipes().ok(), Some(1));
        let remaining = store.load_swipes().unwrap_or_else(|err| panic!("{err}"));
        assert!(remaining.is_empty());
    }

    #[rstest]
    fn admin_can_delete_users(store: MemoryStore) {
        let session = AdminSession::new(&store, admin()).unwrap_or_else(|err| panic!("{err}"));
        let report = session
            .delete_user(&UserId::new("Bob Ray"))
            .unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(report.swipes_removed, 2);
        assert!(matches!(
            session.delete_user(&UserId::new("Bob Ray")),
            Err(ConsensusError::Directory(_))
        ));
    }
}
