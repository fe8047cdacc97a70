//! Registered users and the operations that create or remove them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::{EngineStore, StoreError, modify_swipes, modify_tops, modify_users};
use crate::{User, UserError, UserId};

/// Users keyed by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDirectory {
    users: BTreeMap<UserId, User>,
}

impl UserDirectory {
    /// Insert or replace a user, returning the previous record.
    pub fn insert(&mut self, user: User) -> Option<User> {
        self.users.insert(user.id.clone(), user)
    }

    /// Look a user up.
    #[must_use]
    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Remove a user, returning the record.
    pub fn remove(&mut self, id: &UserId) -> Option<User> {
        self.users.remove(id)
    }

    /// Name to show for `id`, falling back to the identifier itself for users
    /// that are no longer registered.
    #[must_use]
    pub fn display_name(&self, id: &UserId) -> String {
        self.get(id)
            .map_or_else(|| id.as_str().to_owned(), User::display_name)
    }

    /// Iterate over users ordered by identifier.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Report whether nobody is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Errors raised by directory operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The request itself was invalid.
    #[error(transparent)]
    User(#[from] UserError),
    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Return the user for a name pair, creating a member on first use.
///
/// A non-blank `description` replaces the stored one; a blank or absent one
/// leaves it untouched.
pub fn register_user<S>(
    store: &S,
    first_name: &str,
    last_name: &str,
    description: Option<&str>,
) -> Result<User, DirectoryError>
where
    S: EngineStore + ?Sized,
{
    let candidate = User::member(first_name, last_name)?;
    let user = modify_users(store, |users| {
        let existing = users.get(&candidate.id).cloned();
        let entry = existing.unwrap_or_else(|| {
            log::info!("registering user {}", candidate.id);
            candidate
        });
        let updated = match description {
            Some(text) if !text.trim().is_empty() => entry.with_description(text),
            _ => entry,
        };
        users.insert(updated.clone());
        updated
    })?;
    Ok(user)
}

/// Look a registered user up.
pub fn find_user<S>(store: &S, id: &UserId) -> Result<User, DirectoryError>
where
    S: EngineStore + ?Sized,
{
    store
        .load_users()?
        .get(id)
        .cloned()
        .ok_or_else(|| DirectoryError::User(UserError::UnknownUser { id: id.clone() }))
}

/// What [`delete_user`] removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionReport {
    /// Removed user.
    pub user: User,
    /// Swipe decisions removed.
    pub swipes_removed: usize,
    /// Daily tops removed.
    pub tops_removed: usize,
}

/// Delete a user together with every swipe and daily top they recorded.
pub fn delete_user<S>(store: &S, id: &UserId) -> Result<DeletionReport, DirectoryError>
where
    S: EngineStore + ?Sized,
{
    let removed = modify_users(store, |users| users.remove(id))?;
    let user = removed.ok_or_else(|| UserError::UnknownUser { id: id.clone() })?;
    let swipes_removed = modify_swipes(store, |swipes| swipes.remove_user(id))?;
    let tops_removed = modify_tops(store, |tops| tops.remove_user(id))?;
    log::info!(
        "deleted user {id} with {swipes_removed} swipes and {tops_removed} daily tops"
    );
    Ok(DeletionReport {
        user,
        swipes_removed,
        tops_removed,
    })
}
