//! Persistence seam for users, swipe decisions and daily tops.
//!
//! The engine never holds state between calls. Every write goes through
//! read-full-state, apply a keyed change, persist-full-state, using the
//! `modify_*` helpers in this module.
//!
//! # Concurrency
//!
//! Several people swipe during the same lunch hour, so two writers can load
//! the same snapshot and both save. The second save wins and the first
//! writer's change is lost. Stores do not lock or version their documents;
//! callers that need stronger guarantees must serialise writes themselves
//! (for example by routing them through a single writer).

use std::path::PathBuf;

use thiserror::Error;

use crate::{SwipeLog, TopLog, UserDirectory};

#[cfg(feature = "store-json")]
mod json;

#[cfg(feature = "store-json")]
pub use json::JsonFileStore;

/// Errors raised by [`EngineStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading a persisted document failed.
    #[error("failed to read {path:?}: {source}")]
    Read {
        /// Document location.
        path: PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Writing a persisted document failed.
    #[error("failed to write {path:?}: {source}")]
    Write {
        /// Document location.
        path: PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A persisted document was not valid JSON for its record type.
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        /// Document location.
        path: PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Encoding a document failed.
    #[error("failed to serialise {path:?}: {source}")]
    Serialise {
        /// Document location.
        path: PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// An in-memory store lock was poisoned by a panicking writer.
    #[error("{collection} lock was poisoned")]
    Poisoned {
        /// Affected collection.
        collection: &'static str,
    },
}

/// Narrow read/write access to the shared lunch state.
///
/// Implementations hand out full snapshots and persist full snapshots. They
/// must be `Send + Sync` so one store can serve every user's session.
///
/// # Examples
///
/// ```rust
/// use lunchpick_core::store::{EngineStore, modify_swipes};
/// use lunchpick_core::test_support::MemoryStore;
/// use lunchpick_core::{SwipeDecision, UserId};
/// use chrono::NaiveDate;
///
/// # fn main() -> Result<(), lunchpick_core::store::StoreError> {
/// let store = MemoryStore::default();
/// let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap_or_default();
/// modify_swipes(&store, |log| {
///     log.record(SwipeDecision::new(UserId::new("Ada Lovelace"), "Pho 11", day, true));
/// })?;
/// assert_eq!(store.load_swipes()?.len(), 1);
/// # Ok(())
/// # }
/// ```
pub trait EngineStore: Send + Sync {
    /// Load every registered user.
    fn load_users(&self) -> Result<UserDirectory, StoreError>;
    /// Persist the full user directory.
    fn save_users(&self, users: &UserDirectory) -> Result<(), StoreError>;
    /// Load the full swipe log.
    fn load_swipes(&self) -> Result<SwipeLog, StoreError>;
    /// Persist the full swipe log.
    fn save_swipes(&self, swipes: &SwipeLog) -> Result<(), StoreError>;
    /// Load every daily top submission.
    fn load_tops(&self) -> Result<TopLog, StoreError>;
    /// Persist every daily top submission.
    fn save_tops(&self, tops: &TopLog) -> Result<(), StoreError>;
}

/// Load the user directory, apply `change`, and save it back.
pub fn modify_users<S, T>(
    store: &S,
    change: impl FnOnce(&mut UserDirectory) -> T,
) -> Result<T, StoreError>
where
    S: EngineStore + ?Sized,
{
    let mut users = store.load_users()?;
    let result = change(&mut users);
    store.save_users(&users)?;
    Ok(result)
}

/// Load the swipe log, apply `change`, and save it back.
pub fn modify_swipes<S, T>(
    store: &S,
    change: impl FnOnce(&mut SwipeLog) -> T,
) -> Result<T, StoreError>
where
    S: EngineStore + ?Sized,
{
    let mut swipes = store.load_swipes()?;
    let result = change(&mut swipes);
    store.save_swipes(&swipes)?;
    Ok(result)
}

/// Load the daily tops, apply `change`, and save them back.
pub fn modify_tops<S, T>(store: &S, change: impl FnOnce(&mut TopLog) -> T) -> Result<T, StoreError>
where
    S: EngineStore + ?Sized,
{
    let mut tops = store.load_tops()?;
    let result = change(&mut tops);
    store.save_tops(&tops)?;
    Ok(result)
}
