//! Core domain types for the Lunchpick engine.
//!
//! Venues, criteria and preference vectors feed the ranking engine; users,
//! swipe decisions and daily tops are the shared per-day state the swipe and
//! consensus engines read and write through an [`EngineStore`].
//! Constructors return `Result` to surface invalid input early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
pub mod criterion;
pub mod decision;
pub mod directory;
pub mod profile;
pub mod store;
pub mod test_support;
pub mod user;
pub mod venue;

pub use catalog::{Catalog, CatalogError};
pub use criterion::{Criterion, Direction};
pub use decision::{
    DAILY_TOP_SIZE, DailyPick, DailyTop, DailyTopError, SwipeDecision, SwipeLog, TopLog,
};
pub use directory::{
    DeletionReport, DirectoryError, UserDirectory, delete_user, find_user, register_user,
};
pub use profile::{
    Importance, Leaning, Preference, PreferenceError, PreferenceVector, SLIDER_MAX, SLIDER_NEUTRAL,
};
pub use store::{EngineStore, StoreError};
#[cfg(feature = "store-json")]
pub use store::JsonFileStore;
pub use user::{Role, User, UserError, UserId};
pub use venue::{CriterionValues, Venue};
