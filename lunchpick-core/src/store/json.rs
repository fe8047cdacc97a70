//! JSON documents on disk, one per collection.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{EngineStore, StoreError};
use crate::{SwipeLog, TopLog, UserDirectory};

const USERS_FILE: &str = "users.json";
const SWIPES_FILE: &str = "swipes.json";
const TOPS_FILE: &str = "tops.json";

/// File-backed store keeping `users.json`, `swipes.json` and `tops.json` in
/// one data directory.
///
/// Missing documents read as empty collections; the directory is created on
/// first write. Each save replaces the whole document, so the race described
/// in the [module documentation](super) applies.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: Utf8PathBuf,
}

impl JsonFileStore {
    /// Use `root` as the data directory.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn path(&self, file: &str) -> Utf8PathBuf {
        self.root.join(file)
    }

    fn load<T>(&self, file: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path(file);
        let contents =
            lunchpick_fs::read_optional_to_string(&path).map_err(|source| StoreError::Read {
                path: path.clone().into_std_path_buf(),
                source,
            })?;
        let Some(text) = contents else {
            return Ok(T::default());
        };
        if text.trim().is_empty() {
            return Ok(T::default());
        }
        serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: path.into_std_path_buf(),
            source,
        })
    }

    fn save<T>(&self, file: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let path = self.path(file);
        let payload = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serialise {
            path: path.clone().into_std_path_buf(),
            source,
        })?;
        lunchpick_fs::write_replacing(&path, &payload).map_err(|source| StoreError::Write {
            path: path.into_std_path_buf(),
            source,
        })
    }
}

impl EngineStore for JsonFileStore {
    fn load_users(&self) -> Result<UserDirectory, StoreError> {
        self.load(USERS_FILE)
    }

    fn save_users(&self, users: &UserDirectory) -> Result<(), StoreError> {
        self.save(USERS_FILE, users)
    }

    fn load_swipes(&self) -> Result<SwipeLog, StoreError> {
        self.load(SWIPES_FILE)
    }

    fn save_swipes(&self, swipes: &SwipeLog) -> Result<(), StoreError> {
        self.save(SWIPES_FILE, swipes)
    }

    fn load_tops(&self) -> Result<TopLog, StoreError> {
        self.load(TOPS_FILE)
    }

    fn save_tops(&self, tops: &TopLog) -> Result<(), StoreError> {
        self.save(TOPS_FILE, tops)
    }
}
