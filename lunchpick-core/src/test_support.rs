//! In-memory `EngineStore` and sample data used by unit and behaviour tests.

use std::sync::{Mutex, MutexGuard};

use crate::store::{EngineStore, StoreError};
use crate::{SwipeLog, TopLog, UserDirectory};

/// In-memory `EngineStore` implementation used in tests.
///
/// Each collection sits behind its own mutex, mirroring the one-document-per-
/// collection layout of the file store.
#[derive(Default, Debug)]
pub struct MemoryStore {
    users: Mutex<UserDirectory>,
    swipes: Mutex<SwipeLog>,
    tops: Mutex<TopLog>,
}

fn lock<'a, T>(
    mutex: &'a Mutex<T>,
    collection: &'static str,
) -> Result<MutexGuard<'a, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Poisoned { collection })
}

impl EngineStore for MemoryStore {
    fn load_users(&self) -> Result<UserDirectory, StoreError> {
        Ok(lock(&self.users, "users")?.clone())
    }

    fn save_users(&self, users: &UserDirectory) -> Result<(), StoreError> {
        *lock(&self.users, "users")? = users.clone();
        Ok(())
    }

    fn load_swipes(&self) -> Result<SwipeLog, StoreError> {
        Ok(lock(&self.swipes, "swipes")?.clone())
    }

    fn save_swipes(&self, swipes: &SwipeLog) -> Result<(), StoreError> {
        *lock(&self.swipes, "swipes")? = swipes.clone();
        Ok(())
    }

    fn load_tops(&self) -> Result<TopLog, StoreError> {
        Ok(lock(&self.tops, "tops")?.clone())
    }

    fn save_tops(&self, tops: &TopLog) -> Result<(), StoreError> {
        *lock(&self.tops, "tops")? = tops.clone();
        Ok(())
    }
}

/// Sample catalogs shared by the workspace's tests.
#[cfg(any(test, feature = "test-support"))]
pub mod fixtures {
    use chrono::NaiveDate;

    use crate::{Catalog, Criterion, Venue};

    /// Monday used as "today" throughout the tests.
    #[must_use]
    pub fn lunch_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap_or_default()
    }

    /// Travel time, rating and price for a handful of bo bun places.
    #[must_use]
    pub fn bobun_catalog() -> Catalog {
        let rows = [
            ("Pho 11", 12.0, 3.8, 11.8),
            ("L'othentique Vietnam", 13.0, 4.6, 15.0),
            ("Banemi", 18.0, 4.6, 14.9),
            ("Song Heng", 14.0, 4.5, 13.0),
            ("Le petit Cambodge", 13.0, 4.8, 15.5),
            ("James Bun", 7.0, 4.4, 14.5),
            ("Entre 2 rives", 10.0, 4.5, 14.0),
        ];
        let venues = rows
            .into_iter()
            .map(|(name, travel, rating, price)| {
                Venue::new(name)
                    .with_value("travel_time", travel)
                    .with_value("rating", rating)
                    .with_value("price", price)
            })
            .collect();
        Catalog::new(
            vec![
                Criterion::lower_is_better("travel_time"),
                Criterion::higher_is_better("rating"),
                Criterion::lower_is_better("price"),
            ],
            venues,
        )
        .unwrap_or_else(|err| panic!("sample catalog is valid: {err}"))
    }

    /// Pre-scored base criteria plus directional attributes.
    #[must_use]
    pub fn lunch_catalog() -> Catalog {
        let rows = [
            ("Soup Bar", 8.0, 6.0, 5.0, 4.0, 9.0, 7.0, 1.0, "soup", true),
            ("Salad Lab", 6.0, 5.0, 4.0, 3.0, 2.0, 10.0, 2.0, "salad", true),
            ("Burger Joint", 5.0, 7.0, 9.0, 10.0, 8.0, 1.0, 8.0, "burger", false),
            ("Bagel Corner", 9.0, 8.0, 6.0, 6.0, 3.0, 5.0, 10.0, "sandwich", true),
        ];
        let venues = rows
            .into_iter()
            .map(
                |(name, distance, price, quantity, indulgence, warmth, healthy, format, kind, conv)| {
                    Venue::new(name)
                        .with_value("distance", distance)
                        .with_value("price", price)
                        .with_value("quantity", quantity)
                        .with_value("indulgence", indulgence)
                        .with_value("warmth", warmth)
                        .with_value("healthy", healthy)
                        .with_value("format", format)
                        .with_category(kind)
                        .with_conventional(conv)
                },
            )
            .collect();
        Catalog::new(
            vec![
                Criterion::higher_is_better("distance"),
                Criterion::higher_is_better("price"),
                Criterion::higher_is_better("quantity"),
                Criterion::higher_is_better("indulgence"),
                Criterion::directional("warmth"),
                Criterion::directional("healthy"),
                Criterion::directional("format"),
            ],
            venues,
        )
        .unwrap_or_else(|err| panic!("sample catalog is valid: {err}"))
    }

    /// Catalog of bare venue names, for swipe tests.
    #[must_use]
    pub fn named_catalog(names: &[&str]) -> Catalog {
        Catalog::new(
            Vec::new(),
            names.iter().map(|name| Venue::new(*name)).collect(),
        )
        .unwrap_or_else(|err| panic!("sample catalog is valid: {err}"))
    }
}
