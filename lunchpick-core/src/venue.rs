//! Venues offered by the lunch catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Criterion values keyed by criterion name.
pub type CriterionValues = BTreeMap<String, f64>;

/// A place the group could have lunch at.
///
/// Values are keyed by criterion name. A venue may omit criteria it has no
/// data for; rankers treat a missing or non-finite value as "cannot score"
/// and leave the venue out rather than inventing a number.
///
/// # Examples
/// ```
/// use lunchpick_core::Venue;
///
/// let venue = Venue::new("Pho 11")
///     .with_value("distance", 12.0)
///     .with_category("vietnamese");
///
/// assert_eq!(venue.value("distance"), Some(12.0));
/// assert!(venue.value("price").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Name, unique within a catalog.
    pub name: String,
    /// Raw criterion values.
    #[serde(default)]
    pub values: CriterionValues,
    /// Free-form kind of venue ("burger", "bakery", ...), used by no-go filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Whether the venue counts as a conventional sit-down lunch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conventional: Option<bool>,
}

impl Venue {
    /// Construct a venue with no criterion values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: CriterionValues::new(),
            category: None,
            conventional: None,
        }
    }

    /// Set a criterion value while returning `self` for chaining.
    #[must_use]
    pub fn with_value(mut self, criterion: impl Into<String>, value: f64) -> Self {
        self.values.insert(criterion.into(), value);
        self
    }

    /// Set the category while returning `self` for chaining.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the conventional flag while returning `self` for chaining.
    #[must_use]
    pub fn with_conventional(mut self, conventional: bool) -> Self {
        self.conventional = Some(conventional);
        self
    }

    /// Return the finite value recorded for `criterion`, if any.
    ///
    /// `NaN` and infinities are reported as missing.
    #[must_use]
    pub fn value(&self, criterion: &str) -> Option<f64> {
        self.values
            .get(criterion)
            .copied()
            .filter(|value| value.is_finite())
    }
}
