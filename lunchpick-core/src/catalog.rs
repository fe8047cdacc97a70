//! The option catalog: declared criteria plus the venues to choose from.
//!
//! Catalogs are loaded once per session and treated as read-only by every
//! engine component. Order matters: rankers break ties by catalog order and
//! swipe sessions walk venues in this order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Criterion, Direction, Venue};

/// Errors returned by [`Catalog::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two venues share a name.
    #[error("venue '{name}' appears more than once in the catalog")]
    DuplicateVenue {
        /// Repeated venue name.
        name: String,
    },
    /// Two criteria share a name.
    #[error("criterion '{name}' is declared more than once")]
    DuplicateCriterion {
        /// Repeated criterion name.
        name: String,
    },
    /// A venue had an empty name.
    #[error("venue names must not be blank")]
    BlankVenueName,
}

/// An ordered, validated collection of venues.
///
/// # Examples
/// ```
/// use lunchpick_core::{Catalog, Criterion, Venue};
///
/// # fn main() -> Result<(), lunchpick_core::CatalogError> {
/// let catalog = Catalog::new(
///     vec![Criterion::lower_is_better("price")],
///     vec![Venue::new("Banemi").with_value("price", 14.9)],
/// )?;
/// assert_eq!(catalog.len(), 1);
/// assert!(catalog.venue("Banemi").is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct Catalog {
    criteria: Vec<Criterion>,
    venues: Vec<Venue>,
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    criteria: Vec<Criterion>,
    venues: Vec<Venue>,
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        Self::new(raw.criteria, raw.venues)
    }
}

impl Catalog {
    /// Validate and construct a catalog.
    ///
    /// Venue names are trimmed; blank or repeated names are rejected, as are
    /// repeated criterion names.
    pub fn new(criteria: Vec<Criterion>, venues: Vec<Venue>) -> Result<Self, CatalogError> {
        let mut seen_criteria = HashSet::new();
        for criterion in &criteria {
            if !seen_criteria.insert(criterion.name.as_str()) {
                return Err(CatalogError::DuplicateCriterion {
                    name: criterion.name.clone(),
                });
            }
        }

        let mut seen_venues = HashSet::new();
        let mut cleaned = Vec::with_capacity(venues.len());
        for mut venue in venues {
            let trimmed = venue.name.trim();
            if trimmed.is_empty() {
                return Err(CatalogError::BlankVenueName);
            }
            venue.name = trimmed.to_owned();
            if !seen_venues.insert(venue.name.clone()) {
                return Err(CatalogError::DuplicateVenue { name: venue.name });
            }
            cleaned.push(venue);
        }

        Ok(Self {
            criteria,
            venues: cleaned,
        })
    }

    /// Criteria with a fixed polarity.
    pub fn base_criteria(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter().filter(|criterion| criterion.is_base())
    }

    /// Criteria whose polarity depends on the user.
    pub fn directional_criteria(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria
            .iter()
            .filter(|criterion| criterion.direction == Direction::Directional)
    }

    /// Venues in catalog order.
    #[must_use]
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Look a venue up by name.
    #[must_use]
    pub fn venue(&self, name: &str) -> Option<&Venue> {
        self.venues.iter().find(|venue| venue.name == name)
    }

    /// Number of venues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    /// Report whether the catalog has no venues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rejects_duplicate_venue_names() {
        let result = Catalog::new(
            Vec::new(),
            vec![Venue::new("Pho 11"), Venue::new(" Pho 11 ")],
        );
        assert_eq!(
            result,
            Err(CatalogError::DuplicateVenue {
                name: "Pho 11".into()
            })
        );
    }

    #[rstest]
    fn rejects_blank_names() {
        let result = Catalog::new(Vec::new(), vec![Venue::new("   ")]);
        assert_eq!(result, Err(CatalogError::BlankVenueName));
    }

    #[rstest]
    fn rejects_duplicate_criteria() {
        let result = Catalog::new(
            vec![
                Criterion::lower_is_better("price"),
                Criterion::higher_is_better("price"),
            ],
            Vec::new(),
        );
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateCriterion { .. })
        ));
    }

    #[rstest]
    fn parses_json_and_splits_criteria() {
        let catalog: Catalog = serde_json::from_str(
            r#"{
                "criteria": [
                    {"name": "distance", "direction": "lower_is_better"},
                    {"name": "warmth", "direction": "directional"}
                ],
                "venues": [{"name": "James Bun", "values": {"distance": 7}}]
            }"#,
        )
        .unwrap_or_else(|err| panic!("catalog should parse: {err}"));
        assert_eq!(catalog.base_criteria().count(), 1);
        assert_eq!(catalog.directional_criteria().count(), 1);
        assert_eq!(
            catalog.venue("James Bun").and_then(|venue| venue.value("distance")),
            Some(7.0)
        );
    }

    #[rstest]
    fn json_with_duplicate_venues_fails_validation() {
        let parsed = serde_json::from_str::<Catalog>(
            r#"{"venues": [{"name": "A"}, {"name": "A"}]}"#,
        );
        assert!(parsed.is_err());
    }
}
