//! Criteria declared by a catalog and the direction each one is read in.
//!
//! # Examples
//! ```
//! use lunchpick_core::Direction;
//!
//! assert_eq!(Direction::LowerIsBetter.as_str(), "lower_is_better");
//! assert_eq!(Direction::Directional.to_string(), "directional");
//! ```

use serde::{Deserialize, Serialize};

/// How raw values of a criterion relate to "goodness".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Smaller raw values are better (distance, price).
    LowerIsBetter,
    /// Larger raw values are better (rating, portion size).
    HigherIsBetter,
    /// A 1–10 attribute without inherent polarity (warmth, healthiness).
    Directional,
}

impl Direction {
    /// Return the direction as a `snake_case` `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LowerIsBetter => "lower_is_better",
            Self::HigherIsBetter => "higher_is_better",
            Self::Directional => "directional",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lower_is_better" => Ok(Self::LowerIsBetter),
            "higher_is_better" => Ok(Self::HigherIsBetter),
            "directional" => Ok(Self::Directional),
            _ => Err(format!("unknown criterion direction '{s}'")),
        }
    }
}

/// A named, comparable attribute of a venue.
///
/// `low_is_best` only matters for directional criteria: it flips which end
/// of the 1–10 scale a "high" preference favours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// Criterion name, matching keys in [`Venue::values`](crate::Venue::values).
    pub name: String,
    /// How values are read.
    pub direction: Direction,
    /// Mirror directional values before applying a preference.
    #[serde(default)]
    pub low_is_best: bool,
}

impl Criterion {
    /// Construct a criterion.
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
            low_is_best: false,
        }
    }

    /// Construct a `lower_is_better` criterion.
    pub fn lower_is_better(name: impl Into<String>) -> Self {
        Self::new(name, Direction::LowerIsBetter)
    }

    /// Construct a `higher_is_better` criterion.
    pub fn higher_is_better(name: impl Into<String>) -> Self {
        Self::new(name, Direction::HigherIsBetter)
    }

    /// Construct a `directional` criterion.
    pub fn directional(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Directional)
    }

    /// Report whether the criterion is one of the base (polarised) criteria.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.direction != Direction::Directional
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(
            Direction::HigherIsBetter.to_string(),
            Direction::HigherIsBetter.as_str()
        );
    }

    #[test]
    fn parsing_rejects_unknown() {
        let err = Direction::from_str("sideways").unwrap_err();
        assert!(err.contains("unknown criterion direction"));
    }

    #[test]
    fn directional_is_not_base() {
        assert!(!Criterion::directional("warmth").is_base());
        assert!(Criterion::lower_is_better("price").is_base());
    }
}
