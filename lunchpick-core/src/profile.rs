//! Preference vectors: what one user cares about for one ranking request.
//!
//! Base criteria carry an [`Importance`] where `0` means "not a criterion".
//! Directional criteria carry a [`Preference`] decoded from a 0–10 slider
//! where `5` means "no preference".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest value accepted from a 0–10 slider.
pub const SLIDER_MAX: u8 = 10;
/// Slider position that means "no preference".
pub const SLIDER_NEUTRAL: u8 = 5;

/// Errors raised when decoding slider input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreferenceError {
    /// The slider value lay outside `0..=10`.
    #[error("slider value {value} is outside 0..=10")]
    OutOfRange {
        /// Rejected value.
        value: u8,
    },
}

/// How much a base criterion matters, on `0..=10`.
///
/// # Examples
/// ```
/// use lunchpick_core::Importance;
///
/// # fn main() -> Result<(), lunchpick_core::PreferenceError> {
/// let importance = Importance::new(7)?;
/// assert_eq!(importance.get(), 7);
/// assert!(Importance::new(0)?.is_ignored());
/// assert!(Importance::new(11).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Importance(u8);

impl Importance {
    /// Importance used when every base criterion is ignored.
    pub const UNIT: Self = Self(1);

    /// Validate and wrap a slider value.
    pub const fn new(value: u8) -> Result<Self, PreferenceError> {
        if value > SLIDER_MAX {
            return Err(PreferenceError::OutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Return the raw weight.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Report whether this criterion is excluded from the weighted sum.
    #[must_use]
    pub const fn is_ignored(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for Importance {
    type Error = PreferenceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Importance> for u8 {
    fn from(value: Importance) -> Self {
        value.0
    }
}

/// Which end of a directional scale the user leans towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leaning {
    /// Favour high raw values (slider above 5).
    High,
    /// Favour low raw values (slider below 5).
    Low,
}

/// A user's stance on a directional criterion.
///
/// Slider value `5` decodes to [`Preference::Indifferent`]; anything else
/// records the leaning and how far from neutral the slider sat.
///
/// # Examples
/// ```
/// use lunchpick_core::{Leaning, Preference};
///
/// # fn main() -> Result<(), lunchpick_core::PreferenceError> {
/// assert_eq!(Preference::from_slider(5)?, Preference::Indifferent);
/// assert_eq!(
///     Preference::from_slider(9)?,
///     Preference::Prefers { leaning: Leaning::High, strength: 4 },
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Preference {
    /// No preference; the criterion is left out of the ranking.
    #[default]
    Indifferent,
    /// The user leans towards one end of the scale.
    Prefers {
        /// Favoured end.
        leaning: Leaning,
        /// Distance from the neutral position, `1..=5`.
        strength: u8,
    },
}

impl Preference {
    /// Decode a 0–10 slider value.
    pub const fn from_slider(value: u8) -> Result<Self, PreferenceError> {
        if value > SLIDER_MAX {
            return Err(PreferenceError::OutOfRange { value });
        }
        Ok(if value == SLIDER_NEUTRAL {
            Self::Indifferent
        } else if value > SLIDER_NEUTRAL {
            Self::Prefers {
                leaning: Leaning::High,
                strength: value - SLIDER_NEUTRAL,
            }
        } else {
            Self::Prefers {
                leaning: Leaning::Low,
                strength: SLIDER_NEUTRAL - value,
            }
        })
    }

    /// Encode back to the 0–10 slider position.
    #[must_use]
    pub const fn to_slider(self) -> u8 {
        match self {
            Self::Indifferent => SLIDER_NEUTRAL,
            Self::Prefers {
                leaning: Leaning::High,
                strength,
            } => SLIDER_NEUTRAL + strength,
            Self::Prefers {
                leaning: Leaning::Low,
                strength,
            } => SLIDER_NEUTRAL - strength,
        }
    }

    /// Return the leaning, or `None` when indifferent.
    #[must_use]
    pub const fn leaning(self) -> Option<Leaning> {
        match self {
            Self::Indifferent => None,
            Self::Prefers { leaning, .. } => Some(leaning),
        }
    }
}

impl TryFrom<u8> for Preference {
    type Error = PreferenceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_slider(value)
    }
}

impl From<Preference> for u8 {
    fn from(value: Preference) -> Self {
        value.to_slider()
    }
}

/// Per-criterion input for one ranking request.
///
/// Criteria absent from the vector default to an ignored importance and an
/// indifferent preference.
///
/// # Examples
/// ```
/// use lunchpick_core::{Importance, Preference, PreferenceVector};
///
/// # fn main() -> Result<(), lunchpick_core::PreferenceError> {
/// let prefs = PreferenceVector::new()
///     .with_importance("price", Importance::new(8)?)
///     .with_preference("warmth", Preference::from_slider(2)?);
/// assert_eq!(prefs.importance("price").get(), 8);
/// assert!(prefs.importance("distance").is_ignored());
/// assert_eq!(prefs.preference("healthy"), Preference::Indifferent);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreferenceVector {
    /// Importance per base criterion.
    #[serde(default)]
    pub importance: BTreeMap<String, Importance>,
    /// Preference per directional criterion.
    #[serde(default)]
    pub preferences: BTreeMap<String, Preference>,
    /// Keep only venues flagged as conventional.
    #[serde(default)]
    pub conventional_only: bool,
    /// Venue categories the user refuses today.
    #[serde(default)]
    pub excluded_categories: Vec<String>,
}

impl PreferenceVector {
    /// Construct an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the importance recorded for `criterion`.
    #[must_use]
    pub fn importance(&self, criterion: &str) -> Importance {
        self.importance.get(criterion).copied().unwrap_or_default()
    }

    /// Return the preference recorded for `criterion`.
    #[must_use]
    pub fn preference(&self, criterion: &str) -> Preference {
        self.preferences.get(criterion).copied().unwrap_or_default()
    }

    /// Add an importance while returning `self` for chaining.
    #[must_use]
    pub fn with_importance(mut self, criterion: impl Into<String>, importance: Importance) -> Self {
        self.importance.insert(criterion.into(), importance);
        self
    }

    /// Add a directional preference while returning `self` for chaining.
    #[must_use]
    pub fn with_preference(mut self, criterion: impl Into<String>, preference: Preference) -> Self {
        self.preferences.insert(criterion.into(), preference);
        self
    }

    /// Require conventional venues while returning `self` for chaining.
    #[must_use]
    pub const fn conventional_only(mut self) -> Self {
        self.conventional_only = true;
        self
    }

    /// Exclude a venue category while returning `self` for chaining.
    #[must_use]
    pub fn excluding(mut self, category: impl Into<String>) -> Self {
        self.excluded_categories.push(category.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Leaning::Low, 5)]
    #[case(4, Leaning::Low, 1)]
    #[case(6, Leaning::High, 1)]
    #[case(10, Leaning::High, 5)]
    fn slider_decodes_leaning(#[case] slider: u8, #[case] leaning: Leaning, #[case] strength: u8) {
        assert_eq!(
            Preference::from_slider(slider),
            Ok(Preference::Prefers { leaning, strength })
        );
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(5)]
    #[case(10)]
    fn slider_round_trips(#[case] slider: u8) {
        let preference = Preference::from_slider(slider)
            .unwrap_or_else(|err| panic!("slider {slider} should decode: {err}"));
        assert_eq!(preference.to_slider(), slider);
    }

    #[rstest]
    fn out_of_range_slider_is_rejected() {
        assert_eq!(
            Preference::from_slider(11),
            Err(PreferenceError::OutOfRange { value: 11 })
        );
        assert!(Importance::new(42).is_err());
    }

    #[rstest]
    fn preference_vector_parses_plain_sliders() {
        let prefs: PreferenceVector = serde_json::from_str(
            r#"{"importance":{"price":7},"preferences":{"warmth":5,"healthy":9}}"#,
        )
        .unwrap_or_else(|err| panic!("vector should parse: {err}"));
        assert_eq!(prefs.importance("price").get(), 7);
        assert_eq!(prefs.preference("warmth"), Preference::Indifferent);
        assert_eq!(prefs.preference("healthy").leaning(), Some(Leaning::High));
    }

    #[rstest]
    fn preference_vector_rejects_out_of_range_importance() {
        let parsed = serde_json::from_str::<PreferenceVector>(r#"{"importance":{"price":12}}"#);
        assert!(parsed.is_err());
    }
}
