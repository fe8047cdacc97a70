//! Turn raw criterion values into comparable scores.
//!
//! Both transforms work over the values of the current candidate set rather
//! than a global range, so the same venue can score differently when the
//! catalog around it changes.

use lunchpick_core::{Leaning, Preference};

/// Upper bound of the directional scale.
pub const DIRECTIONAL_MAX: f64 = 10.0;
/// Lower bound of the directional scale.
pub const DIRECTIONAL_MIN: f64 = 1.0;
/// Sum of the scale bounds; `MIRROR - v` flips a 1–10 value.
const MIRROR: f64 = DIRECTIONAL_MAX + DIRECTIONAL_MIN;

/// Min–max normalise a series into `0.0..=1.0`.
///
/// - No finite values: every entry scores `0.0`.
/// - Constant series: every entry scores `1.0`, so a criterion nobody differs
///   on adds the same amount to every venue.
/// - Otherwise `(v - min) / (max - min)`, flipped to `1 - x` when `invert` is
///   set (for "lower is better" criteria).
///
/// Non-finite entries in an otherwise usable series score `0.0`.
///
/// # Examples
/// ```
/// use lunchpick_scorer::normalize;
///
/// assert_eq!(normalize(&[10.0, 20.0, 15.0], false), vec![0.0, 1.0, 0.5]);
/// assert_eq!(normalize(&[10.0, 20.0], true), vec![1.0, 0.0]);
/// assert_eq!(normalize(&[4.0, 4.0], true), vec![1.0, 1.0]);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "min-max scaling divides by the observed range"
)]
#[must_use]
pub fn normalize(series: &[f64], invert: bool) -> Vec<f64> {
    let finite = || series.iter().copied().filter(|value| value.is_finite());
    let (Some(min), Some(max)) = (finite().reduce(f64::min), finite().reduce(f64::max)) else {
        return vec![0.0; series.len()];
    };
    if min == max {
        return series
            .iter()
            .map(|value| if value.is_finite() { 1.0 } else { 0.0 })
            .collect();
    }
    let range = max - min;
    series
        .iter()
        .map(|&value| {
            if !value.is_finite() {
                return 0.0;
            }
            let scaled = ((value - min) / range).clamp(0.0, 1.0);
            if invert { 1.0 - scaled } else { scaled }
        })
        .collect()
}

/// Align a 1–10 directional series with a user's preference.
///
/// Returns `None` for [`Preference::Indifferent`]: the criterion is not
/// applicable and must be left out of the aggregate rather than scored.
/// Leaning high keeps raw values and leaning low mirrors them with `11 - v`;
/// `low_is_best` swaps the two. Results are clipped to `1.0..=10.0`.
///
/// # Examples
/// ```
/// use lunchpick_core::Preference;
/// use lunchpick_scorer::directional;
///
/// # fn main() -> Result<(), lunchpick_core::PreferenceError> {
/// let warmth = [9.0, 2.0];
/// assert_eq!(directional(&warmth, Preference::from_slider(5)?, false), None);
/// assert_eq!(directional(&warmth, Preference::from_slider(8)?, false), Some(vec![9.0, 2.0]));
/// assert_eq!(directional(&warmth, Preference::from_slider(1)?, false), Some(vec![2.0, 9.0]));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn directional(series: &[f64], preference: Preference, low_is_best: bool) -> Option<Vec<f64>> {
    let leaning = preference.leaning()?;
    let mirror = matches!(
        (leaning, low_is_best),
        (Leaning::High, true) | (Leaning::Low, false)
    );
    Some(
        series
            .iter()
            .map(|&value| {
                let aligned = if mirror { mirrored(value) } else { value };
                aligned.clamp(DIRECTIONAL_MIN, DIRECTIONAL_MAX)
            })
            .collect(),
    )
}

/// Flip a value on the 1–10 scale.
#[expect(clippy::float_arithmetic, reason = "mirroring subtracts from 11")]
pub(crate) fn mirrored(value: f64) -> f64 {
    MIRROR - value
}
