//! Venue scoring for the lunch decision engine.
//!
//! The crate turns a [`Catalog`](lunchpick_core::Catalog) and one user's
//! [`PreferenceVector`](lunchpick_core::PreferenceVector) into a [`Ranking`]:
//! - [`normalize`] and [`directional`] map raw criterion values onto
//!   comparable scales.
//! - [`WeightedRanker`] produces percentage scores from min–max normalised
//!   base criteria.
//! - [`DirectionalRanker`] works on the 1–10 scale and folds in directional
//!   preferences such as "warm" versus "cold" food.
//!
//! # Examples
//!
//! ```
//! use lunchpick_core::test_support::fixtures::lunch_catalog;
//! use lunchpick_core::{Importance, Preference, PreferenceVector};
//! use lunchpick_scorer::{DirectionalRanker, Ranker};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let preferences = PreferenceVector::new()
//!     .with_importance("distance", Importance::new(8)?)
//!     .with_preference("healthy", Preference::from_slider(10)?);
//! let ranking = DirectionalRanker.rank(&lunch_catalog(), &preferences)?;
//! assert_eq!(ranking.entries()[0].name(), "Salad Lab");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod filters;
pub mod normalise;
pub mod ranking;
mod types;

pub use error::RankingError;
pub use normalise::{directional, normalize};
pub use ranking::{DirectionalRanker, Ranker, RankingMode, WeightedRanker};
pub use types::{Computation, Ranking, ScoredVenue};
