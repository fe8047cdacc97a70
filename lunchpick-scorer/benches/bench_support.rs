//! Deterministic catalogs and preference vectors for the ranking benchmarks.

use lunchpick_core::{Catalog, Criterion, Importance, Preference, PreferenceVector, Venue};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

const BASE_CRITERIA: [&str; 4] = ["distance", "price", "quantity", "rating"];
const DIRECTIONAL_CRITERIA: [&str; 3] = ["warmth", "healthy", "format"];

fn criteria() -> Vec<Criterion> {
    BASE_CRITERIA
        .iter()
        .map(|name| Criterion::higher_is_better(*name))
        .chain(
            DIRECTIONAL_CRITERIA
                .iter()
                .map(|name| Criterion::directional(*name)),
        )
        .collect()
}

/// Generate a catalog of `count` venues with values drawn from `1..=10`.
#[must_use]
pub fn generate_catalog(count: usize, seed: u64) -> Catalog {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let venues = (0..count)
        .map(|index| {
            BASE_CRITERIA
                .iter()
                .chain(DIRECTIONAL_CRITERIA.iter())
                .fold(Venue::new(format!("Venue {index}")), |venue, name| {
                    venue.with_value(*name, f64::from(rng.gen_range(1_u8..=10)))
                })
        })
        .collect();
    Catalog::new(criteria(), venues)
        .unwrap_or_else(|err| panic!("generated catalog is valid: {err}"))
}

/// A preference vector touching every criterion of [`generate_catalog`].
#[must_use]
pub fn generate_preferences(seed: u64) -> PreferenceVector {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let with_importance = BASE_CRITERIA.iter().fold(PreferenceVector::new(), |prefs, name| {
        let importance = Importance::new(rng.gen_range(0..=10))
            .unwrap_or_else(|err| panic!("importance in range: {err}"));
        prefs.with_importance(*name, importance)
    });
    DIRECTIONAL_CRITERIA.iter().fold(with_importance, |prefs, name| {
        let preference = Preference::from_slider(rng.gen_range(0..=10))
            .unwrap_or_else(|err| panic!("slider in range: {err}"));
        prefs.with_preference(*name, preference)
    })
}
