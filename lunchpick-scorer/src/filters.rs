//! Hard filters applied before any scoring.

use lunchpick_core::{PreferenceVector, Venue};

/// Venues that survive the user's hard filters, in catalog order.
///
/// `conventional_only` keeps venues flagged conventional. When no venue in the
/// catalog carries the flag at all the filter cannot be honoured and is
/// skipped with a warning. Category exclusions compare case-insensitively;
/// uncategorised venues always pass.
pub(crate) fn apply_hard_filters<'a>(
    venues: &'a [Venue],
    preferences: &PreferenceVector,
) -> Vec<&'a Venue> {
    let flagged = venues.iter().any(|venue| venue.conventional.is_some());
    if preferences.conventional_only && !flagged {
        log::warn!("conventional-only requested but no venue is flagged; filter skipped");
    }
    let enforce_conventional = preferences.conventional_only && flagged;
    venues
        .iter()
        .filter(|venue| !enforce_conventional || venue.conventional == Some(true))
        .filter(|venue| !is_excluded(venue, &preferences.excluded_categories))
        .collect()
}

fn is_excluded(venue: &Venue, excluded: &[String]) -> bool {
    venue.category.as_deref().is_some_and(|category| {
        excluded
            .iter()
            .any(|blocked| blocked.trim().eq_ignore_ascii_case(category.trim()))
    })
}
