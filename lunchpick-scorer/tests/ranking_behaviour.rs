//! Behavioural coverage for both rankers.

use std::cell::RefCell;

use lunchpick_core::test_support::fixtures::{bobun_catalog, lunch_catalog};
use lunchpick_core::{Catalog, Importance, Preference, PreferenceVector};
use lunchpick_scorer::{
    Computation, DirectionalRanker, Ranker, Ranking, RankingError, WeightedRanker,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// State shared by the steps of one scenario.
pub struct TestContext {
    catalog: RefCell<Option<Catalog>>,
    preferences: RefCell<PreferenceVector>,
    outcome: RefCell<Option<Result<Ranking, RankingError>>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        catalog: RefCell::new(None),
        preferences: RefCell::new(PreferenceVector::new()),
        outcome: RefCell::new(None),
    }
}

impl TestContext {
    fn run(&self, ranker: &dyn Ranker) {
        let catalog = self.catalog.borrow();
        let catalog = catalog
            .as_ref()
            .unwrap_or_else(|| panic!("a catalog must be given first"));
        let outcome = ranker.rank(catalog, &self.preferences.borrow());
        self.outcome.replace(Some(outcome));
    }

    fn ranking(&self) -> Ranking {
        match self.outcome.borrow().as_ref() {
            Some(Ok(ranking)) => ranking.clone(),
            Some(Err(err)) => panic!("ranking failed: {err}"),
            None => panic!("no ranker has run"),
        }
    }

    fn update(&self, change: impl FnOnce(PreferenceVector) -> PreferenceVector) {
        let current = self.preferences.take();
        self.preferences.replace(change(current));
    }
}

#[given("the sample lunch catalog")]
fn given_lunch_catalog(context: &TestContext) {
    context.catalog.replace(Some(lunch_catalog()));
}

#[given("the bo bun catalog")]
fn given_bobun_catalog(context: &TestContext) {
    context.catalog.replace(Some(bobun_catalog()));
}

#[given("a preference of {value} for {criterion}")]
fn given_importance(context: &TestContext, value: u8, criterion: String) {
    let importance = Importance::new(value).unwrap_or_else(|err| panic!("importance: {err}"));
    context.update(|prefs| prefs.with_importance(criterion, importance));
}

#[given("a slider of {value} for {criterion}")]
fn given_slider(context: &TestContext, value: u8, criterion: String) {
    let preference =
        Preference::from_slider(value).unwrap_or_else(|err| panic!("slider: {err}"));
    context.update(|prefs| prefs.with_preference(criterion, preference));
}

#[given("the categories soup, salad, burger and sandwich are excluded")]
fn given_everything_excluded(context: &TestContext) {
    context.update(|prefs| {
        ["soup", "salad", "burger", "sandwich"]
            .into_iter()
            .fold(prefs, |acc, category| acc.excluding(category))
    });
}

#[when("the directional ranker runs")]
fn when_directional(context: &TestContext) {
    context.run(&DirectionalRanker);
}

#[when("the weighted ranker runs")]
fn when_weighted(context: &TestContext) {
    context.run(&WeightedRanker);
}

#[then("{venue} is ranked first")]
fn then_ranked_first(context: &TestContext, venue: String) {
    let expected = venue.trim_matches('"');
    let ranking = context.ranking();
    let first = ranking.entries().first().map(|entry| entry.name().to_owned());
    assert_eq!(first.as_deref(), Some(expected));
}

#[then("the ranking used the user's weights")]
fn then_weighted(context: &TestContext) {
    assert_eq!(context.ranking().computation(), Computation::Weighted);
}

#[then("the ranking fell back to the base mean")]
fn then_base_mean(context: &TestContext) {
    assert_eq!(context.ranking().computation(), Computation::BaseMean);
}

#[then("ranking fails for lack of candidates")]
fn then_no_candidates(context: &TestContext) {
    let outcome = context.outcome.borrow();
    assert!(matches!(
        outcome.as_ref(),
        Some(Err(RankingError::NoCandidates { .. }))
    ));
}

#[then("the top venue scores {score}")]
fn then_top_score(context: &TestContext, score: f64) {
    let ranking = context.ranking();
    let top = ranking.entries().first().map(|entry| entry.score);
    assert!(top.is_some_and(|value| (value - score).abs() < 1e-9));
}

#[scenario(path = "tests/features/ranking.feature", index = 0)]
fn healthy_eater_values_proximity(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/ranking.feature", index = 1)]
fn indifferent_user_gets_base_mean(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/ranking.feature", index = 2)]
fn exclusions_leave_nothing(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/ranking.feature", index = 3)]
fn weighted_favours_quick_trip(context: TestContext) {
    let _ = context;
}
