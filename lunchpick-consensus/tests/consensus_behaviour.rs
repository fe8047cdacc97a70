//! Behavioural coverage for consensus and similarity.

use std::cell::RefCell;

use lunchpick_consensus::{ConsensusEntry, SimilarityEntry, consensus, similarity};
use lunchpick_core::store::modify_tops;
use lunchpick_core::test_support::MemoryStore;
use lunchpick_core::test_support::fixtures::lunch_day;
use lunchpick_core::{DailyPick, DailyTop, EngineStore, UserId};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// State shared by the steps of one scenario.
pub struct TestContext {
    store: MemoryStore,
    table: RefCell<Vec<ConsensusEntry>>,
    neighbours: RefCell<Vec<SimilarityEntry>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        store: MemoryStore::default(),
        table: RefCell::new(Vec::new()),
        neighbours: RefCell::new(Vec::new()),
    }
}

#[given("{user} ranks {first}, {second} and {third}")]
fn given_top(context: &TestContext, user: String, first: String, second: String, third: String) {
    let picks = [first, second, third]
        .into_iter()
        .map(|venue| DailyPick { venue, score: 0.0 })
        .collect();
    let top = DailyTop::new(UserId::new(user), lunch_day(), picks)
        .unwrap_or_else(|err| panic!("daily top: {err}"));
    modify_tops(&context.store, |tops| tops.upsert(top))
        .unwrap_or_else(|err| panic!("store top: {err}"));
}

#[when("the consensus is computed")]
fn when_consensus(context: &TestContext) {
    let tops = context
        .store
        .load_tops()
        .unwrap_or_else(|err| panic!("load tops: {err}"));
    context.table.replace(consensus(&tops, lunch_day()));
}

#[when("{user} asks who eats like them")]
fn when_similarity(context: &TestContext, user: String) {
    let tops = context
        .store
        .load_tops()
        .unwrap_or_else(|err| panic!("load tops: {err}"));
    context
        .neighbours
        .replace(similarity(&tops, lunch_day(), &UserId::new(user)));
}

#[then("the consensus order is {first}, {second}, {third}")]
fn then_order(context: &TestContext, first: String, second: String, third: String) {
    let order: Vec<String> = context
        .table
        .borrow()
        .iter()
        .map(|entry| entry.venue.clone())
        .collect();
    assert_eq!(order, [first, second, third]);
}

#[then("{venue} has weight {weight}")]
fn then_weight(context: &TestContext, venue: String, weight: u32) {
    let table = context.table.borrow();
    let found = table.iter().find(|entry| entry.venue == venue);
    assert_eq!(found.map(|entry| entry.weight), Some(weight));
}

#[then("{user} is listed with similarity {score}")]
fn then_listed(context: &TestContext, user: String, score: u32) {
    let neighbours = context.neighbours.borrow();
    let found = neighbours
        .iter()
        .find(|entry| entry.user.as_str() == user);
    assert_eq!(found.map(|entry| entry.similarity), Some(score));
}

#[then("nobody is listed")]
fn then_nobody(context: &TestContext) {
    assert!(context.neighbours.borrow().is_empty());
}

#[scenario(path = "tests/features/consensus.feature", index = 0)]
fn three_tops_agree(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/consensus.feature", index = 1)]
fn overlapping_tops_are_similar(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/consensus.feature", index = 2)]
fn absent_user_has_no_neighbours(context: TestContext) {
    let _ = context;
}
