//! End-to-end command runs against a temporary data directory.

use super::helpers::{DataDir, run_captured};
use super::*;
use lunchpick_core::EngineStore;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn data() -> DataDir {
    DataDir::seeded()
}

fn argv(data: &DataDir, command: &str, extra: &[&str]) -> Vec<String> {
    let mut args = vec![command.to_owned()];
    args.extend(extra.iter().map(|arg| (*arg).to_owned()));
    args.extend(data.flags());
    args
}

fn succeed(data: &DataDir, command: &str, extra: &[&str]) -> Value {
    let (outcome, output) = run_captured(&argv(data, command, extra));
    outcome.unwrap_or_else(|err| panic!("{command} failed: {err}"));
    output
}

fn swipe(data: &DataDir, user: &str, action: &str) -> Value {
    succeed(data, "swipe", &["--user", user, "--action", action])
}

fn venue_names(value: &Value) -> Vec<&str> {
    value
        .as_array()
        .expect("array of venues")
        .iter()
        .filter_map(|entry| entry["venue"]["name"].as_str())
        .collect()
}

#[rstest]
fn rank_prints_ordered_venues(data: DataDir) {
    let prefs = data.preferences("prefs.json", r#"{"importance": {"indulgence": 10}}"#);
    let output = succeed(&data, "rank", &[prefs.as_str(), "--limit", "2"]);
    assert_eq!(output["mode"], "directional");
    assert_eq!(output["computation"], "weighted");
    assert_eq!(venue_names(&output["venues"]), ["Burger Joint", "Bagel Corner"]);
    assert!(output.get("incomplete").is_none());
}

#[rstest]
fn rank_reports_missing_catalog(data: DataDir) {
    let prefs = data.preferences("prefs.json", "{}");
    let missing = data.root().join("nowhere.json");
    let (outcome, _) = run_captured(&argv(
        &data,
        "rank",
        &[prefs.as_str(), "--catalog", missing.as_str()],
    ));
    match outcome {
        Err(CliError::MissingSourceFile { field, path }) => {
            assert_eq!(field, ARG_CATALOG);
            assert_eq!(path, missing);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn rank_reports_invalid_preferences(data: DataDir) {
    let prefs = data.preferences("prefs.json", r#"{"importance": {"price": 11}}"#);
    let (outcome, _) = run_captured(&argv(&data, "rank", &[prefs.as_str()]));
    match outcome {
        Err(CliError::ParseInput { field, .. }) => assert_eq!(field, ARG_PREFERENCES),
        other => panic!("expected ParseInput, found {other:?}"),
    }
}

#[rstest]
fn top_registers_user_and_stores_picks(data: DataDir) {
    let prefs = data.preferences("prefs.json", r#"{"importance": {"indulgence": 10}}"#);
    let output = succeed(&data, "top", &[prefs.as_str(), "--user", "Ada Lovelace"]);
    let picks: Vec<&str> = output["picks"]
        .as_array()
        .expect("picks")
        .iter()
        .filter_map(|pick| pick["venue"].as_str())
        .collect();
    assert_eq!(picks, ["Burger Joint", "Bagel Corner", "Soup Bar"]);

    let store = data.store();
    let users = store.load_users().expect("users");
    assert_eq!(users.len(), 1);
    assert_eq!(store.load_tops().expect("tops").len(), 1);
}

#[rstest]
fn swipes_match_and_continue(data: DataDir) {
    let first = swipe(&data, "Ulla Berg", "show");
    assert!(first.get("outcome").is_none());
    assert_eq!(first["next"], "Soup Bar");

    let liked = swipe(&data, "Ulla Berg", "like");
    assert_eq!(liked["outcome"]["outcome"], "recorded");
    assert_eq!(liked["next"], "Salad Lab");

    let matched = swipe(&data, "Ugo Ruiz", "like");
    assert_eq!(matched["outcome"]["outcome"], "matched");
    assert_eq!(
        matched["outcome"]["detail"]["matched_users"],
        json!(["Ulla Berg"])
    );
    assert_eq!(matched["next"], "Salad Lab");

    let undone = swipe(&data, "Ugo Ruiz", "undo");
    assert_eq!(undone["outcome"]["detail"]["venue"], "Soup Bar");
    assert_eq!(undone["next"], "Soup Bar");
}

#[rstest]
fn reports_cover_matches_and_consensus(data: DataDir) {
    swipe(&data, "Ulla Berg", "like");
    swipe(&data, "Ugo Ruiz", "like");

    let matches = succeed(&data, "report", &["--kind", "matches", "--user", "Ulla Berg"]);
    assert_eq!(
        matches["venues"],
        json!([{ "venue": "Soup Bar", "with": ["Ugo Ruiz"] }])
    );

    let likes = succeed(&data, "report", &["--kind", "likes"]);
    assert_eq!(
        likes,
        json!([{ "venue": "Soup Bar", "weight": 2, "voters": 2 }])
    );
}

#[rstest]
fn admin_actions_require_the_admin_role(data: DataDir) {
    swipe(&data, "Ulla Berg", "like");
    swipe(&data, "Ugo Ruiz", "like");
    swipe(&data, "Root Admin", "show");

    let (denied, _) = run_captured(&argv(
        &data,
        "admin",
        &["--user", "Root Admin", "--action", "stats"],
    ));
    assert!(
        matches!(denied, Err(CliError::Consensus(_))),
        "found {denied:?}"
    );

    data.promote("Root Admin");
    let stats = succeed(&data, "admin", &["--user", "Root Admin", "--action", "stats"]);
    assert_eq!(stats["registered_users"], 3);
    assert_eq!(stats["swipes_on_day"], 2);
    assert_eq!(stats["active_users"], 2);

    let cleared = succeed(
        &data,
        "admin",
        &["--user", "Root Admin", "--action", "clear-day"],
    );
    assert_eq!(cleared, json!({ "removed": 2 }));
}

#[rstest]
fn forget_removes_user_and_history(data: DataDir) {
    swipe(&data, "Ulla Berg", "like");
    let (outcome, report) = run_captured(&[
        "forget".to_owned(),
        "--user".to_owned(),
        "Ulla Berg".to_owned(),
        format!("--{ARG_DATA_DIR}"),
        data.root().as_str().to_owned(),
    ]);
    outcome.expect("forget succeeds");
    assert_eq!(report["swipes_removed"], 1);
    assert!(data.store().load_users().expect("users").is_empty());
}
