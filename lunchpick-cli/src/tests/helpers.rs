//! Temporary data directories seeded with a catalog and preference files.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use lunchpick_core::store::modify_users;
use lunchpick_core::test_support::fixtures::lunch_catalog;
use lunchpick_core::{JsonFileStore, Role, UserId};
use serde_json::Value;
use tempfile::TempDir;

use super::*;

pub(super) const LUNCH_DAY: &str = "2024-05-06";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

#[derive(Debug)]
pub(super) struct DataDir {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl DataDir {
    /// A data directory holding `catalog.json` with the sample lunch catalog.
    pub(super) fn seeded() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let catalog = serde_json::to_vec_pretty(&lunch_catalog()).expect("serialise catalog");
        write_utf8(&root.join("catalog.json"), &catalog);
        Self { _tmp: tmp, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.root.clone())
    }

    /// Write a preference file and return its path.
    pub(super) fn preferences(&self, name: &str, body: &str) -> Utf8PathBuf {
        let path = self.root.join(name);
        write_utf8(&path, body.as_bytes());
        path
    }

    /// Grant the admin role to an already registered user.
    pub(super) fn promote(&self, id: &str) {
        let id = UserId::new(id);
        modify_users(&self.store(), |users| {
            let mut user = users.get(&id).cloned().expect("user registered");
            user.role = Role::Admin;
            users.insert(user);
        })
        .expect("promote user");
    }

    /// Common `--data-dir` and `--date` flags.
    pub(super) fn flags(&self) -> Vec<String> {
        vec![
            format!("--{ARG_DATA_DIR}"),
            self.root.as_str().to_owned(),
            format!("--{ARG_DATE}"),
            LUNCH_DAY.to_owned(),
        ]
    }
}

/// Parse `lunchpick <argv...>` and run the chosen command into a buffer.
pub(super) fn run_captured(argv: &[String]) -> (Result<(), CliError>, Value) {
    let mut invocation = vec!["lunchpick".to_owned()];
    invocation.extend(argv.iter().cloned());
    let mut buffer = Vec::new();
    let outcome = Cli::try_parse_from(invocation)
        .map_err(CliError::from)
        .and_then(|cli| dispatch_with(cli.command, &mut buffer));
    let output = if buffer.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&buffer).expect("output should be JSON")
    };
    (outcome, output)
}

fn dispatch_with(command: Command, writer: &mut Vec<u8>) -> Result<(), CliError> {
    match command {
        Command::Rank(args) => crate::rank::run_rank_with(args, writer),
        Command::Top(args) => crate::rank::run_top_with(args, writer),
        Command::Swipe(args) => crate::swipe::run_swipe_with(args, writer),
        Command::Report(args) => crate::report::run_report_with(args, writer),
        Command::Forget(args) => crate::admin::run_forget_with(args, writer),
        Command::Admin(args) => crate::admin::run_admin_with(args, writer),
    }
}
