//! Data directory, catalog and date shared by every command.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Local, NaiveDate};
use lunchpick_core::{Catalog, JsonFileStore, UserId, register_user};
use lunchpick_fs::open_utf8_file;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ARG_CATALOG, CliError};

/// Default catalog filename inside the data directory.
pub(crate) const CATALOG_FILE: &str = "catalog.json";

/// Resolved location of the engine state and the day to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WorkspaceConfig {
    /// Directory holding `users.json`, `swipes.json` and `tops.json`.
    pub(crate) data_dir: Utf8PathBuf,
    /// Venue catalog.
    pub(crate) catalog: Utf8PathBuf,
    /// Day every decision is recorded for.
    pub(crate) date: NaiveDate,
}

impl WorkspaceConfig {
    /// Fill in defaults: the current directory, `<data-dir>/catalog.json` and
    /// today's local date.
    pub(crate) fn resolve(
        data_dir: Option<Utf8PathBuf>,
        catalog: Option<Utf8PathBuf>,
        date: Option<NaiveDate>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        let catalog = catalog.unwrap_or_else(|| data_dir.join(CATALOG_FILE));
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        Self {
            data_dir,
            catalog,
            date,
        }
    }

    /// Store rooted at the data directory.
    pub(crate) fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.data_dir.clone())
    }

    /// Load and validate the venue catalog.
    pub(crate) fn load_catalog(&self) -> Result<Catalog, CliError> {
        require_existing(&self.catalog, ARG_CATALOG)?;
        let catalog: Catalog = load_json(&self.catalog, ARG_CATALOG)?;
        log::debug!("loaded {} venues from {}", catalog.len(), self.catalog);
        Ok(catalog)
    }
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match lunchpick_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Decode a JSON input file.
pub(crate) fn load_json<T: DeserializeOwned>(
    path: &Utf8Path,
    field: &'static str,
) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

/// Split `"First Last"` on the first whitespace run.
///
/// Everything after the first name is the last name, so `"Ana de Souza"`
/// becomes `("Ana", "de Souza")`.
pub(crate) fn split_name(raw: &str) -> (&str, &str) {
    raw.trim()
        .split_once(char::is_whitespace)
        .map_or((raw.trim(), ""), |(first, last)| (first, last.trim()))
}

/// Identifier for a `--user` value.
pub(crate) fn user_id(raw: &str) -> Result<UserId, CliError> {
    let (first, last) = split_name(raw);
    Ok(UserId::from_names(first, last)?)
}

/// Register the `--user` value on first use and return its identifier.
pub(crate) fn acting_user(store: &JsonFileStore, raw: &str) -> Result<UserId, CliError> {
    let (first, last) = split_name(raw);
    Ok(register_user(store, first, last, None)?.id)
}
