//! Snapshot path checks and JSON output shared by every command.

use std::io::Write;

use camino::Utf8Path;
use rasa_core::SqliteRestaurantStore;
use rasa_fs::PathKind;
use serde::Serialize;

use crate::{ARG_DATABASE, CliError};

/// Reject snapshot paths that are missing or not regular files.
pub(crate) fn require_snapshot(path: &Utf8Path) -> Result<(), CliError> {
    match rasa_fs::classify(path) {
        Ok(PathKind::File) => Ok(()),
        Ok(PathKind::NotFile) => Err(CliError::SnapshotNotFile {
            field: ARG_DATABASE,
            path: path.to_path_buf(),
        }),
        Ok(PathKind::Missing) => Err(CliError::MissingSnapshot {
            field: ARG_DATABASE,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSnapshot {
            field: ARG_DATABASE,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Check and open the snapshot at `path`.
pub(crate) fn open_snapshot(path: &Utf8Path) -> Result<SqliteRestaurantStore, CliError> {
    require_snapshot(path)?;
    let store = SqliteRestaurantStore::open(path)?;
    log::debug!("opened snapshot {path}");
    Ok(store)
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
