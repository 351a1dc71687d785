//! Error types emitted by the Rasa CLI.
//!
//! Keep this error type reasonably small: every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use rasa_core::SqliteStoreError;
use rasa_scorer::RecommendError;
use thiserror::Error;

/// Errors emitted by the Rasa CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The snapshot path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSnapshot {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// The snapshot path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SnapshotNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// The snapshot path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSnapshot {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite snapshot failed.
    #[error(transparent)]
    OpenSnapshot(#[from] SqliteStoreError),
    /// The recommender rejected the request or could not read the snapshot.
    #[error(transparent)]
    Recommend(#[from] RecommendError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
