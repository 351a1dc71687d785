//! `history` command: what a user recently viewed and searched for.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rasa_core::{UserId, Viewer};
use rasa_scorer::{
    DEFAULT_RECENTLY_VIEWED_LIMIT, DEFAULT_SEARCH_HISTORY_LIMIT, Recommender, RecommenderConfig,
};
use serde::{Deserialize, Serialize};

use crate::snapshot::{open_snapshot, write_json};
use crate::{
    ARG_DATABASE, ARG_LIMIT, ARG_SEARCH_LIMIT, ARG_USER, CliError, ENV_HISTORY_DATABASE,
    ENV_HISTORY_USER,
};

/// CLI arguments for the `history` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Print a user's recently viewed restaurants and recent \
                 searches. Snapshots without an activity table yield an \
                 empty history.",
    about = "Show a user's recent views and searches"
)]
#[ortho_config(prefix = "RASA")]
pub(crate) struct HistoryArgs {
    /// Path to the SQLite snapshot.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// User whose history is printed.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<UserId>,
    /// Maximum number of recently viewed restaurants.
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Maximum number of recent searches.
    #[arg(long = ARG_SEARCH_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) search_limit: Option<usize>,
}

/// Resolved `history` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HistoryConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) user: UserId,
    pub(crate) limit: usize,
    pub(crate) search_limit: usize,
}

impl TryFrom<HistoryArgs> for HistoryConfig {
    type Error = CliError;

    fn try_from(args: HistoryArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_HISTORY_DATABASE,
        })?;
        let user = args.user.ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_HISTORY_USER,
        })?;
        Ok(Self {
            database,
            user,
            limit: args.limit.unwrap_or(DEFAULT_RECENTLY_VIEWED_LIMIT),
            search_limit: args.search_limit.unwrap_or(DEFAULT_SEARCH_HISTORY_LIMIT),
        })
    }
}

pub(crate) fn run_history_with(args: HistoryArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = HistoryConfig::try_from(merged)?;
    let store = open_snapshot(&config.database)?;
    if store.activity_log().is_none() {
        log::info!("snapshot has no activity log; history is empty");
    }
    let recommender = Recommender::new(&store, RecommenderConfig::default())?
        .with_activity_log(store.activity_log());
    let history = recommender.history(
        Viewer::User(config.user),
        config.limit,
        config.search_limit,
    )?;
    write_json(writer, &history)
}
