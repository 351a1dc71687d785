//! `top-rated` command: restaurants with the best average rating.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rasa_scorer::{DEFAULT_TOP_RATED_LIMIT, Recommender, RecommenderConfig};
use serde::{Deserialize, Serialize};

use crate::snapshot::{open_snapshot, write_json};
use crate::{ARG_DATABASE, ARG_LIMIT, CliError, ENV_TOP_RATED_DATABASE};

/// CLI arguments for the `top-rated` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "List restaurants with at least one rating, best first")]
#[ortho_config(prefix = "RASA")]
pub(crate) struct TopRatedArgs {
    /// Path to the SQLite snapshot.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Maximum number of restaurants to print.
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

/// Resolved `top-rated` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TopRatedConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) limit: usize,
}

impl TryFrom<TopRatedArgs> for TopRatedConfig {
    type Error = CliError;

    fn try_from(args: TopRatedArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_TOP_RATED_DATABASE,
        })?;
        Ok(Self {
            database,
            limit: args.limit.unwrap_or(DEFAULT_TOP_RATED_LIMIT),
        })
    }
}

pub(crate) fn run_top_rated_with(
    args: TopRatedArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = TopRatedConfig::try_from(merged)?;
    let store = open_snapshot(&config.database)?;
    let recommender = Recommender::new(&store, RecommenderConfig::default())?;
    let restaurants = recommender.top_rated(config.limit)?;
    write_json(writer, &restaurants)
}
