//! `recommend` command: ranked restaurants for one viewer.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rasa_core::{UserId, Viewer};
use rasa_scorer::{DEFAULT_RECOMMENDATION_LIMIT, Recommender, RecommenderConfig};
use serde::{Deserialize, Serialize};

use crate::snapshot::{open_snapshot, write_json};
use crate::{ARG_DATABASE, ARG_LIMIT, ARG_USER, CliError, ENV_RECOMMEND_DATABASE};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank restaurants for a viewer from a SQLite snapshot. \
                 Without --user the global popularity ranking is printed.",
    about = "Recommend restaurants for a user or an anonymous viewer"
)]
#[ortho_config(prefix = "RASA")]
pub(crate) struct RecommendArgs {
    /// Path to the SQLite snapshot.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// User to personalise for; omit for an anonymous viewer.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<UserId>,
    /// Maximum number of restaurants to print.
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl RecommendArgs {
    fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) viewer: Viewer,
    pub(crate) limit: usize,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_RECOMMEND_DATABASE,
        })?;
        Ok(Self {
            database,
            viewer: Viewer::from(args.user),
            limit: args.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT),
        })
    }
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    execute(&args.into_config()?, writer)
}

pub(crate) fn execute(config: &RecommendConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let store = open_snapshot(&config.database)?;
    let engine_config = RecommenderConfig {
        limit: config.limit,
        ..RecommenderConfig::default()
    };
    let recommender =
        Recommender::new(&store, engine_config)?.with_activity_log(store.activity_log());
    let recommendations = recommender.recommend(config.viewer)?;
    log::info!(
        "served {} {} recommendations",
        recommendations.len(),
        recommendations.source
    );
    write_json(writer, &recommendations)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
