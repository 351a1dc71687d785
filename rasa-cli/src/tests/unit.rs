//! Focused unit tests covering CLI configuration and snapshot checks.

use super::helpers::{SnapshotFiles, output_text};
use super::*;
use camino::Utf8PathBuf;
use crate::history::{HistoryArgs, HistoryConfig};
use crate::recommend::{self, RecommendArgs, RecommendConfig, config_from_layers_for_test};
use crate::snapshot;
use crate::top_rated::{TopRatedArgs, TopRatedConfig};
use ortho_config::MergeComposer;
use rasa_core::Viewer;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn converting_recommend_without_database_errors() {
    let err = RecommendConfig::try_from(RecommendArgs::default())
        .expect_err("missing database should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_DATABASE);
            assert_eq!(env, ENV_RECOMMEND_DATABASE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn recommend_defaults_to_anonymous_and_ten_results() {
    let args = RecommendArgs {
        database: Some(Utf8PathBuf::from("rasa.db")),
        ..RecommendArgs::default()
    };
    let config = RecommendConfig::try_from(args).expect("config should build");
    assert_eq!(config.viewer, Viewer::Anonymous);
    assert_eq!(config.limit, rasa_scorer::DEFAULT_RECOMMENDATION_LIMIT);
}

#[rstest]
#[case(None, Some(7), ARG_DATABASE, ENV_HISTORY_DATABASE)]
#[case(Some(Utf8PathBuf::from("rasa.db")), None, ARG_USER, ENV_HISTORY_USER)]
fn converting_history_without_required_fields_errors(
    #[case] database: Option<Utf8PathBuf>,
    #[case] user: Option<u64>,
    #[case] expected_field: &'static str,
    #[case] expected_env: &'static str,
) {
    let args = HistoryArgs {
        database,
        user,
        ..HistoryArgs::default()
    };
    match HistoryConfig::try_from(args).expect_err("missing field should error") {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn top_rated_defaults_to_twenty_results() {
    let args = TopRatedArgs {
        database: Some(Utf8PathBuf::from("rasa.db")),
        limit: None,
    };
    let config = TopRatedConfig::try_from(args).expect("config should build");
    assert_eq!(config.limit, rasa_scorer::DEFAULT_TOP_RATED_LIMIT);
}

#[rstest]
fn require_snapshot_reports_missing_files() {
    let files = SnapshotFiles::new(false);
    let missing = files.root().join("absent.db");
    match snapshot::require_snapshot(&missing).expect_err("missing snapshot") {
        CliError::MissingSnapshot { field, path } => {
            assert_eq!(field, ARG_DATABASE);
            assert_eq!(path, missing);
        }
        other => panic!("expected MissingSnapshot, found {other:?}"),
    }
}

#[rstest]
fn require_snapshot_accepts_files() {
    let files = SnapshotFiles::new(false);
    snapshot::require_snapshot(files.database()).expect("snapshot should be accepted");
}

#[rstest]
fn open_snapshot_reports_corrupt_databases() {
    let files = SnapshotFiles::new(false);
    let corrupt = files.root().join("corrupt.db");
    std::fs::write(&corrupt, b"not a database").expect("write corrupt file");
    match snapshot::open_snapshot(&corrupt).expect_err("corrupt snapshot") {
        CliError::OpenSnapshot(_) => {}
        other => panic!("expected OpenSnapshot, found {other:?}"),
    }
}

#[rstest]
fn zero_limit_is_reported_by_the_recommender() {
    let files = SnapshotFiles::new(false);
    let config = RecommendConfig {
        database: files.database().to_path_buf(),
        viewer: Viewer::Anonymous,
        limit: 0,
    };
    let mut buffer = Vec::new();
    match recommend::execute(&config, &mut buffer).expect_err("zero limit") {
        CliError::Recommend(rasa_scorer::RecommendError::InvalidLimit { field }) => {
            assert_eq!(field, "limit");
        }
        other => panic!("expected InvalidLimit, found {other:?}"),
    }
    assert!(buffer.is_empty());
}

#[rstest]
fn recommend_output_is_pretty_json_with_trailing_newline() {
    let files = SnapshotFiles::new(true);
    let config = RecommendConfig {
        database: files.database().to_path_buf(),
        viewer: Viewer::User(7),
        limit: 1,
    };
    let mut buffer = Vec::new();
    recommend::execute(&config, &mut buffer).expect("recommend should succeed");
    let text = output_text(&buffer);
    assert!(text.ends_with("}\n"));
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
    assert_eq!(value["source"], "personalised");
    assert_eq!(value["restaurants"][0]["id"], 2);
    assert_eq!(value["restaurants"][0]["name"], "Bakso Malang");
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "user": "seven" }));

    match config_from_layers_for_test(composer.layers()).expect_err("invalid layer") {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({ "database": "from-file.db", "user": 1, "limit": 3 }),
        None,
    );
    composer.push_environment(json!({ "user": 2 }));
    composer.push_cli(json!({ "limit": 5 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.database, Utf8PathBuf::from("from-file.db"));
    assert_eq!(config.viewer, Viewer::User(2));
    assert_eq!(config.limit, 5);
}
