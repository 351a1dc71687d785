//! Command-line interface for the Rasa recommendation engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::io::Write;

mod error;
mod history;
mod recommend;
mod snapshot;
mod top_rated;

pub use error::CliError;

use history::{HistoryArgs, run_history_with};
use recommend::{RecommendArgs, run_recommend_with};
use top_rated::{TopRatedArgs, run_top_rated_with};

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_USER: &str = "user";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_SEARCH_LIMIT: &str = "search-limit";
pub(crate) const ENV_RECOMMEND_DATABASE: &str = "RASA_CMDS_RECOMMEND_DATABASE";
pub(crate) const ENV_TOP_RATED_DATABASE: &str = "RASA_CMDS_TOP_RATED_DATABASE";
pub(crate) const ENV_HISTORY_DATABASE: &str = "RASA_CMDS_HISTORY_DATABASE";
pub(crate) const ENV_HISTORY_USER: &str = "RASA_CMDS_HISTORY_USER";

/// Run the Rasa CLI with the current process arguments and environment.
///
/// Command output is written to standard output.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_with(cli.command, &mut stdout)
}

fn run_with(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Recommend(args) => run_recommend_with(args, writer),
        Command::TopRated(args) => run_top_rated_with(args, writer),
        Command::History(args) => run_history_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "rasa",
    about = "Restaurant recommendations from a Rasa SQLite snapshot",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank restaurants for a user or an anonymous viewer.
    Recommend(RecommendArgs),
    /// List the best-rated restaurants.
    TopRated(TopRatedArgs),
    /// Show a user's recent views and searches.
    History(HistoryArgs),
}

#[cfg(test)]
mod tests;
