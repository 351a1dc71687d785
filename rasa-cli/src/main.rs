//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use rasa_cli::CliError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match rasa_cli::run() {
        Ok(()) => {}
        // Help and version requests exit through clap with its own status.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("rasa: {err}");
            std::process::exit(1);
        }
    }
}
