use clap::Parser;
use projviz::cli::{self, Cli};
use projviz::error::VizError;
use std::process::ExitCode;

/// Exit status for bad input (missing root or report, path outside the project)
const USER_ERROR_EXIT: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for listings and JSON
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:?}", err);
            let user_error = err
                .downcast_ref::<VizError>()
                .is_some_and(VizError::is_user_error);
            if user_error {
                ExitCode::from(USER_ERROR_EXIT)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
