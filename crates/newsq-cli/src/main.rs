use newsq_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Log to the state file when possible, else warnings to stderr.
    if let Err(e) = logging::init_logging() {
        match logging::init_logging_stderr() {
            Ok(()) => tracing::warn!("file logging unavailable: {:#}", e),
            Err(stderr_err) => eprintln!("newsq: logging disabled: {e:#}; {stderr_err:#}"),
        }
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("newsq error: {:#}", err);
        std::process::exit(1);
    }
}
