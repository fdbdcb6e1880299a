use clap::Parser;
use error_chain::ChainedError;
use sse_watch::config::{Args, Config};
use sse_watch::launcher;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = Config::from_args(&args);
    debug!(?config, "starting");

    match launcher::run(&config, tokio::io::stdout()).await {
        Ok(outcome) => {
            debug!(?outcome, "done");
            outcome.exit_code()
        }
        Err(err) => {
            eprint!("{}", err.display_chain());
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr; stdout only carries the stream.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
