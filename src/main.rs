use clap::Parser;
use pmox::{
    ProxmoxResult,
    cli::{self, Cli, Outcome},
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_tracing(cli.verbose) {
        cli::report(&e);
        return ExitCode::FAILURE;
    }

    let outcome = cli::until_interrupted(cli::run(cli), tokio::signal::ctrl_c()).await;

    let result = match outcome {
        Ok(Outcome::Print(address)) => {
            println!("{}", address);
            Ok(ExitCode::SUCCESS)
        }
        Ok(Outcome::Shell { user, address }) => cli::launch_ssh(&user, &address),
        Err(e) => Err(e),
    };

    result.unwrap_or_else(|e| {
        cli::report(&e);
        ExitCode::FAILURE
    })
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) -> ProxmoxResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => cli::log_filter(verbose)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}
