//! The `pmox` command surface.
//!
//! Parsing, configuration and resolution happen in [`run`]; the interactive
//! SSH handoff happens afterwards in [`launch_ssh`], so a session is only
//! ever opened once an address has been fully resolved.

use crate::{Config, IPV4, IPV6, ProxmoxClient, ProxmoxError, ProxmoxResult};
use clap::{ArgAction, Parser, Subcommand};
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitCode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const RESOLVE_HELP: &str = "Attempts to detect a virtual machine's local network IP.
Will not return an IP if there is no working network
device or if the Proxmox agent is unable to find one.";

/// Program used for the interactive handoff.
pub const SSH_PROGRAM: &str = "ssh";

#[derive(Debug, Parser)]
#[command(name = "pmox", version)]
#[command(about = "[pmox] is a set of utilities for interacting with Proxmox VE", long_about = None)]
pub struct Cli {
    /// Read PROXMOX_* settings from a dotenv file (environment variables win)
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch the local network IPv4 for a VM
    #[command(long_about = RESOLVE_HELP)]
    Ipv4 {
        /// VM name (exact, case-sensitive)
        #[arg(value_name = "VM_NAME")]
        name: String,
    },
    /// Fetch the local network IPv6 for a VM
    #[command(long_about = RESOLVE_HELP)]
    Ipv6 {
        /// VM name (exact, case-sensitive)
        #[arg(value_name = "VM_NAME")]
        name: String,
    },
    /// Opens a secure shell to a VM
    Ssh {
        /// Connection string, e.g. admin@web-01
        #[arg(value_name = "USER@VM_NAME")]
        target: String,
    },
}

/// `user@vm` split at the first `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    pub user: String,
    pub vm: String,
}

impl ConnectionString {
    pub fn parse(raw: &str) -> ProxmoxResult<Self> {
        match raw.split_once('@') {
            Some((user, vm)) if !user.is_empty() && !vm.is_empty() => Ok(Self {
                user: user.to_string(),
                vm: vm.to_string(),
            }),
            _ => Err(ProxmoxError::Usage(
                "Connection string must be in the format [user]@[vm name].".to_string(),
            )),
        }
    }
}

/// A validated request, ready to hit the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Lookup { name: String, family: &'static str },
    Ssh(ConnectionString),
}

impl TryFrom<Commands> for Action {
    type Error = ProxmoxError;

    fn try_from(command: Commands) -> ProxmoxResult<Self> {
        Ok(match command {
            Commands::Ipv4 { name } => Action::Lookup { name, family: IPV4 },
            Commands::Ipv6 { name } => Action::Lookup { name, family: IPV6 },
            Commands::Ssh { target } => Action::Ssh(ConnectionString::parse(&target)?),
        })
    }
}

/// What is left to do once resolution succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the address on stdout.
    Print(String),
    /// Hand the terminal over to `ssh user@address`.
    Shell { user: String, address: String },
}

/// Validates arguments, loads configuration, logs in and resolves.
///
/// Usage errors are reported before configuration is read or any request
/// is made.
pub async fn run(cli: Cli) -> ProxmoxResult<Outcome> {
    let action = Action::try_from(cli.command)?;
    let config = Config::load(cli.env_file.as_deref())?;
    debug!(host = config.host.as_str(), port = config.port.get(), "Loaded configuration");

    let mut client = ProxmoxClient::from_config(&config)?;
    client.login().await?;
    execute(&client, action).await
}

/// Runs an already-validated action against an authenticated client.
pub async fn execute(client: &ProxmoxClient, action: Action) -> ProxmoxResult<Outcome> {
    match action {
        Action::Lookup { name, family } => {
            let address = client.find_ip_address(&name, family).await?;
            Ok(Outcome::Print(address))
        }
        Action::Ssh(target) => {
            let address = client
                .find_ip_address_with_fallback(&target.vm, &[IPV4, IPV6])
                .await?;
            Ok(Outcome::Shell {
                user: target.user,
                address,
            })
        }
    }
}

/// Races `work` against `interrupt` (normally `tokio::signal::ctrl_c()`).
///
/// Only a delivered signal cancels the work. If the signal handler cannot
/// be installed, `work` simply runs to completion.
pub async fn until_interrupted<T>(
    work: impl Future<Output = ProxmoxResult<T>>,
    interrupt: impl Future<Output = io::Result<()>>,
) -> ProxmoxResult<T> {
    tokio::select! {
        result = work => result,
        Ok(()) = interrupt => Err(ProxmoxError::Interrupted),
    }
}

/// Log filter for a given `-v` count: nothing but pmox's own events, at
/// warn, info or debug.
pub fn log_filter(verbose: u8) -> ProxmoxResult<EnvFilter> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let directive = format!("pmox={}", level)
        .parse()
        .map_err(|e| ProxmoxError::Config(format!("Invalid log directive: {}", e)))?;
    Ok(EnvFilter::new("off").add_directive(directive))
}

/// Runs `ssh user@address` on the inherited terminal and waits for it.
///
/// Returns ssh's own exit code; a signal-terminated ssh maps to 1.
pub fn launch_ssh(user: &str, address: &str) -> ProxmoxResult<ExitCode> {
    let destination = format!("{}@{}", user, address);
    debug!(program = SSH_PROGRAM, %destination, "Handing off to ssh");

    let status = Command::new(SSH_PROGRAM)
        .arg(&destination)
        .status()
        .map_err(|e| ProxmoxError::Shell {
            program: SSH_PROGRAM.to_string(),
            message: e.to_string(),
        })?;

    Ok(match status.code() {
        Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        None => ExitCode::FAILURE,
    })
}

/// Prints a fatal error the way every pmox failure is reported.
pub fn report(error: &ProxmoxError) {
    eprintln!("[error] {}", error);
}
