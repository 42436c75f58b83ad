//! Environment-sourced configuration.
//!
//! Values come from the process environment first and, when an env file is
//! given, from that file second.

use crate::{
    ProxmoxError, ProxmoxHost, ProxmoxPassword, ProxmoxPort, ProxmoxResult, ProxmoxUsername,
    core::domain::model::proxmox_connection::DEFAULT_TIMEOUT,
};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

pub const ENV_HOST: &str = "PROXMOX_HOST";
pub const ENV_PORT: &str = "PROXMOX_PORT";
pub const ENV_USER: &str = "PROXMOX_USER";
pub const ENV_PASS: &str = "PROXMOX_PASS";
pub const ENV_VERIFY_TLS: &str = "PROXMOX_VERIFY_TLS";
pub const ENV_TIMEOUT: &str = "PROXMOX_TIMEOUT";
pub const ENV_RATE_LIMIT: &str = "PROXMOX_RATE_LIMIT";

/// Client-side throttling of API requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests_per_second: NonZeroU32,
    pub burst_size: NonZeroU32,
}

/// Settings for one pmox invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: ProxmoxHost,
    pub port: ProxmoxPort,
    pub username: ProxmoxUsername,
    pub password: ProxmoxPassword,
    /// Verify the server's TLS certificate. Off by default because PVE hosts
    /// usually serve a self-signed certificate.
    pub verify_tls: bool,
    pub timeout: Duration,
    pub rate_limit: Option<RateLimitConfig>,
}

impl Config {
    /// Loads from the process environment, layered over `env_file` if given.
    pub fn load(env_file: Option<&Path>) -> ProxmoxResult<Self> {
        match env_file {
            Some(path) => Self::from_env_file(path),
            None => Self::from_env(),
        }
    }

    /// Loads from the process environment only.
    pub fn from_env() -> ProxmoxResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads from a dotenv file; process environment variables take
    /// precedence over the file's entries.
    pub fn from_env_file(path: &Path) -> ProxmoxResult<Self> {
        let file_values = read_env_file(path)?;
        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_values.get(key).cloned())
        })
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> ProxmoxResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(ENV_HOST).ok_or_else(|| {
            ProxmoxError::Config(format!("ensure {} environment variable is set", ENV_HOST))
        })?;
        let host = ProxmoxHost::new(host).map_err(|e| invalid(ENV_HOST, e))?;

        let port = match lookup(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .ok()
                .and_then(|port| ProxmoxPort::new(port).ok())
                .ok_or_else(|| {
                    ProxmoxError::Config(format!("ensure {} is a valid port number", ENV_PORT))
                })?,
            None => ProxmoxPort::default(),
        };

        let username = match lookup(ENV_USER) {
            Some(raw) => ProxmoxUsername::new(raw).map_err(|e| invalid(ENV_USER, e))?,
            None => ProxmoxUsername::default(),
        };

        let password = lookup(ENV_PASS).ok_or_else(|| {
            ProxmoxError::Config(format!("ensure {} environment variable is set", ENV_PASS))
        })?;
        let password = ProxmoxPassword::new(password).map_err(|e| invalid(ENV_PASS, e))?;

        let verify_tls = match lookup(ENV_VERIFY_TLS) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ProxmoxError::Config(format!(
                    "ensure {} is one of true/false, yes/no, on/off, 1/0",
                    ENV_VERIFY_TLS
                ))
            })?,
            None => false,
        };

        let timeout = match lookup(ENV_TIMEOUT) {
            Some(raw) => Duration::from_secs(u64::from(positive(ENV_TIMEOUT, &raw)?.get())),
            None => DEFAULT_TIMEOUT,
        };

        let rate_limit = match lookup(ENV_RATE_LIMIT) {
            Some(raw) => {
                let rate = positive(ENV_RATE_LIMIT, &raw)?;
                Some(RateLimitConfig {
                    requests_per_second: rate,
                    burst_size: rate,
                })
            }
            None => None,
        };

        Ok(Self {
            host,
            port,
            username,
            password,
            verify_tls,
            timeout,
            rate_limit,
        })
    }
}

fn read_env_file(path: &Path) -> ProxmoxResult<HashMap<String, String>> {
    let unreadable =
        |e: dotenvy::Error| ProxmoxError::Config(format!("cannot read {}: {}", path.display(), e));

    dotenvy::from_path_iter(path)
        .map_err(unreadable)?
        .map(|entry| entry.map_err(unreadable))
        .collect()
}

fn invalid(key: &str, error: ProxmoxError) -> ProxmoxError {
    ProxmoxError::Config(format!("{} is invalid: {}", key, error))
}

fn positive(key: &str, raw: &str) -> ProxmoxResult<NonZeroU32> {
    raw.trim()
        .parse::<NonZeroU32>()
        .map_err(|_| ProxmoxError::Config(format!("ensure {} is a positive integer", key)))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
