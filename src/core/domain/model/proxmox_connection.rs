use crate::core::domain::{
    error::ProxmoxResult,
    value_object::{ProxmoxHost, ProxmoxPassword, ProxmoxPort, ProxmoxUrl, ProxmoxUsername},
};
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to reach and log into one Proxmox VE server.
///
/// The TLS policy lives here rather than in any process-wide setting: only
/// the HTTP client built from this connection skips certificate checks.
#[derive(Debug, Clone)]
pub struct ProxmoxConnection {
    proxmox_host: ProxmoxHost,
    proxmox_port: ProxmoxPort,
    proxmox_username: ProxmoxUsername,
    proxmox_password: ProxmoxPassword,
    accept_invalid_certs: bool,
    timeout: Duration,
    proxmox_url: ProxmoxUrl,
}

impl ProxmoxConnection {
    pub fn new(
        proxmox_host: ProxmoxHost,
        proxmox_port: ProxmoxPort,
        proxmox_username: ProxmoxUsername,
        proxmox_password: ProxmoxPassword,
        secure: bool,
        accept_invalid_certs: bool,
    ) -> ProxmoxResult<Self> {
        let proxmox_url = ProxmoxUrl::new(&proxmox_host, &proxmox_port, secure)?;
        Ok(Self {
            proxmox_host,
            proxmox_port,
            proxmox_username,
            proxmox_password,
            accept_invalid_certs,
            timeout: DEFAULT_TIMEOUT,
            proxmox_url,
        })
    }

    /// Builds a connection against an explicit base URL (mock servers).
    #[cfg(test)]
    pub(crate) fn with_url(
        proxmox_url: ProxmoxUrl,
        proxmox_username: ProxmoxUsername,
        proxmox_password: ProxmoxPassword,
    ) -> Self {
        Self {
            proxmox_host: ProxmoxHost::new_unchecked("localhost".to_string()),
            proxmox_port: ProxmoxPort::default(),
            proxmox_username,
            proxmox_password,
            accept_invalid_certs: false,
            timeout: DEFAULT_TIMEOUT,
            proxmox_url,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn proxmox_host(&self) -> &ProxmoxHost {
        &self.proxmox_host
    }

    pub fn proxmox_port(&self) -> &ProxmoxPort {
        &self.proxmox_port
    }

    pub fn proxmox_username(&self) -> &ProxmoxUsername {
        &self.proxmox_username
    }

    pub fn proxmox_password(&self) -> &ProxmoxPassword {
        &self.proxmox_password
    }

    pub fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn proxmox_url(&self) -> &ProxmoxUrl {
        &self.proxmox_url
    }
}
