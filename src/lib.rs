mod auth;
pub mod cli;
pub mod config;
mod core;
mod resolver;

#[cfg(test)]
mod tests;

pub use crate::config::{Config, RateLimitConfig};
pub use crate::core::domain::error::{ProxmoxError, ProxmoxResult, ValidationError};
pub use crate::core::domain::model::{
    network_interface::{IPV4, IPV6, IpAddress, LOOPBACK_MAC, NetworkInterface},
    node_list_item::NodeListItem,
    proxmox_connection::ProxmoxConnection,
    proxmox_session::ProxmoxSession,
    vm::VmListItem,
};
pub use crate::core::domain::value_object::{
    ProxmoxHost, ProxmoxPassword, ProxmoxPort, ProxmoxTicket, ProxmoxUrl, ProxmoxUsername,
};
pub use crate::core::infrastructure::resource_enumerator::ResourceEnumerator;
pub use crate::resolver::application::service::address_resolver::{
    AddressResolver, select_address,
};

use crate::core::infrastructure::api_client::ApiClient;
use std::time::Duration;

/// A Client for resolving Proxmox VE guest addresses
///
/// This client provides:
/// - Ticket-based authentication
/// - Node, VM and guest-agent interface listings
/// - Lookup of a VM's address by name and address family
///
/// # Examples
///
/// ```no_run
/// use pmox::{IPV4, ProxmoxClient, ProxmoxResult};
///
/// #[tokio::main]
/// async fn main() -> ProxmoxResult<()> {
///     let mut client = ProxmoxClient::builder()
///         .host("pve.example.com")
///         .port(8006)
///         .credentials("root@pam", "password")
///         .accept_invalid_certs(true)
///         .build()?;
///
///     client.login().await?;
///     println!("{}", client.find_ip_address("web-01", IPV4).await?);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ProxmoxClient {
    pub(crate) api_client: ApiClient,
}

/// Builder for ProxmoxClient configuration
#[derive(Debug)]
pub struct ProxmoxClientBuilder {
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    secure: bool,
    accept_invalid_certs: bool,
    timeout: Option<Duration>,
    rate_limit: Option<RateLimitConfig>,
}

impl Default for ProxmoxClientBuilder {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            username: None,
            password: None,
            secure: true,
            accept_invalid_certs: false,
            timeout: None,
            rate_limit: None,
        }
    }
}

impl ProxmoxClientBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the `user@realm` id and password used to obtain a ticket.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Use HTTPS (default) or plain HTTP.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Accept self-signed or otherwise unverifiable certificates for this
    /// client only.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    pub fn build(self) -> ProxmoxResult<ProxmoxClient> {
        let host = ProxmoxHost::new(self.host.ok_or_else(|| ValidationError::Field {
            field: "host".to_string(),
            message: "Host is required".to_string(),
        })?)?;

        let port = match self.port {
            Some(port) => ProxmoxPort::new(port)?,
            None => ProxmoxPort::default(),
        };

        let username = match self.username {
            Some(username) => ProxmoxUsername::new(username)?,
            None => ProxmoxUsername::default(),
        };

        let password = ProxmoxPassword::new(self.password.ok_or_else(|| {
            ValidationError::Field {
                field: "password".to_string(),
                message: "Password is required".to_string(),
            }
        })?)?;

        let mut connection = ProxmoxConnection::new(
            host,
            port,
            username,
            password,
            self.secure,
            self.accept_invalid_certs,
        )?;
        if let Some(timeout) = self.timeout {
            connection = connection.with_timeout(timeout);
        }

        Ok(ProxmoxClient {
            api_client: ApiClient::new(connection, self.rate_limit)?,
        })
    }
}

impl ProxmoxClient {
    /// Creates a new builder for ProxmoxClient configuration
    pub fn builder() -> ProxmoxClientBuilder {
        ProxmoxClientBuilder::default()
    }

    /// Creates an unauthenticated client from loaded configuration.
    pub fn from_config(config: &Config) -> ProxmoxResult<Self> {
        let connection = ProxmoxConnection::new(
            config.host.clone(),
            config.port,
            config.username.clone(),
            config.password.clone(),
            true,
            !config.verify_tls,
        )?
        .with_timeout(config.timeout);

        Ok(Self {
            api_client: ApiClient::new(connection, config.rate_limit)?,
        })
    }

    /// Authenticates with the Proxmox server
    ///
    /// The ticket obtained here is used for the rest of the client's life;
    /// it is never refreshed.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The credentials are invalid
    /// - The server is unreachable
    /// - The response format is invalid
    /// - The server returns an unexpected status code
    pub async fn login(&mut self) -> ProxmoxResult<()> {
        self.api_client.login().await
    }

    /// Returns true if the client is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.api_client.is_authenticated()
    }

    /// Returns the current session if authenticated
    pub fn session(&self) -> Option<&ProxmoxSession> {
        self.api_client.session()
    }

    /// Lists cluster nodes.
    pub async fn nodes(&self) -> ProxmoxResult<Vec<NodeListItem>> {
        self.api_client.list_nodes().await
    }

    /// Lists the QEMU guests on `node`.
    pub async fn vms(&self, node: &str) -> ProxmoxResult<Vec<VmListItem>> {
        self.api_client.list_vms(node).await
    }

    /// Lists the interfaces reported by the guest agent of VM `vmid` on `node`.
    pub async fn network_interfaces(
        &self,
        node: &str,
        vmid: u32,
    ) -> ProxmoxResult<Vec<NetworkInterface>> {
        self.api_client.list_interfaces(node, vmid).await
    }

    /// Resolves VM `name` to its first non-loopback address of `family`.
    pub async fn find_ip_address(&self, name: &str, family: &str) -> ProxmoxResult<String> {
        AddressResolver::new(&self.api_client)
            .find_ip_address(name, family)
            .await
    }

    /// Resolves VM `name`, trying each family in `families` in order.
    pub async fn find_ip_address_with_fallback(
        &self,
        name: &str,
        families: &[&str],
    ) -> ProxmoxResult<String> {
        AddressResolver::new(&self.api_client)
            .find_ip_address_with_fallback(name, families)
            .await
    }
}
