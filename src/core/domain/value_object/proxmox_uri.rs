use crate::core::domain::{
    error::{ProxmoxResult, ValidationError},
    value_object::{proxmox_host::ProxmoxHost, proxmox_port::ProxmoxPort},
};
use url::Url;

/// Prefix shared by every JSON API endpoint.
pub const API_PREFIX: &str = "api2/json";

/// The validated base URL of a Proxmox VE server, e.g. `https://pve:8006/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxUrl(Url);

impl ProxmoxUrl {
    /// Composes the base URL from host, port and scheme choice.
    pub fn new(host: &ProxmoxHost, port: &ProxmoxPort, secure: bool) -> ProxmoxResult<Self> {
        let scheme = if secure { "https" } else { "http" };
        let raw = format!("{}://{}:{}/", scheme, host.as_authority(), port.get());
        Ok(Self(validate_url(&raw)?))
    }

    /// Wraps an already-formed base URL, e.g. a mock server address.
    #[cfg(test)]
    pub(crate) fn new_unchecked(raw: &str) -> Self {
        Self(Url::parse(raw).expect("test URL must parse"))
    }

    /// Returns the base URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the full URL of an API endpoint, e.g. `nodes/pve1/qemu`.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.0.as_str().trim_end_matches('/'),
            API_PREFIX,
            path.trim_start_matches('/')
        )
    }
}

/// Validates and parses a base URL.
pub(crate) fn validate_url(raw: &str) -> Result<Url, ValidationError> {
    let url =
        Url::parse(raw).map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;
    match url.scheme() {
        "https" | "http" => {}
        other => {
            return Err(ValidationError::ConstraintViolation(format!(
                "Invalid scheme '{}'. Must be one of: https, http",
                other
            )));
        }
    }
    if url.host_str().is_none() {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL must contain a host".to_string(),
        });
    }
    Ok(url)
}
