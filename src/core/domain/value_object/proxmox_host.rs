use crate::core::domain::error::{ProxmoxResult, ValidationError};
use std::net::{IpAddr, Ipv6Addr};

const MAX_HOSTNAME_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

/// A validated Proxmox host address.
///
/// Accepts RFC 1035 host names (plus underscores) as well as IPv4 and IPv6
/// literals. IPv6 literals may be given with or without surrounding brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxHost(String);

impl ProxmoxHost {
    /// Creates a new host after validating it.
    pub fn new(host: impl Into<String>) -> ProxmoxResult<Self> {
        let host = host.into();
        validate_host(&host)?;
        Ok(Self(host))
    }

    /// Creates a new host without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(host: String) -> Self {
        Self(host)
    }

    /// Returns the host as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the host formatted for use inside a URL authority.
    ///
    /// IPv6 literals are wrapped in brackets.
    #[must_use]
    pub fn as_authority(&self) -> String {
        match self.0.parse::<Ipv6Addr>() {
            Ok(_) => format!("[{}]", self.0),
            Err(_) => self.0.clone(),
        }
    }
}

fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
        return Err(ValidationError::Format(format!(
            "Label must be between 1 and {} characters",
            MAX_LABEL_LENGTH
        )));
    }

    // Underscores are not RFC 1035 but resolve fine through /etc/hosts.
    if !label
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::Format(
            "Label can only contain alphanumeric characters, hyphens and underscores"
                .to_string(),
        ));
    }

    if label.starts_with('-') || label.ends_with('-') {
        return Err(ValidationError::Format(
            "Label cannot start or end with hyphen".to_string(),
        ));
    }

    Ok(())
}

/// Validates a host name or IP literal.
pub(crate) fn validate_host(host: &str) -> Result<(), ValidationError> {
    if host.is_empty() {
        return Err(ValidationError::Field {
            field: "host".to_string(),
            message: "Host cannot be empty".to_string(),
        });
    }

    let unbracketed = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    if unbracketed.parse::<IpAddr>().is_ok() {
        return Ok(());
    }

    if host.len() > MAX_HOSTNAME_LENGTH {
        return Err(ValidationError::ConstraintViolation(format!(
            "Host length exceeds maximum of {} characters",
            MAX_HOSTNAME_LENGTH
        )));
    }

    for label in host.split('.') {
        validate_label(label)?;
    }

    Ok(())
}
