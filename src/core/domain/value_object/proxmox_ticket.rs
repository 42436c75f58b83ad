use crate::core::domain::error::{ProxmoxResult, ValidationError};

/// Name of the cookie the ticket travels in.
pub const AUTH_COOKIE_NAME: &str = "PVEAuthCookie";

/// A Proxmox authentication ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxTicket(String);

impl ProxmoxTicket {
    /// Creates a new ticket after validating its shape.
    pub fn new(value: impl Into<String>) -> ProxmoxResult<Self> {
        let value = value.into();
        validate_ticket(&value)?;
        Ok(Self(value))
    }

    /// Creates a new ticket without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Returns the ticket value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Formats the ticket as a cookie header.
    #[must_use]
    pub fn as_cookie_header(&self) -> String {
        format!("{}={}", AUTH_COOKIE_NAME, self.0)
    }
}

/// Validates the format of a ticket string.
pub(crate) fn validate_ticket(ticket: &str) -> Result<(), ValidationError> {
    if ticket.is_empty() {
        return Err(ValidationError::Field {
            field: "ticket".to_string(),
            message: "Ticket cannot be empty".to_string(),
        });
    }
    let parts: Vec<&str> = ticket.split(':').collect();
    if parts.len() < 5 || parts[0] != "PVE" {
        return Err(ValidationError::Format(
            "Invalid ticket format: must start with 'PVE:' and have at least 5 parts".to_string(),
        ));
    }
    Ok(())
}
