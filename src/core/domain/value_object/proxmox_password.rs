use crate::core::domain::error::{ProxmoxResult, ValidationError};
use std::fmt;

/// A Proxmox password (plaintext, only kept for the login call).
///
/// `Debug` output is redacted.
#[derive(Clone)]
pub struct ProxmoxPassword(String);

impl ProxmoxPassword {
    /// Creates a new password after validating it.
    pub fn new(password: impl Into<String>) -> ProxmoxResult<Self> {
        let password = password.into();
        validate_password(&password)?;
        Ok(Self(password))
    }

    /// Creates a new password without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(password: String) -> Self {
        Self(password)
    }

    /// Returns the password as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProxmoxPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProxmoxPassword(***)")
    }
}

/// Validates a password.
///
/// Strength is the server's business; only obviously unusable values are
/// rejected here.
pub(crate) fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Field {
            field: "password".to_string(),
            message: "Password cannot be empty".to_string(),
        });
    }
    if password.len() > 1024 {
        return Err(ValidationError::Format(
            "Password cannot exceed 1024 characters".to_string(),
        ));
    }
    Ok(())
}
