use crate::core::domain::error::{ProxmoxResult, ValidationError};

/// The user the original Proxmox installation ships with.
pub const DEFAULT_USERNAME: &str = "root@pam";

const MAX_USERNAME_LENGTH: usize = 64;

/// A validated Proxmox user id in `user@realm` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxUsername(String);

impl ProxmoxUsername {
    /// Creates a new username after validating it.
    pub fn new(username: impl Into<String>) -> ProxmoxResult<Self> {
        let username = username.into();
        validate_username(&username)?;
        Ok(Self(username))
    }

    /// Creates a new username without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(username: String) -> Self {
        Self(username)
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the authentication realm (the part after `@`).
    #[must_use]
    pub fn realm(&self) -> Option<&str> {
        self.0.rsplit_once('@').map(|(_, realm)| realm)
    }
}

impl Default for ProxmoxUsername {
    fn default() -> Self {
        Self(DEFAULT_USERNAME.to_string())
    }
}

/// Validates a `user@realm` user id.
pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::Field {
            field: "username".to_string(),
            message: "Username cannot be empty".to_string(),
        });
    }
    let length = username.chars().count();
    if length > MAX_USERNAME_LENGTH {
        return Err(ValidationError::Format(format!(
            "Username cannot exceed {} characters (got {})",
            MAX_USERNAME_LENGTH, length
        )));
    }
    if username
        .chars()
        .any(|c| c.is_whitespace() || c == ':' || c == '/')
    {
        return Err(ValidationError::Format(
            "Username cannot contain whitespace, ':' or '/'".to_string(),
        ));
    }
    match username.rsplit_once('@') {
        Some((user, realm)) if !user.is_empty() && !realm.is_empty() => Ok(()),
        _ => Err(ValidationError::ConstraintViolation(
            "Username must be in the format user@realm (e.g. root@pam)".to_string(),
        )),
    }
}
