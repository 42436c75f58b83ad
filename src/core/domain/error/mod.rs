use thiserror::Error;

/// The main error type for pmox operations.
///
/// This enum represents every fatal condition the tool can hit, from
/// configuration loading through authentication, enumeration and address
/// resolution, up to command-line usage mistakes.
#[derive(Error, Debug)]
pub enum ProxmoxError {
    /// Represents a missing or unusable configuration value
    ///
    /// # Fields
    /// * `0` - A description of which setting is wrong
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents errors that occur while talking to the server
    ///
    /// # Fields
    /// * `0` - A description of what went wrong at the transport level
    #[error("Connection error: {0}")]
    Connection(String),

    /// Represents authentication failures
    ///
    /// # Fields
    /// * `0` - A description of the authentication failure
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Represents a non-success HTTP status returned by the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Represents a failed node, VM or interface listing
    ///
    /// Any listing failure aborts the whole resolution.
    #[error("Failed to list {resource}: {source}")]
    Enumeration {
        resource: String,
        #[source]
        source: Box<ProxmoxError>,
    },

    /// Resolution finished without a qualifying address
    #[error("No VM or network interfaces found for name \"{name}\"")]
    NotFound { name: String },

    /// Every address family was tried and none resolved
    #[error("Cannot determine IP for VM \"{name}\".")]
    Unresolvable {
        name: String,
        #[source]
        source: Option<Box<ProxmoxError>>,
    },

    /// The external shell could not be started
    #[error("Failed to launch {program}: {message}")]
    Shell { program: String, message: String },

    /// The user interrupted the command before it finished
    #[error("Interrupted")]
    Interrupted,

    /// Represents a malformed command-line argument
    #[error("{0}")]
    Usage(String),

    /// Represents validation failures with detailed context
    ///
    /// # Fields
    /// * `0` - The underlying validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl ProxmoxError {
    /// Wraps a listing failure with the resource that was being listed.
    pub(crate) fn enumeration(resource: impl Into<String>, source: ProxmoxError) -> Self {
        ProxmoxError::Enumeration {
            resource: resource.into(),
            source: Box::new(source),
        }
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with a ProxmoxError
pub type ProxmoxResult<T> = Result<T, ProxmoxError>;
