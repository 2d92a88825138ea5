use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// A required event field was null or missing
    #[error("{0}")]
    #[diagnostic(code(calendar::validation))]
    Validation(String),

    /// Path id and body id of an update disagree
    #[error("{0}")]
    #[diagnostic(code(calendar::id_mismatch))]
    Mismatch(String),

    #[error("Event not found: {0}")]
    #[diagnostic(code(calendar::not_found))]
    NotFound(String),

    /// The request body could not be decoded
    #[error("Invalid request body: {0}")]
    #[diagnostic(code(calendar::invalid_body))]
    InvalidBody(String),

    #[error("Storage error: {0}")]
    #[diagnostic(code(calendar::storage))]
    Storage(#[from] rusqlite::Error),

    /// A value the event table's constraints would refuse
    #[error("Storage error: CHECK constraint failed: {0}")]
    #[diagnostic(code(calendar::constraint))]
    Constraint(String),

    /// The event store actor is gone (closed or crashed)
    #[error("Event store unavailable: {0}")]
    #[diagnostic(code(calendar::store_unavailable))]
    StoreUnavailable(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(calendar::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(calendar::config))]
    Config(String),

    #[error("HTTP client error: {0}")]
    #[diagnostic(code(calendar::http))]
    Http(#[from] reqwest::Error),

    /// The event service answered with a non-success status
    #[error("Event service responded with {status}: {message}")]
    #[diagnostic(code(calendar::api))]
    Api { status: u16, message: String },

    #[error(transparent)]
    #[diagnostic(code(calendar::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(calendar::serialization))]
    Serialization(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create errors for a closed event store mailbox
pub fn store_error(message: &str) -> Error {
    Error::StoreUnavailable(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}
