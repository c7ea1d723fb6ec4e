//! Shared error type across the contacts crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed payload.
    BadRequest,
    /// Startup wiring is inconsistent (duplicate or unknown policy, ...).
    Configuration,
    /// No valid identity for an operation that requires one.
    Unauthenticated,
    /// Identity present but a required claim is missing.
    Forbidden,
    /// Requested record does not exist.
    NotFound,
    /// Version token could not be parsed.
    InvalidVersion,
    /// Version parsed but the operation is not published for it.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Configuration => "CONFIGURATION",
            ClientCode::Unauthenticated => "UNAUTHENTICATED",
            ClientCode::Forbidden => "FORBIDDEN",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::InvalidVersion => "INVALID_API_VERSION",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_API_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ContactsError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum ContactsError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("forbidden by policy {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid api version: {0}")]
    InvalidVersion(String),
    #[error("unsupported api version: {0}")]
    UnsupportedVersion(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ContactsError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            ContactsError::BadRequest(_) => ClientCode::BadRequest,
            ContactsError::Configuration(_) => ClientCode::Configuration,
            ContactsError::Unauthenticated => ClientCode::Unauthenticated,
            ContactsError::Forbidden(_) => ClientCode::Forbidden,
            ContactsError::NotFound(_) => ClientCode::NotFound,
            ContactsError::InvalidVersion(_) => ClientCode::InvalidVersion,
            ContactsError::UnsupportedVersion(_) => ClientCode::UnsupportedVersion,
            ContactsError::Internal(_) => ClientCode::Internal,
        }
    }
}
