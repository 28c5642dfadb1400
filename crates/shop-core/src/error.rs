//! # Shop Error Types
//!
//! Typed error handling for the tool-house backend.
//! All fallible operations return `Result<T, ShopError>`.

use thiserror::Error;

/// Core error type for all marketplace operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Path identifier is not a valid document id
    #[error("Invalid identifier: {id}")]
    InvalidId { id: String },

    /// No Authorization header on a token-gated route
    #[error("Unauthorized Access")]
    AuthMissing,

    /// Token failed verification (bad signature, expired)
    #[error("Forbidden Access")]
    AuthInvalid,

    /// Authenticated, but the token does not grant access to this resource
    #[error("Forbidden Access")]
    Forbidden,

    /// Document store failure
    #[error("Store error: {0}")]
    Store(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error communicating with an external collaborator
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Returns true if this error is retryable by the caller
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ShopError::Network(_) | ShopError::Store(_) | ShopError::Provider { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Configuration(_) => 500,
            ShopError::InvalidRequest(_) => 400,
            ShopError::InvalidId { .. } => 400,
            ShopError::AuthMissing => 401,
            ShopError::AuthInvalid => 403,
            ShopError::Forbidden => 403,
            ShopError::Store(_) => 503,
            ShopError::Provider { .. } => 502,
            ShopError::Network(_) => 503,
            ShopError::Serialization(_) => 500,
            ShopError::Internal(_) => 500,
        }
    }
}

/// Result type alias for marketplace operations
pub type ShopResult<T> = Result<T, ShopError>;
