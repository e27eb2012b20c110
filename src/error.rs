//! Error types for persisted

use thiserror::Error;

/// Result type alias for persistence operations
pub type Result<T> = std::result::Result<T, PersistError>;

/// Persistence error types
#[derive(Error, Debug)]
pub enum PersistError {
    /// A value could not be encoded by its codec. This is a contract
    /// violation between the value type and the codec, not a runtime
    /// condition to retry.
    #[error("encoding failed: {0}")]
    Encode(String),

    /// Stored data could not be decoded under the strict policy.
    #[error("decoding failed: {0}")]
    Decode(String),

    #[error("keychain error: {0}")]
    Keychain(String),

    #[error("preference store error: {0}")]
    Preferences(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
