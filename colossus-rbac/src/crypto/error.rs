//! Error type for the crypto module.

use thiserror::Error;

/// Errors that can occur while handling digests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Hash input or output was malformed
    #[error("hash operation failed: {0}")]
    HashError(String),

    /// Hex or byte decoding failed
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl From<hex::FromHexError> for CryptoError {
    fn from(e: hex::FromHexError) -> Self {
        CryptoError::SerializationError(e.to_string())
    }
}
