//! Error types for fundamentals retrieval.
//!
//! Every failure between normalizing the symbol and producing a record is a
//! [`RetrievalError`]. The sub-kinds only matter for logging: on the wire all
//! of them become the same error record carrying the message.

use thiserror::Error;

/// Failure to retrieve or map fundamentals for a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetrievalError {
    /// The provider could not be reached or the transfer failed.
    #[error("{0}")]
    Network(String),

    /// The provider does not know the symbol.
    #[error("{0}")]
    NotFound(String),

    /// The provider answered with an error of its own.
    #[error("{0}")]
    Provider(String),

    /// The provider's response did not have the expected shape.
    #[error("{0}")]
    MalformedResponse(String),
}

impl RetrievalError {
    /// Short name of the error kind, for log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::NotFound(_) => "not_found",
            Self::Provider(_) => "provider",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }

    /// The human-readable message, as emitted in error records.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Network(m)
            | Self::NotFound(m)
            | Self::Provider(m)
            | Self::MalformedResponse(m) => m,
        }
    }
}

/// A specialized Result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;
