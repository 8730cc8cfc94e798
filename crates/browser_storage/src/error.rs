//! Error types shared by storage adapters, the dispatcher, and the result publisher.

use thiserror::Error;

/// Faults raised by a storage medium or by the host boundary.
///
/// The happy path never produces these; they exist so platform failures (quota, disabled
/// storage, bad expiry input) surface as values instead of disappearing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The storage medium is not reachable from this context.
    #[error("{medium} unavailable")]
    Unavailable {
        /// Human-readable medium name (`localStorage`, `document.cookie`, ...).
        medium: &'static str,
    },

    /// The platform call against the medium failed.
    #[error("{medium} {operation} failed: {detail}")]
    Medium {
        /// Human-readable medium name.
        medium: &'static str,
        /// Operation that failed (`set_item`, `remove_item`, ...).
        operation: &'static str,
        /// Platform error rendering.
        detail: String,
    },

    /// The name cannot be written to this medium without corrupting neighbouring entries.
    #[error("invalid {medium} name `{name}`")]
    InvalidName {
        /// Human-readable medium name.
        medium: &'static str,
        /// Rejected name.
        name: String,
    },

    /// The expiry timestamp passed with a SET could not be parsed.
    #[error("invalid expiry timestamp `{0}`")]
    InvalidExpiry(String),

    /// A result could not be serialized for the host transport.
    #[error("result serialization failed: {0}")]
    Serialization(String),

    /// The host rejected a notify/ready/resize call.
    #[error("host notification failed: {0}")]
    Host(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}
