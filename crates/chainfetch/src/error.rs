//! Error types for chainfetch.

use thiserror::Error;

use crate::data::{Key, KeyKind};

/// Type-erased error carried across the transport and callback boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    /// A key has neither an override nor a registered default.
    #[error("no default registered for key `{key}`")]
    Configuration { key: Key },

    #[error("key `{key}` cannot be registered as a {expected} key")]
    KeyKind { key: Key, expected: KeyKind },

    #[error("resolving `{key}` produced a value for `{found}`")]
    UnexpectedValue { key: Key, found: Key },

    #[error("failed to encode json body: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The transport failed and no connection error handler was set.
    ///
    /// The transport's error is kept as-is and can be recovered with
    /// [`downcast_ref`](std::error::Error::downcast_ref) on the source.
    #[error("connection failed: {0}")]
    Connection(#[source] BoxError),

    #[error("callback failed: {0}")]
    Callback(#[source] BoxError),
}

impl Error {
    /// Returns `true` if the failure happened before the transport was called.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Configuration { .. } | Error::KeyKind { .. } | Error::UnexpectedValue { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
