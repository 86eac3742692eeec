//! Client error type.
//!
//! Every failure a caller can see falls into exactly one of four groups:
//!
//! | Group | Variants | Meaning |
//! |-------|----------|---------|
//! | transport | [`Error::Transport`] | nothing reached the server, or its answer was unreadable |
//! | remote | [`Error::Remote`] | the server understood the request and rejected it |
//! | contract | [`Error::ExpectedOneResult`], [`Error::ExpectedMore`] | well-formed answer, wrong cardinality |
//! | codec | [`Error::Encode`], [`Error::Decode`] | params or result did not fit the Rust types |

use thiserror::Error;
use zabbix_http::TransportError;
use zabbix_protocol::RemoteError;

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`crate::Client`] and [`crate::Resource`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Network, HTTP or envelope-level failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server explicitly rejected the request.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Call parameters could not be serialized.
    #[error("Failed to encode params for {method}: {source}")]
    Encode {
        /// Remote method being called
        method: String,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// The call succeeded but its result did not have the expected shape.
    #[error("Failed to decode result of {method}: {source}")]
    Decode {
        /// Remote method that was called
        method: String,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// A lookup that must match exactly one object matched `0` or several.
    #[error("Expected exactly one result, got {0}.")]
    ExpectedOneResult(usize),

    /// The server reported a different number of affected ids than requested.
    #[error("Expected {expected}, got {got}.")]
    ExpectedMore {
        /// Number of ids sent or records submitted
        expected: usize,
        /// Number of ids reported back
        got: usize,
    },
}

impl Error {
    /// Whether this is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether the server rejected the request
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Whether a client-side cardinality check failed
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ExpectedOneResult(_) | Self::ExpectedMore { .. })
    }

    /// Whether the result could not be decoded into the requested type
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// The remote error, if this is one
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(error) => Some(error),
            _ => None,
        }
    }

    pub(crate) fn encode(method: &str, source: serde_json::Error) -> Self {
        Self::Encode {
            method: method.to_owned(),
            source,
        }
    }

    pub(crate) fn decode(method: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            method: method.to_owned(),
            source,
        }
    }
}
