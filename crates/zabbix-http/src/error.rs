//! Transport error types.

use thiserror::Error;

/// A specialized `Result` type for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Failures where the request never reached the server or its answer could
/// not be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportError {
    /// The transport was configured with invalid parameters.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Failed to establish a connection or send the request.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Leading part of the response body
        body: String,
    },

    /// Failed to read the response body.
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),

    /// Response size exceeds the configured maximum limit.
    #[error(
        "Response size ({size} bytes) exceeds maximum allowed ({max} bytes). \
         If this is expected, raise `HttpClientConfig::max_response_size`."
    )]
    ResponseTooLarge {
        /// The actual size of the response in bytes
        size: usize,
        /// The maximum allowed size in bytes
        max: usize,
    },

    /// The response body is not a JSON-RPC response envelope.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The response does not echo the request's correlation id.
    #[error("Response id mismatch: expected {expected}, got {got:?}")]
    IdMismatch {
        /// Id sent with the request
        expected: u64,
        /// Id found in the response
        got: Option<u64>,
    },
}

impl TransportError {
    /// Build a transport error from a reqwest failure, keeping the source chain.
    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        let message = describe(err);
        if err.is_timeout() {
            Self::Timeout(message)
        } else if err.is_body() || err.is_decode() {
            Self::ReceiveFailed(message)
        } else if err.is_builder() {
            Self::ConfigurationError(message)
        } else {
            Self::ConnectionFailed(message)
        }
    }
}

/// Render an error together with every `source()` below it.
pub(crate) fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Validate response size against an optional limit.
///
/// # Errors
///
/// Returns [`TransportError::ResponseTooLarge`] if `size` exceeds `max`.
pub fn validate_response_size(size: usize, max: Option<usize>) -> TransportResult<()> {
    match max {
        Some(max) if size > max => Err(TransportError::ResponseTooLarge { size, max }),
        _ => Ok(()),
    }
}
