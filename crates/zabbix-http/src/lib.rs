//! # Zabbix HTTP Transport
//!
//! HTTP client transport for the Zabbix JSON-RPC API.
//!
//! The transport moves opaque bytes: it POSTs a serialized request envelope to
//! the frontend endpoint and hands back the complete response body. Envelope
//! construction, correlation ids and error unpacking live in `zabbix-client`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bytes::Bytes;
//! use std::time::Duration;
//! use zabbix_http::{HttpClientConfig, HttpTransport, Transport};
//!
//! # async fn example() -> Result<(), zabbix_http::TransportError> {
//! let config = HttpClientConfig {
//!     url: "https://zabbix.example.com/api_jsonrpc.php".to_string(),
//!     timeout: Some(Duration::from_secs(30)),
//!     ..Default::default()
//! };
//!
//! let transport = HttpTransport::new(config)?;
//! let body = transport
//!     .post(Bytes::from_static(br#"{"jsonrpc":"2.0","method":"apiinfo.version","params":{},"id":1}"#))
//!     .await?;
//! println!("{}", String::from_utf8_lossy(&body));
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all
)]
#![deny(unsafe_code)]

mod config;
mod error;
mod traits;
mod transport;

pub use config::{DEFAULT_API_PATH, HttpClientConfig, JSON_RPC_CONTENT_TYPE};
pub use error::{TransportError, TransportResult, validate_response_size};
pub use traits::Transport;
pub use transport::HttpTransport;
