//! # Zabbix Protocol
//!
//! Wire types for the Zabbix JSON-RPC API.
//!
//! - [`Request`] / [`Response`]: JSON-RPC 2.0 envelopes with the Zabbix
//!   `auth` member
//! - [`RemoteError`]: structured error returned by the server
//! - [`Params`] / [`CallParams`]: parameter bag and the `params` sum type
//!
//! This crate performs no I/O; see `zabbix-http` for the transport and
//! `zabbix-client` for the typed client.
//!
//! ```rust
//! use zabbix_protocol::{Params, Request};
//!
//! let request = Request::new("action.get", Params::new().with("output", "extend").into(), "", 1);
//! let json = serde_json::to_string(&request).unwrap();
//! assert_eq!(json, r#"{"jsonrpc":"2.0","method":"action.get","params":{"output":"extend"},"id":1}"#);
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all
)]
#![deny(unsafe_code)]

pub mod jsonrpc;
pub mod params;

pub use jsonrpc::{
    JSONRPC_VERSION, JsonRpcVersion, RemoteError, RemoteErrorCode, Request, RequestId, Response,
};
pub use params::{CallParams, OUTPUT_EXTEND, OUTPUT_KEY, Params};
