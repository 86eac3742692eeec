//! Zabbix client implementation
//!
//! - `core`: `Client<T>` with correlation ids, error unpacking and typed decoding
//! - `protocol`: `ProtocolClient` for JSON-RPC envelope round trips
//! - `builder`: `ClientBuilder` over the HTTP transport configuration
//! - `operations`: session handling and generic CRUD resource bindings
//!
//! `Client<T>` is cloneable via `Arc<ClientInner<T>>`; clones share one session.

pub mod builder;
pub mod core;
pub mod operations;
mod protocol;

pub use builder::ClientBuilder;
pub use self::core::Client;
pub use operations::resources::{Entity, Resource};
