//! # Zabbix Client
//!
//! Typed async client for the Zabbix JSON-RPC API.
//!
//! ## Features
//!
//! - **Session** - `user.authenticate` login; the token rides on every later call
//! - **Typed calls** - [`Client::call_into`] decodes results into your own types
//! - **Generic CRUD** - one [`Resource`] implementation for every [`Entity`]
//! - **Distinct failures** - transport, remote, contract and codec errors never blur
//! - **Cheap clones** - clones share one connection pool, id counter and session
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zabbix_client::{Action, Client, Params};
//!
//! # async fn example() -> zabbix_client::Result<()> {
//! let client = Client::from_url("https://zabbix.example.com/api_jsonrpc.php")?;
//! println!("API version {}", client.version().await?);
//!
//! client.login("Admin", "zabbix").await?;
//!
//! let mut actions = vec![Action {
//!     name: "Report problems to on-call".into(),
//!     eventsource: "0".into(),
//!     ..Default::default()
//! }];
//! client.actions().create(&mut actions).await?;
//!
//! let fetched = client.actions().get_by_id(&actions[0].actionid).await?;
//! assert_eq!(fetched.name, actions[0].name);
//!
//! let discovery = client
//!     .actions()
//!     .get(Params::new().with("filter", serde_json::json!({"eventsource": "1"})))
//!     .await?;
//! println!("{} discovery actions", discovery.len());
//!
//! client.actions().delete(&mut actions).await?;
//! assert!(actions[0].actionid.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Raw calls
//!
//! Methods without a typed binding go through [`Client::call`] (remote errors
//! promoted) or [`Client::call_raw`] (envelope returned as received).
//!
//! ## Logging
//!
//! Events are emitted with `tracing`; install a subscriber to see them.
//! Request payloads are never logged.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all
)]
#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod types;

pub use client::operations::session::{LOGIN_METHOD, VERSION_METHOD};
pub use client::{Client, ClientBuilder, Entity, Resource};
pub use error::{Error, Result};
pub use types::{
    Action, Actions, Condition, Filter, Operation, OperationGroup, OperationTemplate, User, Users,
};

pub use zabbix_http::{HttpClientConfig, HttpTransport, Transport, TransportError};
pub use zabbix_protocol::{CallParams, Params, RemoteError, RemoteErrorCode, Request, Response};
