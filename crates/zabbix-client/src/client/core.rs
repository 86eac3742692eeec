//! Core Client implementation for Zabbix API communication
//!
//! `Client<T>` is a cheaply-cloneable `Arc` wrapper: all clones share the
//! transport, the correlation id counter and the session token.
//!
//! Three call flavours build on each other:
//!
//! - [`Client::call_raw`]: envelope as received, remote error left inside
//! - [`Client::call`]: remote error promoted to [`Error::Remote`]
//! - [`Client::call_into`]: result decoded into a caller-chosen type

use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;
use zabbix_http::{HttpClientConfig, HttpTransport, Transport};
use zabbix_protocol::{CallParams, Response};

use super::protocol::ProtocolClient;
use crate::error::{Error, Result};

/// Whether a call carries the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    /// Use the token current at call time, if any
    Session,
    /// Never send a token
    Anonymous,
}

/// Inner client state with interior mutability
pub(super) struct ClientInner<T: Transport + 'static> {
    pub(super) protocol: ProtocolClient<T>,

    /// Session token; written only by login / `set_auth`
    pub(super) auth: RwLock<Option<String>>,
}

/// Zabbix API client
///
/// # Clone Pattern
///
/// `Client<T>` is cheaply cloneable via Arc. All clones share the same
/// underlying transport and session:
///
/// ```rust,no_run
/// use zabbix_client::Client;
///
/// # async fn example() -> zabbix_client::Result<()> {
/// let client = Client::from_url("https://zabbix.example.com/api_jsonrpc.php")?;
/// client.login("Admin", "zabbix").await?;
///
/// // Cheap clone - shares the session token
/// let client2 = client.clone();
/// tokio::spawn(async move {
///     let _ = client2.actions().get(Default::default()).await;
/// });
/// # Ok(())
/// # }
/// ```
pub struct Client<T: Transport + 'static = HttpTransport> {
    pub(super) inner: Arc<ClientInner<T>>,
}

impl<T: Transport + 'static> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport + 'static> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport", self.inner.protocol.transport())
            .field("authenticated", &self.inner.auth.read().is_some())
            .finish()
    }
}

impl Client<HttpTransport> {
    /// Create a client for the given endpoint URL over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the URL is invalid.
    pub fn from_url(url: impl Into<String>) -> Result<Self> {
        Self::from_config(HttpClientConfig::new(url))
    }

    /// Create an HTTP client from a full transport configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the configuration is invalid.
    pub fn from_config(config: HttpClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: Transport + 'static> Client<T> {
    /// Create a new client over the given transport.
    pub fn new(transport: T) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                protocol: ProtocolClient::new(transport),
                auth: RwLock::new(None),
            }),
        }
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        self.inner.protocol.transport()
    }

    /// The session token currently attached to authenticated calls
    pub fn auth(&self) -> Option<String> {
        self.inner.auth.read().clone()
    }

    /// Install a session token obtained elsewhere. An empty token clears it.
    pub fn set_auth(&self, token: impl Into<String>) {
        let token = token.into();
        *self.inner.auth.write() = (!token.is_empty()).then_some(token);
    }

    /// Forget the session token locally. Does not end the server session.
    pub fn clear_auth(&self) {
        *self.inner.auth.write() = None;
    }

    /// Whether a session token is set
    pub fn is_authenticated(&self) -> bool {
        self.inner.auth.read().is_some()
    }

    pub(crate) async fn request(
        &self,
        method: &str,
        params: CallParams,
        auth: Auth,
    ) -> Result<Response> {
        // Snapshot the token; the lock is never held across the round trip
        let token = match auth {
            Auth::Session => self.auth().unwrap_or_default(),
            Auth::Anonymous => String::new(),
        };
        self.inner.protocol.request(method, params, &token).await
    }

    /// Call a remote method and return the decoded envelope as received.
    ///
    /// Remote errors are **not** promoted: inspect [`Response::error`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] for network failures, unreadable bodies
    /// and correlation id mismatches.
    pub async fn call_raw(
        &self,
        method: &str,
        params: impl Into<CallParams>,
    ) -> Result<Response> {
        self.request(method, params.into(), Auth::Session).await
    }

    /// Call a remote method, promoting a remote error to [`Error::Remote`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] or [`Error::Remote`].
    pub async fn call(&self, method: &str, params: impl Into<CallParams>) -> Result<Value> {
        self.call_with(method, params.into(), Auth::Session).await
    }

    /// Call a remote method and decode its result into `R`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`], [`Error::Remote`], or [`Error::Decode`]
    /// when the result does not fit `R`.
    pub async fn call_into<R: DeserializeOwned>(
        &self,
        method: &str,
        params: impl Into<CallParams>,
    ) -> Result<R> {
        self.call_into_with(method, params.into(), Auth::Session).await
    }

    pub(crate) async fn call_with(
        &self,
        method: &str,
        params: CallParams,
        auth: Auth,
    ) -> Result<Value> {
        let response = self.request(method, params, auth).await?;
        response.into_result().map_err(|error| {
            warn!(method, code = error.code(), data = error.data(), "Remote API error");
            Error::Remote(error)
        })
    }

    pub(crate) async fn call_into_with<R: DeserializeOwned>(
        &self,
        method: &str,
        params: CallParams,
        auth: Auth,
    ) -> Result<R> {
        let result = self.call_with(method, params, auth).await?;
        decode_result(method, result)
    }
}

/// Convert a generic result value into the caller's type.
pub(crate) fn decode_result<R: DeserializeOwned>(method: &str, result: Value) -> Result<R> {
    serde_json::from_value(result).map_err(|e| {
        warn!(method, error = %e, "Result did not match the expected shape");
        Error::decode(method, e)
    })
}
