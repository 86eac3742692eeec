//! Client builder pattern for Zabbix client construction
//!
//! Provides a fluent interface for configuring the HTTP transport and an
//! initial session token before creation.

use std::time::Duration;

use zabbix_http::{HttpClientConfig, HttpTransport, Transport};

use super::core::Client;
use crate::error::Result;

/// Builder for configuring and creating Zabbix clients
///
/// # Examples
///
/// ```rust,no_run
/// use std::time::Duration;
/// use zabbix_client::ClientBuilder;
///
/// # fn example() -> zabbix_client::Result<()> {
/// let client = ClientBuilder::new()
///     .with_url("https://zabbix.example.com/api_jsonrpc.php")
///     .with_timeout(Duration::from_secs(30))
///     .with_header("X-Request-Source", "inventory-sync")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: HttpClientConfig,
    auth: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing transport configuration
    pub fn from_config(config: HttpClientConfig) -> Self {
        Self { config, auth: None }
    }

    /// Set the API endpoint URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// Set the User-Agent header value
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Do not send a User-Agent header
    pub fn without_user_agent(mut self) -> Self {
        self.config.user_agent = None;
        self
    }

    /// Set the whole-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Reject response bodies larger than `max` bytes
    pub fn with_max_response_size(mut self, max: usize) -> Self {
        self.config.max_response_size = Some(max);
        self
    }

    /// Add a header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(name.into(), value.into());
        self
    }

    /// Start with a session token obtained elsewhere, skipping login
    pub fn with_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(token.into());
        self
    }

    /// The transport configuration built so far
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Build an HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] if the configuration is invalid.
    pub fn build(self) -> Result<Client<HttpTransport>> {
        let transport = HttpTransport::new(self.config)?;
        Ok(Self::finish(Client::new(transport), self.auth))
    }

    /// Build a client over a caller-supplied transport.
    ///
    /// Only the session token applies; HTTP settings are the transport's own.
    pub fn build_with<T: Transport + 'static>(self, transport: T) -> Client<T> {
        Self::finish(Client::new(transport), self.auth)
    }

    fn finish<T: Transport + 'static>(client: Client<T>, auth: Option<String>) -> Client<T> {
        if let Some(token) = auth {
            client.set_auth(token);
        }
        client
    }
}
