//! HTTP transport configuration.

use std::collections::HashMap;
use std::time::Duration;

use url::Url;

use crate::error::{TransportError, TransportResult};

/// Content type the Zabbix frontend expects on API requests.
pub const JSON_RPC_CONTENT_TYPE: &str = "application/json-rpc";

/// Default endpoint path of the Zabbix frontend API.
pub const DEFAULT_API_PATH: &str = "api_jsonrpc.php";

/// HTTP transport configuration
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    /// Full endpoint URL, e.g. `https://zabbix.example.com/api_jsonrpc.php`
    pub url: String,

    /// User agent string (set to None to disable the User-Agent header)
    ///
    /// Default: `zabbix-client/{version}`
    pub user_agent: Option<String>,

    /// Whole-request timeout. `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,

    /// Maximum accepted response body size in bytes. `None` = unlimited.
    pub max_response_size: Option<usize>,

    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            url: format!("http://localhost/{DEFAULT_API_PATH}"),
            user_agent: Some(format!("zabbix-client/{}", env!("CARGO_PKG_VERSION"))),
            timeout: None,
            max_response_size: None,
            headers: HashMap::new(),
        }
    }
}

impl HttpClientConfig {
    /// Configuration for the given endpoint URL with default settings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Parse and check the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ConfigurationError`] if the URL does not parse
    /// or its scheme is not `http`/`https`.
    pub fn endpoint(&self) -> TransportResult<Url> {
        let url = Url::parse(&self.url).map_err(|e| {
            TransportError::ConfigurationError(format!("invalid endpoint URL '{}': {e}", self.url))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(TransportError::ConfigurationError(format!(
                "unsupported URL scheme '{other}', expected http or https"
            ))),
        }
    }
}
