//! Zabbix API HTTP client transport
//!
//! One POST per call to the frontend endpoint with
//! `Content-Type: application/json-rpc`. The body is read in full before the
//! call resolves; nothing is streamed and nothing is retried.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use reqwest::{Client as HttpClient, header};
use tracing::{debug, trace, warn};
use url::Url;

use crate::config::{HttpClientConfig, JSON_RPC_CONTENT_TYPE};
use crate::error::{TransportError, TransportResult, validate_response_size};
use crate::traits::Transport;

/// Number of body bytes kept in [`TransportError::HttpStatus`].
const STATUS_BODY_PREVIEW: usize = 512;

/// HTTP client transport for the Zabbix API
pub struct HttpTransport {
    config: HttpClientConfig,
    endpoint: Url,
    http_client: HttpClient,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

impl HttpTransport {
    /// Create a new HTTP transport
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ConfigurationError`] if the endpoint URL is
    /// invalid or the underlying HTTP client cannot be built.
    pub fn new(config: HttpClientConfig) -> TransportResult<Self> {
        let endpoint = config.endpoint()?;

        let mut client_builder = HttpClient::builder().default_headers(Self::build_headers(&config));

        if let Some(ref user_agent) = config.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        }

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let http_client = client_builder.build().map_err(|e| {
            TransportError::ConfigurationError(format!("failed to build HTTP client: {e}"))
        })?;

        debug!(endpoint = %endpoint, "Created Zabbix HTTP transport");

        Ok(Self {
            config,
            endpoint,
            http_client,
        })
    }

    /// Create a transport for `url` with default settings.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::new`].
    pub fn from_url(url: impl Into<String>) -> TransportResult<Self> {
        Self::new(HttpClientConfig::new(url))
    }

    /// The configuration this transport was built with.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Build request headers
    fn build_headers(config: &HttpClientConfig) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();

        // Skip invalid custom headers rather than fail construction
        for (key, value) in &config.headers {
            match (
                header::HeaderName::from_bytes(key.as_bytes()),
                header::HeaderValue::from_str(value),
            ) {
                (Ok(k), Ok(v)) => {
                    headers.insert(k, v);
                }
                _ => warn!(header = %key, "Skipping invalid custom header"),
            }
        }

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static(JSON_RPC_CONTENT_TYPE),
        );

        headers
    }
}

impl Transport for HttpTransport {
    fn post(&self, body: Bytes) -> Pin<Box<dyn Future<Output = TransportResult<Bytes>> + Send + '_>> {
        Box::pin(async move {
            trace!(bytes = body.len(), "Sending request via HTTP POST");

            let response = self
                .http_client
                .post(self.endpoint.clone())
                .body(body)
                .send()
                .await
                .map_err(|e| TransportError::from_reqwest(&e))?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                let preview: String = text.chars().take(STATUS_BODY_PREVIEW).collect();
                warn!(status = status.as_u16(), "POST failed");
                return Err(TransportError::HttpStatus {
                    status: status.as_u16(),
                    body: preview,
                });
            }

            if let Some(length) = response.content_length() {
                validate_response_size(length as usize, self.config.max_response_size)?;
            }

            let response_bytes = response
                .bytes()
                .await
                .map_err(|e| TransportError::from_reqwest(&e))?;

            validate_response_size(response_bytes.len(), self.config.max_response_size)?;

            trace!(bytes = response_bytes.len(), "Received response body");
            Ok(response_bytes)
        })
    }

    fn endpoint(&self) -> Option<String> {
        Some(self.endpoint.to_string())
    }
}
