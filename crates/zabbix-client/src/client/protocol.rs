//! Protocol client for JSON-RPC communication
//!
//! Owns the transport and the correlation id counter. Each request takes the
//! next id, is serialized into a [`Request`] envelope, sent in one round trip
//! and decoded back into a [`Response`] whose id must echo the request's.

use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use tracing::{debug, trace};
use zabbix_http::{Transport, TransportError};
use zabbix_protocol::{CallParams, Request, RequestId, Response};

use crate::error::{Error, Result};

/// JSON-RPC protocol handler for Zabbix API communication
#[derive(Debug)]
pub(super) struct ProtocolClient<T: Transport> {
    transport: T,
    next_id: AtomicU64,
}

impl<T: Transport> ProtocolClient<T> {
    pub(super) fn new(transport: T) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(1),
        }
    }

    pub(super) fn transport(&self) -> &T {
        &self.transport
    }

    /// Take the next correlation id. Ids start at 1 and are never reused.
    fn next_id(&self) -> RequestId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Send a request envelope and return the raw response body.
    pub(super) async fn send(
        &self,
        method: &str,
        params: CallParams,
        auth: &str,
    ) -> Result<(RequestId, Bytes)> {
        let id = self.next_id();
        let request = Request::new(method, params, auth, id);

        let payload = serde_json::to_vec(&request).map_err(|e| Error::encode(method, e))?;

        debug!(method, id, authenticated = request.is_authenticated(), "Sending JSON-RPC request");
        let body = self.transport.post(payload.into()).await?;
        trace!(method, id, bytes = body.len(), "Received JSON-RPC response");

        Ok((id, body))
    }

    /// Send a request and decode the response envelope.
    ///
    /// Remote errors are left inside the returned envelope. A successful
    /// envelope that does not echo the request id is rejected.
    pub(super) async fn request(
        &self,
        method: &str,
        params: CallParams,
        auth: &str,
    ) -> Result<Response> {
        let (id, body) = self.send(method, params, auth).await?;

        let response: Response = serde_json::from_slice(&body)
            .map_err(|e| TransportError::MalformedResponse(format!("{method}: {e}")))?;

        if !response.is_error() && !response.echoes(id) {
            return Err(TransportError::IdMismatch {
                expected: id,
                got: response.id,
            }
            .into());
        }

        Ok(response)
    }
}
