//! Core transport trait.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;

use crate::error::TransportResult;

/// A request/response channel to a JSON-RPC endpoint.
///
/// Implementations perform exactly one round trip per call and resolve only
/// once the complete response body is available. They never retry.
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Send a serialized request envelope and return the raw response body.
    fn post(&self, body: Bytes) -> Pin<Box<dyn Future<Output = TransportResult<Bytes>> + Send + '_>>;

    /// Returns the endpoint address or identifier for this transport, if applicable.
    fn endpoint(&self) -> Option<String> {
        None
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn post(&self, body: Bytes) -> Pin<Box<dyn Future<Output = TransportResult<Bytes>> + Send + '_>> {
        (**self).post(body)
    }

    fn endpoint(&self) -> Option<String> {
        (**self).endpoint()
    }
}
