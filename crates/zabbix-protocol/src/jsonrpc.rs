//! # JSON-RPC 2.0 envelopes
//!
//! Request and response envelopes as spoken by the Zabbix frontend
//! (`api_jsonrpc.php`). The Zabbix dialect carries the session token in an
//! `auth` member of the request body rather than in an HTTP header.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::params::CallParams;

/// JSON-RPC version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Correlation identifier carried in the `id` member.
pub type RequestId = u64;

/// JSON-RPC version type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonRpcVersion;

impl Serialize for JsonRpcVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(JSONRPC_VERSION)
    }
}

impl<'de> Deserialize<'de> for JsonRpcVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let version = String::deserialize(deserializer)?;
        if version == JSONRPC_VERSION {
            Ok(JsonRpcVersion)
        } else {
            Err(serde::de::Error::custom(format!(
                "Invalid JSON-RPC version: expected '{JSONRPC_VERSION}', got '{version}'"
            )))
        }
    }
}

/// JSON-RPC request envelope.
///
/// Member order is significant for byte-level compatibility and matches
/// `{"jsonrpc","method","params","auth","id"}`. An empty `auth` is left out of
/// the wire payload so unauthenticated calls (login, version) are expressible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// JSON-RPC version
    pub jsonrpc: JsonRpcVersion,
    /// Remote procedure name, e.g. `action.create`
    pub method: String,
    /// Call parameters
    pub params: CallParams,
    /// Session token, omitted when empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub auth: String,
    /// Correlation identifier
    pub id: RequestId,
}

impl Request {
    /// Create a new request envelope.
    pub fn new(
        method: impl Into<String>,
        params: CallParams,
        auth: impl Into<String>,
        id: RequestId,
    ) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            method: method.into(),
            params,
            auth: auth.into(),
            id,
        }
    }

    /// Create a request that carries no session token.
    pub fn anonymous(method: impl Into<String>, params: CallParams, id: RequestId) -> Self {
        Self::new(method, params, String::new(), id)
    }

    /// Whether the request carries a session token.
    pub fn is_authenticated(&self) -> bool {
        !self.auth.is_empty()
    }
}

/// JSON-RPC response envelope.
///
/// A missing `result` decodes as `null`; a missing or `null` `error` means
/// success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// JSON-RPC version
    pub jsonrpc: JsonRpcVersion,
    /// Remote error, present iff the call failed at API level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RemoteError>,
    /// Method-specific result payload
    #[serde(default)]
    pub result: Value,
    /// Echo of the request id (`null` for server-side parse errors)
    #[serde(default)]
    pub id: Option<RequestId>,
}

impl Response {
    /// Create a successful response
    pub fn success(result: Value, id: RequestId) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            error: None,
            result,
            id: Some(id),
        }
    }

    /// Create an error response
    pub fn error_response(error: RemoteError, id: Option<RequestId>) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            error: Some(error),
            result: Value::Null,
            id,
        }
    }

    /// Check if this is an error response
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Check if this response answers the request with the given id
    pub fn echoes(&self, id: RequestId) -> bool {
        self.id == Some(id)
    }

    /// Split the envelope into its result, promoting the remote error.
    pub fn into_result(self) -> Result<Value, RemoteError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.result),
        }
    }
}

/// Structured error returned by the remote API.
///
/// Immutable once constructed. Rendered as `"<code> (<message>): <data>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code} ({message}): {data}")]
pub struct RemoteError {
    code: i64,
    message: String,
    #[serde(default)]
    data: String,
}

impl RemoteError {
    /// Create a new remote error
    pub fn new(code: i64, message: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: data.into(),
        }
    }

    /// Numeric error code
    pub fn code(&self) -> i64 {
        self.code
    }

    /// Short error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Detailed error description
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Classify the numeric code
    pub fn kind(&self) -> RemoteErrorCode {
        RemoteErrorCode::from(self.code)
    }
}

/// Error codes emitted by the Zabbix JSON-RPC frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorCode {
    /// Parse error (-32700)
    ParseError,
    /// Invalid request (-32600)
    InvalidRequest,
    /// Method not found (-32601)
    MethodNotFound,
    /// Invalid params (-32602), also used for "Not authorised"
    InvalidParams,
    /// Internal error (-32603)
    InternalError,
    /// Application error (-32500)
    ApplicationError,
    /// System error (-32400)
    SystemError,
    /// Transport error (-32300)
    TransportError,
    /// Any other code
    Other(i64),
}

impl RemoteErrorCode {
    /// Get the numeric error code
    pub fn code(&self) -> i64 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::ApplicationError => -32500,
            Self::SystemError => -32400,
            Self::TransportError => -32300,
            Self::Other(code) => *code,
        }
    }

    /// Get the standard error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid Request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
            Self::ApplicationError => "Application error",
            Self::SystemError => "System error",
            Self::TransportError => "Transport error",
            Self::Other(_) => "Unknown error",
        }
    }
}

impl fmt::Display for RemoteErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl From<i64> for RemoteErrorCode {
    fn from(code: i64) -> Self {
        match code {
            -32700 => Self::ParseError,
            -32600 => Self::InvalidRequest,
            -32601 => Self::MethodNotFound,
            -32602 => Self::InvalidParams,
            -32603 => Self::InternalError,
            -32500 => Self::ApplicationError,
            -32400 => Self::SystemError,
            -32300 => Self::TransportError,
            other => Self::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_jsonrpc_version() {
        let json = serde_json::to_string(&JsonRpcVersion).unwrap();
        assert_eq!(json, "\"2.0\"");

        let parsed: JsonRpcVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, JsonRpcVersion);
        assert!(serde_json::from_str::<JsonRpcVersion>("\"1.0\"").is_err());
    }

    #[test]
    fn test_request_wire_layout() {
        let params = Params::new().with("output", "extend");
        let request = Request::new("action.get", params.into(), "0424bd59b807674191e7d77572075f33", 7);

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"jsonrpc":"2.0","method":"action.get","params":{"output":"extend"},"auth":"0424bd59b807674191e7d77572075f33","id":7}"#
        );
        assert!(request.is_authenticated());
    }

    #[test]
    fn test_request_without_auth_omits_member() {
        let request = Request::anonymous("apiinfo.version", Params::new().into(), 1);

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"jsonrpc":"2.0","method":"apiinfo.version","params":{},"id":1}"#
        );
        assert!(!request.is_authenticated());
    }

    #[test]
    fn test_response_success_with_null_error() {
        let response: Response = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "error": null,
            "result": {"actionids": ["17"]},
            "id": 3
        }))
        .unwrap();

        assert!(!response.is_error());
        assert!(response.echoes(3));
        assert!(!response.echoes(4));
        assert_eq!(response.into_result().unwrap(), json!({"actionids": ["17"]}));
    }

    #[test]
    fn test_response_error_promotion() {
        let response: Response = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "error": {
                "code": -32602,
                "message": "Invalid params.",
                "data": "Incorrect user name or password or account is temporarily blocked."
            },
            "id": 1
        }))
        .unwrap();

        assert!(response.is_error());
        assert_eq!(response.result, Value::Null);

        let error = response.into_result().unwrap_err();
        assert_eq!(error.code(), -32602);
        assert_eq!(error.kind(), RemoteErrorCode::InvalidParams);
        assert_eq!(
            error.to_string(),
            "-32602 (Invalid params.): Incorrect user name or password or account is temporarily blocked."
        );
    }

    #[test]
    fn test_response_parse_error_has_null_id() {
        let response: Response = serde_json::from_str(
            r#"{"jsonrpc":"2.0","error":{"code":-32700,"message":"Parse error","data":"Invalid JSON."},"id":null}"#,
        )
        .unwrap();

        assert_eq!(response.id, None);
        assert_eq!(response.error.unwrap().kind(), RemoteErrorCode::ParseError);
    }

    #[test]
    fn test_remote_error_missing_data_defaults_empty() {
        let error: RemoteError =
            serde_json::from_str(r#"{"code":-32500,"message":"Application error."}"#).unwrap();
        assert_eq!(error.data(), "");
        assert_eq!(error.to_string(), "-32500 (Application error.): ");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(RemoteErrorCode::from(-32601), RemoteErrorCode::MethodNotFound);
        assert_eq!(RemoteErrorCode::from(-1), RemoteErrorCode::Other(-1));
        assert_eq!(RemoteErrorCode::SystemError.code(), -32400);
        assert_eq!(
            RemoteErrorCode::ApplicationError.to_string(),
            "Application error (-32500)"
        );
    }
}
