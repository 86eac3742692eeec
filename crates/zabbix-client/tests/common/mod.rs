//! Common test utilities for integration tests
//!
//! - [`MockZabbix`]: wiremock server answering individual methods with canned
//!   results or errors, echoing each request's correlation id
//! - [`FakeZabbix`]: stateful responder that stores objects like the real
//!   frontend, for lifecycle scenarios
//! - [`RecordingTransport`]: in-memory transport that records every envelope

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};
use zabbix_client::{Client, HttpTransport, Transport, TransportError};

pub const API_PATH: &str = "/api_jsonrpc.php";
pub const ADMIN_TOKEN: &str = "0424bd59b807674191e7d77572075f33";

/// Route tracing output through the test harness, once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zabbix_client=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// The correlation id of a captured request, `null` if it has none.
pub fn request_id(request: &Request) -> Value {
    request
        .body_json::<Value>()
        .ok()
        .and_then(|body| body.get("id").cloned())
        .unwrap_or(Value::Null)
}

pub fn success_body(result: Value, id: Value) -> Value {
    json!({"jsonrpc": "2.0", "result": result, "id": id})
}

pub fn error_body(code: i64, message: &str, data: &str, id: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "error": {"code": code, "message": message, "data": data},
        "id": id
    })
}

/// Answers with a fixed result under the request's own id.
pub struct RpcResult(pub Value);

impl Respond for RpcResult {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(success_body(self.0.clone(), request_id(request)))
    }
}

/// Answers with a fixed remote error under the request's own id.
pub struct RpcError {
    pub code: i64,
    pub message: &'static str,
    pub data: &'static str,
}

impl Respond for RpcError {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(error_body(
            self.code,
            self.message,
            self.data,
            request_id(request),
        ))
    }
}

/// Wiremock server speaking the Zabbix envelope
pub struct MockZabbix {
    pub server: MockServer,
}

impl MockZabbix {
    pub async fn start() -> Self {
        init_tracing();
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn url(&self) -> String {
        format!("{}{API_PATH}", self.server.uri())
    }

    pub fn client(&self) -> Client<HttpTransport> {
        Client::from_url(self.url()).unwrap()
    }

    /// Answer `rpc_method` with `result`
    pub async fn mock_result(&self, rpc_method: &str, result: Value) {
        Mock::given(method("POST"))
            .and(path(API_PATH))
            .and(body_partial_json(json!({"method": rpc_method})))
            .respond_with(RpcResult(result))
            .mount(&self.server)
            .await;
    }

    /// Answer `rpc_method` with a remote error
    pub async fn mock_error(
        &self,
        rpc_method: &str,
        code: i64,
        message: &'static str,
        data: &'static str,
    ) {
        Mock::given(method("POST"))
            .and(path(API_PATH))
            .and(body_partial_json(json!({"method": rpc_method})))
            .respond_with(RpcError {
                code,
                message,
                data,
            })
            .mount(&self.server)
            .await;
    }

    /// Answer `rpc_method` with an arbitrary HTTP response
    pub async fn mock_raw(&self, rpc_method: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(API_PATH))
            .and(body_partial_json(json!({"method": rpc_method})))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Request bodies received so far, in arrival order
    pub async fn bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.body_json::<Value>().unwrap())
            .collect()
    }

    /// Request bodies received for `rpc_method`
    pub async fn bodies_for(&self, rpc_method: &str) -> Vec<Value> {
        self.bodies()
            .await
            .into_iter()
            .filter(|body| body["method"] == rpc_method)
            .collect()
    }
}

#[derive(Debug, Default)]
struct FakeState {
    next_id: u64,
    /// prefix -> id -> stored object (without its id field)
    objects: BTreeMap<String, BTreeMap<String, Value>>,
    calls: Vec<String>,
}

/// Stateful stand-in for a Zabbix frontend.
///
/// Supports `user.authenticate`, `apiinfo.version` and the four CRUD methods
/// for any `<prefix>`; ids are reported under `<prefix>ids`. Every other call
/// must carry the token returned by login.
#[derive(Clone)]
pub struct FakeZabbix {
    user: &'static str,
    password: &'static str,
    state: Arc<Mutex<FakeState>>,
}

impl FakeZabbix {
    pub fn new(user: &'static str, password: &'static str) -> Self {
        Self {
            user,
            password,
            state: Arc::new(Mutex::new(FakeState {
                next_id: 100,
                ..Default::default()
            })),
        }
    }

    /// Serve this fake from a fresh wiremock server
    pub async fn start(self) -> (MockServer, Self) {
        init_tracing();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(API_PATH))
            .respond_with(self.clone())
            .mount(&server)
            .await;
        (server, self)
    }

    /// Methods called so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    /// Number of stored objects of `prefix`
    pub fn stored(&self, prefix: &str) -> usize {
        self.state.lock().objects.get(prefix).map_or(0, BTreeMap::len)
    }

    fn handle(&self, body: &Value) -> Result<Value, (i64, &'static str, String)> {
        let rpc_method = body["method"].as_str().unwrap_or_default();
        let params = &body["params"];
        let mut state = self.state.lock();
        state.calls.push(rpc_method.to_string());

        match rpc_method {
            "apiinfo.version" => return Ok(json!("6.0.21")),
            "user.authenticate" => {
                return if params["user"] == self.user && params["password"] == self.password {
                    Ok(json!(ADMIN_TOKEN))
                } else {
                    Err((
                        -32602,
                        "Invalid params.",
                        "Login name or password is incorrect.".to_string(),
                    ))
                };
            }
            _ => {}
        }

        if body.get("auth").and_then(Value::as_str) != Some(ADMIN_TOKEN) {
            return Err((
                -32602,
                "Invalid params.",
                "Session terminated, re-login, please.".to_string(),
            ));
        }

        let Some((prefix, operation)) = rpc_method.split_once('.') else {
            return Err((-32601, "Method not found.", rpc_method.to_string()));
        };
        let id_field = format!("{prefix}id");
        let ids_key = format!("{prefix}ids");

        match operation {
            "create" => {
                let records = params.as_array().cloned().unwrap_or_default();
                let mut ids = Vec::with_capacity(records.len());
                for mut record in records {
                    state.next_id += 1;
                    let id = state.next_id.to_string();
                    if let Some(object) = record.as_object_mut() {
                        object.remove(&id_field);
                    }
                    state
                        .objects
                        .entry(prefix.to_string())
                        .or_default()
                        .insert(id.clone(), record);
                    ids.push(json!(id));
                }
                Ok(json!({ ids_key: ids }))
            }
            "get" => {
                let wanted: Option<Vec<String>> = match &params[&ids_key] {
                    Value::Null => None,
                    Value::String(id) => Some(vec![id.clone()]),
                    Value::Array(ids) => Some(
                        ids.iter()
                            .filter_map(|id| id.as_str().map(str::to_string))
                            .collect(),
                    ),
                    other => Some(vec![other.to_string()]),
                };
                let found: Vec<Value> = state
                    .objects
                    .get(prefix)
                    .into_iter()
                    .flat_map(|objects| objects.iter())
                    .filter(|(id, _)| wanted.as_ref().is_none_or(|wanted| wanted.contains(*id)))
                    .map(|(id, object)| {
                        let mut object = object.clone();
                        object[&id_field] = json!(id);
                        object
                    })
                    .collect();
                Ok(Value::Array(found))
            }
            "update" => {
                let records = params.as_array().cloned().unwrap_or_default();
                let objects = state.objects.entry(prefix.to_string()).or_default();
                let mut ids = Vec::new();
                for record in records {
                    let Some(id) = record[&id_field].as_str().map(str::to_string) else {
                        return Err((-32602, "Invalid params.", format!("No {id_field}.")));
                    };
                    let Some(stored) = objects.get_mut(&id) else {
                        return Err((
                            -32500,
                            "Application error.",
                            "No permissions to referred object or it does not exist!".into(),
                        ));
                    };
                    if let (Some(stored), Some(fields)) = (stored.as_object_mut(), record.as_object())
                    {
                        for (key, value) in fields {
                            if *key != id_field {
                                stored.insert(key.clone(), value.clone());
                            }
                        }
                    }
                    ids.push(json!(id));
                }
                Ok(json!({ ids_key: ids }))
            }
            "delete" => {
                let ids = params.as_array().cloned().unwrap_or_default();
                let objects = state.objects.entry(prefix.to_string()).or_default();
                // Unknown ids are skipped, so a stale id yields a short list
                let deleted: Vec<Value> = ids
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|id| objects.remove(*id).is_some())
                    .map(|id| json!(id))
                    .collect();
                Ok(json!({ ids_key: deleted }))
            }
            _ => Err((-32601, "Method not found.", rpc_method.to_string())),
        }
    }
}

impl Respond for FakeZabbix {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(body) = request.body_json::<Value>() else {
            return ResponseTemplate::new(200).set_body_json(error_body(
                -32700,
                "Parse error",
                "Invalid JSON.",
                Value::Null,
            ));
        };
        let id = body["id"].clone();
        let reply = match self.handle(&body) {
            Ok(result) => success_body(result, id),
            Err((code, message, data)) => error_body(code, message, &data, id),
        };
        ResponseTemplate::new(200).set_body_json(reply)
    }
}

/// In-memory transport that records envelopes and answers with `result`.
#[derive(Debug)]
pub struct RecordingTransport {
    result: Value,
    pub requests: Mutex<Vec<Value>>,
}

impl RecordingTransport {
    pub fn new(result: Value) -> Self {
        Self {
            result,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Correlation ids seen so far, in arrival order
    pub fn ids(&self) -> Vec<u64> {
        self.requests
            .lock()
            .iter()
            .filter_map(|request| request["id"].as_u64())
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn post(
        &self,
        body: Bytes,
    ) -> Pin<Box<dyn Future<Output = Result<Bytes, TransportError>> + Send + '_>> {
        Box::pin(async move {
            let request: Value = serde_json::from_slice(&body)
                .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;
            let reply = success_body(self.result.clone(), request["id"].clone());
            self.requests.lock().push(request);
            tokio::task::yield_now().await;
            Ok(Bytes::from(serde_json::to_vec(&reply).unwrap()))
        })
    }
}
