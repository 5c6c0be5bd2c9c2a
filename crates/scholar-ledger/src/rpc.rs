//! JSON-RPC client for fullnode reads.
//!
//! Inspection calls are run with `sui_devInspectTransactionBlock`; object
//! inputs are first resolved with `sui_getObject` so the call can be
//! encoded.

use async_trait::async_trait;
use base64::Engine;
use scholar_core::{Address, CallDescriptor, LedgerConfig, ObjectId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::encoding::{encode_transaction_kind, ResolvedObject};
use crate::error::LedgerError;
use crate::traits::Inspector;
use crate::types::{CommandResult, InspectionResult, ReturnValue};

/// Fullnode JSON-RPC client bound to one endpoint.
pub struct SuiRpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ObjectResponse {
    data: Option<ObjectData>,
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectData {
    version: Value,
    digest: String,
    owner: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DevInspectResponse {
    #[serde(default)]
    results: Option<Vec<ExecutionResultJson>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecutionResultJson {
    #[serde(default)]
    return_values: Vec<(Vec<u8>, String)>,
}

impl<T> RpcResponse<T> {
    fn into_result(self) -> Result<T, LedgerError> {
        if let Some(err) = self.error {
            return Err(LedgerError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        self.result
            .ok_or_else(|| LedgerError::UnexpectedResponse("response has no result".into()))
    }
}

impl SuiRpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Client for the endpoint and timeout in `config`.
    pub fn from_config(config: &LedgerConfig) -> Result<Self, LedgerError> {
        Self::new(config.rpc_url(), config.request_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, LedgerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        tracing::trace!(method, id, "rpc request");
        let response: RpcResponse<T> = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response.into_result()
    }

    /// Look up the reference needed to pass `id` as a call input.
    pub async fn get_object(&self, id: &ObjectId) -> Result<ResolvedObject, LedgerError> {
        let response: ObjectResponse = self
            .call(
                "sui_getObject",
                json!([id.to_string(), { "showOwner": true }]),
            )
            .await?;
        resolve_object(*id, response)
    }

    /// Run BCS-encoded `tx_kind` without committing it.
    pub async fn dev_inspect(
        &self,
        sender: &Address,
        tx_kind: &[u8],
    ) -> Result<InspectionResult, LedgerError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(tx_kind);
        let response: DevInspectResponse = self
            .call(
                "sui_devInspectTransactionBlock",
                json!([sender.to_string(), encoded, Value::Null, Value::Null]),
            )
            .await?;
        Ok(response.into_inspection())
    }
}

#[async_trait]
impl Inspector for SuiRpcClient {
    async fn inspect(
        &self,
        call: &CallDescriptor,
        sender: &Address,
    ) -> Result<InspectionResult, LedgerError> {
        let mut objects = HashMap::new();
        for id in call.object_inputs() {
            if !objects.contains_key(id) {
                objects.insert(*id, self.get_object(id).await?);
            }
        }
        let tx_kind = encode_transaction_kind(call, &objects)?;
        self.dev_inspect(sender, &tx_kind).await
    }
}

impl DevInspectResponse {
    fn into_inspection(self) -> InspectionResult {
        let results = self
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|r| CommandResult {
                return_values: r
                    .return_values
                    .into_iter()
                    .map(|(bytes, type_tag)| ReturnValue { bytes, type_tag })
                    .collect(),
            })
            .collect();
        InspectionResult {
            results,
            error: self.error,
        }
    }
}

/// Numbers arrive either as JSON numbers or as decimal strings.
fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn resolve_object(id: ObjectId, response: ObjectResponse) -> Result<ResolvedObject, LedgerError> {
    let resolution_error = |reason: String| LedgerError::ObjectResolution { id, reason };

    let data = match (response.data, response.error) {
        (Some(data), _) => data,
        (None, Some(err)) => return Err(resolution_error(err.to_string())),
        (None, None) => return Err(resolution_error("object not found".into())),
    };

    let shared_version = data
        .owner
        .as_ref()
        .and_then(|owner| owner.get("Shared"))
        .map(|shared| {
            shared
                .get("initial_shared_version")
                .and_then(as_u64)
                .ok_or_else(|| resolution_error("shared owner without initial version".into()))
        })
        .transpose()?;

    if let Some(initial_shared_version) = shared_version {
        return Ok(ResolvedObject::Shared {
            id,
            initial_shared_version,
        });
    }

    let version =
        as_u64(&data.version).ok_or_else(|| resolution_error("invalid object version".into()))?;
    let digest = bs58::decode(&data.digest)
        .into_vec()
        .map_err(|e| resolution_error(format!("invalid object digest: {}", e)))?;
    Ok(ResolvedObject::Owned {
        id,
        version,
        digest,
    })
}
