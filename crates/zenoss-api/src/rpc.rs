// JSON-RPC wire types
//
// Every router call is a batch of exactly one envelope:
// ```json
// [{ "action": "DeviceRouter", "method": "getDevices", "data": [...], "type": "rpc", "tid": 1 }]
// ```
// and every answer is an object carrying a `result` payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single router call.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    pub action: &'a str,
    pub method: &'a str,
    pub data: &'a [Value],
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub tid: u64,
}

impl<'a> RpcRequest<'a> {
    pub fn new(action: &'a str, method: &'a str, data: &'a [Value], tid: u64) -> Self {
        Self {
            action,
            method,
            data,
            kind: "rpc",
            tid,
        }
    }
}

/// The response wrapper; only `result` is consumed.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: T,
}

/// `result` payload of `DeviceRouter.getDevices`.
///
/// Device records are opaque and passed through untouched. The remaining
/// fields default because a failed page only carries `success` and `msg`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePage {
    pub success: bool,
    #[serde(default)]
    pub total_count: usize,
    /// Opaque token, passed through whatever its JSON type.
    #[serde(default)]
    pub hash: Option<Value>,
    #[serde(default)]
    pub devices: Vec<Value>,
    #[serde(default)]
    pub msg: Option<String>,
}
