// JSON-RPC envelope types for eAPI `runCmds`
//
// Every request is a single `runCmds` call carrying an ordered command
// batch. The response carries either one `result` entry per command or an
// `error` object whose `data` array holds the partial per-command results,
// with failed commands marked by an `errors` list.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display};

// ── Request ──────────────────────────────────────────────────────────

/// Output format requested from the device.
///
/// Several `show` commands have no JSON model on EOS and only work as
/// `text`; their output lands in each result's `output` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Text,
}

/// Per-call options for [`EosClient::send`](crate::EosClient::send).
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Request identifier. A UUID v4 is generated when `None`.
    pub id: Option<String>,
    pub format: Format,
}

impl RequestOptions {
    pub fn text() -> Self {
        Self {
            id: None,
            format: Format::Text,
        }
    }
}

/// `{"jsonrpc":"2.0","method":"runCmds","params":{...},"id":...}`
#[derive(Debug, Clone, Serialize)]
pub struct RunCmdsRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: RunCmdsParams<'a>,
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunCmdsParams<'a> {
    pub version: u8,
    pub cmds: &'a [String],
    pub format: Format,
}

impl<'a> RunCmdsRequest<'a> {
    pub fn new(cmds: &'a [String], options: &RequestOptions) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "runCmds",
            params: RunCmdsParams {
                version: 1,
                cmds,
                format: options.format,
            },
            id: options
                .id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────

/// Decoded `runCmds` response. Exactly one of `result` / `error` is set
/// by a well-behaved server.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Vec<Value>>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    /// Partial results, one per command that ran before (and including)
    /// the failing one.
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}

impl RpcError {
    /// Every `errors` string across all `data` entries, in command order.
    pub fn device_messages(&self) -> Vec<String> {
        self.data
            .iter()
            .flatten()
            .filter_map(|entry| entry.get("errors").and_then(Value::as_array))
            .flatten()
            .filter_map(|msg| msg.as_str().map(str::to_owned))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_envelope_shape() {
        let cmds = vec!["enable".to_owned(), "show vlan".to_owned()];
        let opts = RequestOptions {
            id: Some("req-1".into()),
            format: Format::Json,
        };
        let body = serde_json::to_value(RunCmdsRequest::new(&cmds, &opts)).unwrap_or_default();
        assert_eq!(
            body,
            json!({
                "jsonrpc": "2.0",
                "method": "runCmds",
                "params": { "version": 1, "cmds": ["enable", "show vlan"], "format": "json" },
                "id": "req-1"
            })
        );
    }

    #[test]
    fn generated_ids_are_unique() {
        let cmds = vec!["show version".to_owned()];
        let a = RunCmdsRequest::new(&cmds, &RequestOptions::text());
        let b = RunCmdsRequest::new(&cmds, &RequestOptions::text());
        assert_ne!(a.id, b.id);
        assert_eq!(a.params.format, Format::Text);
    }

    #[test]
    fn device_messages_skip_successful_entries() {
        let err: RpcError = serde_json::from_value(json!({
            "code": 1002,
            "message": "CLI command 3 of 3 'no vlan foo' failed: invalid command",
            "data": [
                {},
                {},
                { "errors": ["Invalid input (at token 2: 'foo')"] }
            ]
        }))
        .unwrap_or_else(|e| panic!("fixture should decode: {e}"));
        assert_eq!(err.device_messages(), vec!["Invalid input (at token 2: 'foo')"]);
    }

    #[test]
    fn missing_data_yields_no_messages() {
        let err = RpcError {
            code: None,
            message: None,
            data: None,
        };
        assert!(err.device_messages().is_empty());
    }
}
