// eAPI client
//
// Owns the transport (lazily built reqwest client or a Unix socket
// connection), the `runCmds` envelope round trip, and the action
// dispatcher that turns device-side failures into `Error::OperationFailed`.
// Feature endpoints (vlans, snmp, aaa, ...) live in their own files as
// inherent methods so this module stays focused on transport mechanics.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::rpc::{Format, RequestOptions, RpcResponse, RunCmdsRequest};
use crate::transport::{Endpoint, TransportConfig, UnixConnection};

const DEFAULT_USERNAME: &str = "admin";
const UNKNOWN_ERROR: &str = "unknown error";

/// Connection settings for one switch. Passed explicitly at construction;
/// the client never reads the environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Hostname, IP literal, full URL, or `unix:///path/to/socket`.
    pub address: String,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub use_tls: bool,
    pub transport: TransportConfig,
}

impl ClientConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            port: None,
            username: Some(DEFAULT_USERNAME.into()),
            password: None,
            use_tls: false,
            transport: TransportConfig::default(),
        }
    }
}

enum Carrier {
    Tcp {
        url: Url,
        http: OnceCell<reqwest::Client>,
    },
    Unix(UnixConnection),
}

/// Async client for the EOS command API.
///
/// Every call is one `runCmds` request carrying an ordered batch. Calls are
/// independent; there is no session state beyond the memoized connection.
pub struct EosClient {
    carrier: Carrier,
    transport: TransportConfig,
    username: Option<String>,
    password: Option<SecretString>,
}

impl EosClient {
    /// Create a client. No connection is made until the first request.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let endpoint = Endpoint::parse(&config.address, config.port, config.use_tls)?;
        let carrier = match endpoint {
            Endpoint::Tcp(url) => Carrier::Tcp {
                url,
                http: OnceCell::new(),
            },
            Endpoint::Unix(path) => Carrier::Unix(UnixConnection::new(path)),
        };
        Ok(Self {
            carrier,
            transport: config.transport,
            username: config.username,
            password: config.password,
        })
    }

    /// Create a TCP client around a pre-built `reqwest::Client`.
    ///
    /// `base_url` is the server root; `/command-api/` is appended.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &Url,
        username: Option<String>,
        password: Option<SecretString>,
    ) -> Result<Self, Error> {
        let url = base_url.join(crate::transport::COMMAND_API_PATH)?;
        Ok(Self {
            carrier: Carrier::Tcp {
                url,
                http: OnceCell::new_with(Some(http)),
            },
            transport: TransportConfig::default(),
            username,
            password,
        })
    }

    /// Human-readable target, for logs and error context.
    pub fn target(&self) -> String {
        match &self.carrier {
            Carrier::Tcp { url, .. } => url.to_string(),
            Carrier::Unix(conn) => format!("unix://{}", conn.path().display()),
        }
    }

    // ── Transport ────────────────────────────────────────────────────

    /// Send one `runCmds` call and decode the envelope.
    ///
    /// Does not interpret the envelope: a device-side `error` comes back
    /// inside `Ok`. Use [`perform`](Self::perform) for the error contract.
    pub async fn send(&self, cmds: &[String], options: &RequestOptions) -> Result<RpcResponse, Error> {
        let request = RunCmdsRequest::new(cmds, options);
        let body = serde_json::to_vec(&request).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: String::new(),
        })?;

        debug!(
            id = %request.id,
            commands = cmds.len(),
            format = %options.format,
            "runCmds"
        );
        trace!(?cmds, "runCmds batch");

        let (status, text) = match &self.carrier {
            Carrier::Tcp { url, http } => {
                let http = http
                    .get_or_try_init(|| async { self.transport.build_client() })
                    .await?;
                let mut req = http
                    .post(url.clone())
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(body);
                if let (Some(user), Some(pass)) = (&self.username, &self.password) {
                    req = req.basic_auth(user, Some(pass.expose_secret()));
                }
                let resp = req.send().await.map_err(Error::Transport)?;
                let status = resp.status().as_u16();
                (status, resp.text().await.map_err(Error::Transport)?)
            }
            Carrier::Unix(conn) => {
                let (status, bytes) = conn.post(body, self.transport.timeout).await?;
                (status, String::from_utf8_lossy(&bytes).into_owned())
            }
        };

        trace!(status, body = %text, "runCmds response");
        Self::decode(status, &text)
    }

    fn decode(status: u16, body: &str) -> Result<RpcResponse, Error> {
        if status == 401 {
            return Err(Error::Authentication {
                message: "eAPI rejected the configured credentials".into(),
            });
        }

        match serde_json::from_str::<RpcResponse>(body) {
            Ok(resp) => Ok(resp),
            Err(_) if !(200..300).contains(&status) => Err(Error::HttpStatus {
                status,
                body: body.chars().take(200).collect(),
            }),
            Err(e) => Err(Error::Deserialization {
                message: e.to_string(),
                body: body.to_owned(),
            }),
        }
    }

    // ── Action dispatcher ────────────────────────────────────────────

    /// Run a batch and apply the error contract.
    ///
    /// On success returns the per-command `result` array unchanged. On a
    /// device error returns `Error::OperationFailed` carrying `action` and
    /// every per-command error string.
    pub async fn perform(
        &self,
        cmds: &[String],
        action: &str,
        format: Format,
    ) -> Result<Vec<Value>, Error> {
        let options = RequestOptions { id: None, format };
        let response = self.send(cmds, &options).await?;

        if let Some(err) = response.error {
            let mut messages = err.device_messages();
            if messages.is_empty() {
                messages.push(UNKNOWN_ERROR.to_owned());
            }
            debug!(action, ?messages, "device rejected batch");
            return Err(Error::OperationFailed {
                action: action.to_owned(),
                messages,
                code: err.code,
            });
        }

        Ok(response.result.unwrap_or_default())
    }

    /// Run a text-format batch and return each command's `output`.
    pub async fn perform_text(&self, cmds: &[String], action: &str) -> Result<Vec<String>, Error> {
        self.perform(cmds, action, Format::Text)
            .await?
            .into_iter()
            .map(|entry| match entry.get("output").and_then(Value::as_str) {
                Some(out) => Ok(out.to_owned()),
                None => Err(Error::Deserialization {
                    message: format!("missing 'output' in text result for '{action}'"),
                    body: entry.to_string(),
                }),
            })
            .collect()
    }

    /// Text output of the final command in a batch.
    pub(crate) async fn last_output(&self, cmds: &[String], action: &str) -> Result<String, Error> {
        let mut outputs = self.perform_text(cmds, action).await?;
        outputs.pop().ok_or_else(|| Error::Deserialization {
            message: format!("empty result for '{action}'"),
            body: String::new(),
        })
    }

    /// Decode the final command's JSON result into `T`.
    pub(crate) async fn last_json<T: DeserializeOwned>(
        &self,
        cmds: &[String],
        action: &str,
    ) -> Result<T, Error> {
        let last = self
            .perform(cmds, action, Format::Json)
            .await?
            .pop()
            .unwrap_or(Value::Null);
        serde_json::from_value(last.clone()).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: last.to_string(),
        })
    }

    /// Run a configuration batch, discarding results.
    pub(crate) async fn configure(&self, cmds: &[String], action: &str) -> Result<(), Error> {
        self.perform(cmds, action, Format::Json).await.map(|_| ())
    }
}

// ── Batch builders ───────────────────────────────────────────────────

/// `["enable", "configure", ...cmds]`
pub(crate) fn config_batch<I, S>(cmds: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ["enable".to_owned(), "configure".to_owned()]
        .into_iter()
        .chain(cmds.into_iter().map(Into::into))
        .collect()
}

/// `["enable", ...cmds]`
pub(crate) fn exec_batch<I, S>(cmds: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    std::iter::once("enable".to_owned())
        .chain(cmds.into_iter().map(Into::into))
        .collect()
}

/// Prefix `no ` when `enabled` is false.
pub(crate) fn negate(enabled: bool, cmd: &str) -> String {
    if enabled {
        cmd.to_owned()
    } else {
        format!("no {cmd}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_batch_enters_configure_mode_first() {
        assert_eq!(
            config_batch(["vlan 10", "name web"]),
            vec!["enable", "configure", "vlan 10", "name web"]
        );
        assert_eq!(exec_batch(["show running-config"]), vec!["enable", "show running-config"]);
    }

    #[test]
    fn decode_maps_unauthorized() {
        assert!(matches!(
            EosClient::decode(401, "Unauthorized"),
            Err(Error::Authentication { .. })
        ));
    }

    #[test]
    fn decode_non_json_error_status() {
        match EosClient::decode(500, "<html>boom</html>") {
            Err(Error::HttpStatus { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("boom"));
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[test]
    fn decode_garbage_body_on_success() {
        assert!(matches!(
            EosClient::decode(200, "not json"),
            Err(Error::Deserialization { .. })
        ));
    }
}
