// Transport configuration and the two eAPI carriers.
//
// TCP targets go through a `reqwest::Client`. `unix://` targets speak
// HTTP/1.1 directly over a `UnixStream` via hyper, since reqwest has no
// Unix socket connector. Both carriers POST the same JSON body to the
// same fixed path.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::client::conn::http1::{self, SendRequest};
use hyper::header::{CONTENT_TYPE, HOST};
use hyper::{Method, Request};
use hyper_util::rt::TokioIo;
use tokio::net::UnixStream;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;

/// Fixed request path for every eAPI call.
pub const COMMAND_API_PATH: &str = "/command-api/";

const UNIX_PREFIX: &str = "unix://";

/// TLS verification mode.
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (switches ship with self-signed certs).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("eosctl/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

// ── Endpoint ─────────────────────────────────────────────────────────

/// Where the eAPI server lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// HTTP(S) over TCP. The URL already points at `/command-api/`.
    Tcp(Url),
    /// HTTP over a local Unix domain socket.
    Unix(PathBuf),
}

impl Endpoint {
    /// Interpret a configured address.
    ///
    /// `unix:///var/run/command-api.sock` selects the socket transport and
    /// ignores `port`. Anything else is a hostname or IP literal; a full
    /// `http(s)://` URL is also accepted as-is.
    pub fn parse(address: &str, port: Option<u16>, use_tls: bool) -> Result<Self, Error> {
        if let Some(path) = address.strip_prefix(UNIX_PREFIX) {
            if path.is_empty() {
                return Err(Error::Validation(format!(
                    "socket path missing in address '{address}'"
                )));
            }
            return Ok(Self::Unix(PathBuf::from(path)));
        }

        let mut url = if address.contains("://") {
            Url::parse(address)?
        } else {
            let scheme = if use_tls { "https" } else { "http" };
            Url::parse(&format!("{scheme}://{address}"))?
        };
        if let Some(port) = port {
            url.set_port(Some(port))
                .map_err(|()| Error::Validation(format!("cannot set port on '{address}'")))?;
        }
        url.set_path(COMMAND_API_PATH);
        Ok(Self::Tcp(url))
    }

    pub fn is_unix(&self) -> bool {
        matches!(self, Self::Unix(_))
    }
}

// ── Unix socket carrier ──────────────────────────────────────────────

/// A single HTTP/1.1 connection over a Unix socket, opened on first use
/// and reopened if the server closed it.
pub(crate) struct UnixConnection {
    path: PathBuf,
    sender: Mutex<Option<SendRequest<Full<Bytes>>>>,
}

impl UnixConnection {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            sender: Mutex::new(None),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// POST `body` to `/command-api/` and return `(status, body)`.
    pub(crate) async fn post(&self, body: Vec<u8>, timeout: Duration) -> Result<(u16, Bytes), Error> {
        tokio::time::timeout(timeout, self.round_trip(body))
            .await
            .map_err(|_| Error::Timeout {
                timeout_secs: timeout.as_secs(),
            })?
    }

    async fn round_trip(&self, body: Vec<u8>) -> Result<(u16, Bytes), Error> {
        let mut guard = self.sender.lock().await;
        let sender = match guard.take() {
            Some(existing) if !existing.is_closed() => guard.insert(existing),
            stale => {
                if stale.is_some() {
                    warn!(path = %self.path.display(), "eAPI socket closed by peer, reconnecting");
                }
                guard.insert(self.connect().await?)
            }
        };

        sender.ready().await?;

        let request = Request::builder()
            .method(Method::POST)
            .uri(COMMAND_API_PATH)
            .header(HOST, "localhost")
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))?;

        let response = sender.send_request(request).await?;
        let status = response.status().as_u16();
        let bytes = response.into_body().collect().await?.to_bytes();
        Ok((status, bytes))
    }

    async fn connect(&self) -> Result<SendRequest<Full<Bytes>>, Error> {
        debug!(path = %self.path.display(), "connecting to eAPI socket");
        let stream = UnixStream::connect(&self.path).await?;
        let (sender, connection) = http1::handshake(TokioIo::new(stream)).await?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                debug!(error = %e, "eAPI socket connection ended");
            }
        });
        Ok(sender)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unix_prefix_selects_socket() {
        let ep = Endpoint::parse("unix:///var/run/command-api.sock", Some(80), false).unwrap();
        assert_eq!(ep, Endpoint::Unix(PathBuf::from("/var/run/command-api.sock")));
        assert!(ep.is_unix());
    }

    #[test]
    fn hostname_gets_scheme_port_and_path() {
        let ep = Endpoint::parse("switch1.lab", Some(8080), false).unwrap();
        assert_eq!(
            ep,
            Endpoint::Tcp(Url::parse("http://switch1.lab:8080/command-api/").unwrap())
        );

        let ep = Endpoint::parse("10.0.0.2", None, true).unwrap();
        assert_eq!(
            ep,
            Endpoint::Tcp(Url::parse("https://10.0.0.2/command-api/").unwrap())
        );
    }

    #[test]
    fn empty_socket_path_is_rejected() {
        assert!(matches!(
            Endpoint::parse("unix://", None, false),
            Err(Error::Validation(_))
        ));
    }
}
