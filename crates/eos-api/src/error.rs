use thiserror::Error;

/// Top-level error type for the `eos-api` crate.
///
/// Covers every failure mode between the caller and the switch: local
/// validation, transport (TCP or Unix socket), the eAPI envelope itself,
/// and parsing of text-format command output. `eos-core` maps these into
/// user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Validation ──────────────────────────────────────────────────
    /// A local precondition failed before anything was sent to the device.
    #[error("{0}")]
    Validation(String),

    // ── Authentication ──────────────────────────────────────────────
    /// The eAPI endpoint rejected the basic-auth credentials.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Unix domain socket I/O error.
    #[error("Unix socket error: {0}")]
    Socket(#[from] std::io::Error),

    /// HTTP/1.1 protocol error on a Unix socket connection.
    #[error("HTTP connection error: {0}")]
    Http(#[from] hyper::Error),

    /// Failed to assemble an HTTP request for the Unix socket transport.
    #[error("Invalid HTTP request: {0}")]
    Request(#[from] hyper::http::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-success HTTP status that carries no JSON-RPC envelope.
    #[error("HTTP {status} from eAPI: {body}")]
    HttpStatus { status: u16, body: String },

    // ── eAPI ────────────────────────────────────────────────────────
    /// The device rejected a command batch. `messages` holds every
    /// per-command error string, in order.
    #[error("could not {action}: {}", .messages.join(", "))]
    OperationFailed {
        action: String,
        messages: Vec<String>,
        code: Option<i64>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Text-format command output did not match the expected grammar.
    #[error("{message}")]
    Parse { message: String, input: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// Nothing in this crate retries; the hint is for callers.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Socket(e) => matches!(
                e.kind(),
                std::io::ErrorKind::ConnectionRefused
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::BrokenPipe
            ),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Per-command messages reported by the device, if this is a device failure.
    pub fn device_messages(&self) -> &[String] {
        match self {
            Self::OperationFailed { messages, .. } => messages,
            _ => &[],
        }
    }

    /// The JSON-RPC error code, if the device returned one.
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            Self::OperationFailed { code, .. } => *code,
            _ => None,
        }
    }

    pub(crate) fn parse(message: impl Into<String>, input: &str) -> Self {
        Self::Parse {
            message: message.into(),
            input: input.to_owned(),
        }
    }
}
