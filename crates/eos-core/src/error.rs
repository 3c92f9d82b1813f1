// ── Core error types ──
//
// User-facing errors from eos-core. Callers never see JSON-RPC envelopes or
// HTTP bodies directly; the `From<eos_api::Error>` impl folds transport and
// decode failures into a small set of variants the CLI can explain.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach eAPI at {target}: {reason}")]
    ConnectionFailed { target: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("eAPI request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{resource} '{name}' not found on the switch")]
    NotFound { resource: String, name: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("{resource}: setting '{property}' is not supported on EOS")]
    Unsupported { resource: String, property: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// The switch rejected a command batch.
    #[error("Switch rejected the change: {message}")]
    Rejected {
        message: String,
        /// Per-command error strings reported by the device.
        details: Vec<String>,
        code: Option<i64>,
    },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Unexpected eAPI response: {0}")]
    Protocol(String),
}

impl CoreError {
    pub(crate) fn unsupported(resource: &str, property: &str) -> Self {
        Self::Unsupported {
            resource: resource.into(),
            property: property.into(),
        }
    }

    pub(crate) fn not_found(resource: &str, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            name: name.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<eos_api::Error> for CoreError {
    fn from(err: eos_api::Error) -> Self {
        use eos_api::Error as Api;

        match err {
            Api::Validation(message) => CoreError::ValidationFailed { message },
            Api::Authentication { message } => CoreError::AuthenticationFailed { message },
            Api::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else {
                    CoreError::ConnectionFailed {
                        target: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            Api::Socket(e) => CoreError::ConnectionFailed {
                target: "unix socket".into(),
                reason: e.to_string(),
            },
            Api::Http(e) => CoreError::ConnectionFailed {
                target: "unix socket".into(),
                reason: e.to_string(),
            },
            Api::Request(e) => CoreError::Protocol(format!("could not build request: {e}")),
            Api::InvalidUrl(e) => CoreError::ValidationFailed {
                message: format!("invalid switch address: {e}"),
            },
            Api::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            Api::Tls(reason) => CoreError::ConnectionFailed {
                target: String::new(),
                reason: format!("TLS error: {reason}"),
            },
            Api::HttpStatus { status, body } => {
                CoreError::Protocol(format!("HTTP {status}: {body}"))
            }
            err @ Api::OperationFailed { .. } => {
                let message = err.to_string();
                let code = err.rpc_code();
                let details = err.device_messages().to_vec();
                CoreError::Rejected {
                    message,
                    details,
                    code,
                }
            }
            Api::Deserialization { message, body: _ } => CoreError::Protocol(message),
            Api::Parse { message, input: _ } => {
                CoreError::Protocol(format!("could not parse command output: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_keeps_device_messages() {
        let api = eos_api::Error::OperationFailed {
            action: "destroy vlan foo".into(),
            messages: vec!["Invalid input (at token 2: 'foo')".into()],
            code: Some(1002),
        };
        match CoreError::from(api) {
            CoreError::Rejected {
                message,
                details,
                code,
            } => {
                assert!(message.starts_with("could not destroy vlan foo"));
                assert_eq!(details.len(), 1);
                assert_eq!(code, Some(1002));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn api_validation_stays_validation() {
        let err = CoreError::from(eos_api::Error::Validation("bad".into()));
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }
}
