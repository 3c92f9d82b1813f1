//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use eos_config::ConfigError;
use eos_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach eAPI at {target}")]
    #[diagnostic(
        code(eosctl::connection_failed),
        help(
            "Check that `management api http-commands` is enabled and reachable.\n\
             Reason: {reason}\n\
             Try: eosctl running-config --address <switch> --insecure"
        )
    )]
    ConnectionFailed { target: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(eosctl::auth_failed),
        help(
            "Verify the username and password for this switch.\n\
             Run: eosctl config set-password --profile <name>\n\
             Or set EOS_PASSWORD."
        )
    )]
    AuthFailed { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource} '{name}' not found")]
    #[diagnostic(
        code(eosctl::not_found),
        help("List what the switch has with the matching `list` subcommand.")
    )]
    NotFound { resource: String, name: String },

    // ── Switch-side failures ─────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(eosctl::rejected), help("Switch said:\n{details}"))]
    Rejected { message: String, details: String },

    #[error("{resource}: '{property}' cannot be changed on EOS")]
    #[diagnostic(
        code(eosctl::unsupported),
        help("Leave '{property}' unset to stop managing it.")
    )]
    Unsupported { resource: String, property: String },

    #[error("Unexpected eAPI response: {message}")]
    #[diagnostic(code(eosctl::protocol))]
    Protocol { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(eosctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(eosctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: eosctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No switch configured")]
    #[diagnostic(
        code(eosctl::no_config),
        help(
            "Create a profile with: eosctl config init\n\
             Or pass --address.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(eosctl::config))]
    Config(ConfigError),

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(eosctl::timeout),
        help("Increase the timeout with --timeout or check switch responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid manifest {path}: {reason}")]
    #[diagnostic(
        code(eosctl::manifest),
        help("A manifest is a YAML or JSON list of resources, each with a `kind` field.")
    )]
    Manifest { path: String, reason: String },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NoConfig { .. } | Self::Manifest { .. } => {
                exit_code::USAGE
            }
            Self::Protocol { .. }
            | Self::Config(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Yaml(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { target, reason } => {
                CliError::ConnectionFailed { target, reason }
            }
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::NotFound { resource, name } => CliError::NotFound { resource, name },
            CoreError::Unsupported { resource, property } => {
                CliError::Unsupported { resource, property }
            }
            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Rejected {
                message, details, ..
            } => CliError::Rejected {
                message,
                details: if details.is_empty() {
                    "(no details)".into()
                } else {
                    details.join("\n")
                },
            },
            CoreError::Protocol(message) => CliError::Protocol { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_keeps_device_text_in_help() {
        let err = CliError::from(CoreError::Rejected {
            message: "could not destroy vlan 10".into(),
            details: vec!["VLAN 10 is in use".into()],
            code: Some(1002),
        });
        assert_eq!(err.exit_code(), exit_code::REJECTED);
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("VLAN 10 is in use"));
    }

    #[test]
    fn exit_codes_follow_failure_class() {
        let timeout = CliError::from(CoreError::Timeout { timeout_secs: 5 });
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let unsupported = CliError::from(CoreError::Unsupported {
            resource: "snmp_settings".into(),
            property: "enable".into(),
        });
        assert_eq!(unsupported.exit_code(), exit_code::UNSUPPORTED);

        let missing = CliError::from(ConfigError::UnknownProfile {
            name: "spine1".into(),
        });
        assert_eq!(missing.exit_code(), exit_code::GENERAL);
        assert_ne!(exit_code::SUCCESS, missing.exit_code());
    }
}
