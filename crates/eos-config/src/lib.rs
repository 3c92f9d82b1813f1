//! Shared configuration for eosctl.
//!
//! TOML switch profiles, password resolution (env + keyring + plaintext),
//! and translation to `eos_core::ClientConfig`. The CLI layers its
//! `GlobalOpts` overrides on top of what this crate resolves.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use eos_core::{ClientConfig, TlsMode, TransportConfig};

/// Service name for keyring entries.
pub const KEYRING_SERVICE: &str = "eosctl";

/// Password variable consulted when a profile names none of its own.
pub const PASSWORD_ENV: &str = "EOS_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named switch profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up `name`, or the default profile when `name` is `None`.
    pub fn profile(&self, name: Option<&str>) -> Result<(&str, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named switch profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Hostname, IP, URL, or `unix:///var/run/command-api.sock`.
    pub address: String,

    /// eAPI port; defaults to 80 / 443 by scheme.
    pub port: Option<u16>,

    /// Basic-auth user.
    pub username: Option<String>,

    /// Plaintext password (prefer keyring or an env var).
    pub password: Option<String>,

    /// Environment variable holding the password.
    pub password_env: Option<String>,

    /// Use HTTPS instead of HTTP.
    #[serde(default)]
    pub use_tls: bool,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override certificate verification.
    pub insecure: Option<bool>,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("net", "eos", "eosctl").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("eosctl");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit TOML path, still merging `EOS_*` variables.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("EOS_").only(&["default_profile"]));

    Ok(figment.extract()?)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Password resolution ─────────────────────────────────────────────

/// Keyring account for a profile's password.
pub fn keyring_account(profile_name: &str) -> String {
    format!("{profile_name}/password")
}

/// Resolve a profile's password: `password_env` → `EOS_PASSWORD` →
/// system keyring → plaintext. `None` means the client sends no basic auth.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    resolve_password_with(
        profile,
        profile_name,
        |var| std::env::var(var).ok(),
        |account| {
            keyring::Entry::new(KEYRING_SERVICE, account)
                .and_then(|entry| entry.get_password())
                .ok()
        },
    )
}

fn resolve_password_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Option<SecretString> {
    profile
        .password_env
        .as_deref()
        .and_then(&env)
        .or_else(|| env(PASSWORD_ENV))
        .or_else(|| keyring(&keyring_account(profile_name)))
        .or_else(|| profile.password.clone())
        .map(SecretString::from)
}

/// Store a password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &keyring_account(profile_name))
        .and_then(|entry| entry.set_password(password))
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })
}

// ── Translation to ClientConfig ─────────────────────────────────────

/// Build a `ClientConfig` from a profile with no CLI overrides.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<ClientConfig, ConfigError> {
    if profile.address.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "address".into(),
            reason: format!("profile '{profile_name}' has no address"),
        });
    }

    let tls = match (profile.insecure, &profile.ca_cert) {
        (Some(true), _) => TlsMode::DangerAcceptInvalid,
        (_, Some(ca)) => TlsMode::CustomCa(ca.clone()),
        (Some(false), None) => TlsMode::System,
        // switches ship self-signed certificates
        (None, None) => TlsMode::DangerAcceptInvalid,
    };

    let mut config = ClientConfig::new(profile.address.clone());
    config.port = profile.port;
    if profile.username.is_some() {
        config.username.clone_from(&profile.username);
    }
    config.password = resolve_password(profile, profile_name);
    config.use_tls = profile.use_tls;
    config.transport = TransportConfig {
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout)),
    };
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn exposed(secret: Option<SecretString>) -> Option<String> {
        secret.map(|s| s.expose_secret().to_owned())
    }

    #[test]
    fn password_chain_order() {
        let mut profile = Profile {
            address: "veos".into(),
            password_env: Some("VEOS_PW".into()),
            password: Some("plain".into()),
            ..Profile::default()
        };

        let env = |var: &str| match var {
            "VEOS_PW" => Some("from-profile-env".to_owned()),
            PASSWORD_ENV => Some("from-eos-password".to_owned()),
            _ => None,
        };
        let keyring = |_: &str| Some("from-keyring".to_owned());
        let none = |_: &str| None;

        assert_eq!(
            exposed(resolve_password_with(&profile, "lab", env, keyring)).as_deref(),
            Some("from-profile-env")
        );

        profile.password_env = None;
        assert_eq!(
            exposed(resolve_password_with(&profile, "lab", env, keyring)).as_deref(),
            Some("from-eos-password")
        );
        assert_eq!(
            exposed(resolve_password_with(&profile, "lab", none, keyring)).as_deref(),
            Some("from-keyring")
        );
        assert_eq!(
            exposed(resolve_password_with(&profile, "lab", none, none)).as_deref(),
            Some("plain")
        );

        profile.password = None;
        assert!(resolve_password_with(&profile, "lab", none, none).is_none());
    }

    #[test]
    fn keyring_lookup_uses_profile_account() {
        let profile = Profile::default();
        let keyring = |account: &str| (account == "core/password").then(|| "k".to_owned());
        assert!(resolve_password_with(&profile, "core", |_| None, keyring).is_some());
        assert!(resolve_password_with(&profile, "edge", |_| None, keyring).is_none());
    }

    #[test]
    fn save_then_load_round_trips_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                address: "10.0.0.5".into(),
                port: Some(8443),
                use_tls: true,
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let (name, profile) = loaded.profile(None).unwrap();
        assert_eq!(name, "default");
        assert_eq!(profile.address, "10.0.0.5");
        assert_eq!(profile.port, Some(8443));
        assert!(profile.use_tls);
        assert_eq!(loaded.defaults.timeout, 30);
    }

    #[test]
    fn missing_profile_is_reported() {
        let cfg = Config::default();
        assert!(matches!(
            cfg.profile(Some("spine1")),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn client_config_from_profile() {
        let profile = Profile {
            address: "unix:///var/run/command-api.sock".into(),
            username: Some("ops".into()),
            insecure: Some(false),
            timeout: Some(5),
            ..Profile::default()
        };
        let config = profile_to_client_config(&profile, "local").unwrap();
        assert_eq!(config.username.as_deref(), Some("ops"));
        assert_eq!(config.transport.timeout, Duration::from_secs(5));
        assert!(matches!(config.transport.tls, TlsMode::System));

        let empty = Profile::default();
        assert!(profile_to_client_config(&empty, "blank").is_err());
    }
}
