// NTP providers: source interface, servers, authentication keys.

use serde::{Deserialize, Serialize};

use eos_api::{EosClient, NtpAuthKey};

use crate::error::CoreError;
use crate::provider::{ApplyReport, Ensure, Provider, drift};
use crate::resources::SETTINGS;

// ── Settings ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NtpSettings {
    /// Empty string removes the source interface.
    pub source_interface: Option<String>,
}

pub struct NtpSettingsProvider<'a> {
    client: &'a EosClient,
}

impl<'a> NtpSettingsProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for NtpSettingsProvider<'_> {
    type Resource = NtpSettings;
    const KIND: &'static str = "ntp_settings";

    async fn instances(&self) -> Result<Vec<NtpSettings>, CoreError> {
        let config = self.client.ntp_config().await?;
        Ok(vec![NtpSettings {
            source_interface: Some(config.source_interface.unwrap_or_default()),
        }])
    }

    async fn apply(&self, desired: &NtpSettings) -> Result<ApplyReport, CoreError> {
        let mut report = ApplyReport::new(Self::KIND, SETTINGS);
        let current = self
            .client
            .ntp_config()
            .await?
            .source_interface
            .unwrap_or_default();

        if let Some(iface) = drift(desired.source_interface.as_deref(), Some(current.as_str())) {
            let target = (!iface.is_empty()).then_some(iface);
            self.client.ntp_set_source_interface(target).await?;
            report.set("source_interface", Some(&current), iface);
        }
        Ok(report)
    }
}

// ── Servers ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NtpServerResource {
    pub host: String,
    #[serde(default)]
    pub ensure: Ensure,
    pub prefer: Option<bool>,
}

pub struct NtpServerProvider<'a> {
    client: &'a EosClient,
}

impl<'a> NtpServerProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for NtpServerProvider<'_> {
    type Resource = NtpServerResource;
    const KIND: &'static str = "ntp_server";

    async fn instances(&self) -> Result<Vec<NtpServerResource>, CoreError> {
        Ok(self
            .client
            .ntp_config()
            .await?
            .servers
            .into_iter()
            .map(|s| NtpServerResource {
                host: s.host,
                ensure: Ensure::Present,
                prefer: Some(s.prefer),
            })
            .collect())
    }

    async fn apply(&self, desired: &NtpServerResource) -> Result<ApplyReport, CoreError> {
        let host = desired.host.as_str();
        let mut report = ApplyReport::new(Self::KIND, host);
        let current = self
            .client
            .ntp_config()
            .await?
            .servers
            .into_iter()
            .find(|s| s.host == host);

        match (desired.ensure, current) {
            (Ensure::Absent, None) => {}
            (Ensure::Absent, Some(_)) => {
                self.client.ntp_server_remove(host).await?;
                report.destroyed();
            }
            (Ensure::Present, None) => {
                self.client
                    .ntp_server_add(host, desired.prefer.unwrap_or(false))
                    .await?;
                report.created();
            }
            (Ensure::Present, Some(server)) => {
                // re-adding an existing server rewrites its options
                if let Some(&prefer) = drift(desired.prefer.as_ref(), Some(&server.prefer)) {
                    self.client.ntp_server_add(host, prefer).await?;
                    report.set("prefer", Some(&server.prefer), &prefer);
                }
            }
        }
        Ok(report)
    }
}

// ── Authentication keys ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NtpAuthKeyResource {
    pub id: u32,
    #[serde(default)]
    pub ensure: Ensure,
    /// `md5` or `sha1`.
    pub algorithm: Option<String>,
    /// 0 = cleartext, 7 = obfuscated.
    pub mode: Option<u8>,
    pub password: Option<String>,
}

impl From<NtpAuthKey> for NtpAuthKeyResource {
    fn from(key: NtpAuthKey) -> Self {
        Self {
            id: key.id,
            ensure: Ensure::Present,
            algorithm: Some(key.algorithm),
            mode: Some(key.mode),
            password: Some(key.password),
        }
    }
}

pub struct NtpAuthKeyProvider<'a> {
    client: &'a EosClient,
}

impl<'a> NtpAuthKeyProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for NtpAuthKeyProvider<'_> {
    type Resource = NtpAuthKeyResource;
    const KIND: &'static str = "ntp_auth_key";

    async fn instances(&self) -> Result<Vec<NtpAuthKeyResource>, CoreError> {
        Ok(self
            .client
            .ntp_config()
            .await?
            .auth_keys
            .into_iter()
            .map(NtpAuthKeyResource::from)
            .collect())
    }

    async fn apply(&self, desired: &NtpAuthKeyResource) -> Result<ApplyReport, CoreError> {
        let id = desired.id;
        let mut report = ApplyReport::new(Self::KIND, id.to_string());
        let current = self
            .client
            .ntp_config()
            .await?
            .auth_keys
            .into_iter()
            .find(|k| k.id == id);

        if desired.ensure == Ensure::Absent {
            if current.is_some() {
                self.client.ntp_remove_auth_key(id).await?;
                report.destroyed();
            }
            return Ok(report);
        }

        let missing = |field: &str| CoreError::ValidationFailed {
            message: format!("ntp key {id} needs {field}"),
        };
        let want = NtpAuthKey {
            id,
            algorithm: desired
                .algorithm
                .clone()
                .or_else(|| current.as_ref().map(|k| k.algorithm.clone()))
                .ok_or_else(|| missing("an algorithm"))?,
            mode: desired
                .mode
                .or_else(|| current.as_ref().map(|k| k.mode))
                .unwrap_or(7),
            password: desired
                .password
                .clone()
                .or_else(|| current.as_ref().map(|k| k.password.clone()))
                .ok_or_else(|| missing("a password"))?,
        };

        match current {
            Some(have) if have == want => return Ok(report),
            Some(have) => {
                report.diff("algorithm", Some(have.algorithm.as_str()), Some(want.algorithm.as_str()));
                report.diff("mode", Some(&have.mode), Some(&want.mode));
                if have.password != want.password {
                    report.set("password", None::<&str>, "<redacted>");
                }
            }
            None => report.created(),
        }
        self.client.ntp_set_auth_key(&want).await?;
        Ok(report)
    }
}
