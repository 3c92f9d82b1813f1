// Syslog providers: global `logging on`, source interfaces and remote hosts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use eos_api::{EosClient, SyslogHost};

use crate::error::CoreError;
use crate::provider::{ApplyReport, Ensure, Provider, drift};
use crate::resources::SETTINGS;
use crate::resources::aaa::pairs;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyslogSettings {
    pub enable: Option<bool>,
    /// VRF (`default` for the global table) to source interface.
    pub source_interfaces: Option<BTreeMap<String, String>>,
}

pub struct SyslogSettingsProvider<'a> {
    client: &'a EosClient,
}

impl<'a> SyslogSettingsProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for SyslogSettingsProvider<'_> {
    type Resource = SyslogSettings;
    const KIND: &'static str = "syslog_settings";

    async fn instances(&self) -> Result<Vec<SyslogSettings>, CoreError> {
        let config = self.client.logging_config().await?;
        Ok(vec![SyslogSettings {
            enable: Some(config.enabled),
            source_interfaces: Some(config.source_interfaces),
        }])
    }

    async fn apply(&self, desired: &SyslogSettings) -> Result<ApplyReport, CoreError> {
        let mut report = ApplyReport::new(Self::KIND, SETTINGS);
        let current = self.client.logging_config().await?;
        if let Some(&enable) = drift(desired.enable.as_ref(), Some(&current.enabled)) {
            self.client.logging_set_enable(enable).await?;
            report.set("enable", Some(&current.enabled), &enable);
        }
        if let Some(wanted) = drift(
            desired.source_interfaces.as_ref(),
            Some(&current.source_interfaces),
        ) {
            let vrfs: Vec<String> = wanted.keys().cloned().collect();
            let interfaces: Vec<String> = wanted.values().cloned().collect();
            self.client
                .logging_set_source_interfaces(&vrfs, &interfaces)
                .await?;
            report.set(
                "source_interfaces",
                Some(&pairs(&current.source_interfaces)),
                &pairs(wanted),
            );
        }
        Ok(report)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyslogServer {
    pub host: String,
    #[serde(default)]
    pub ensure: Ensure,
    pub port: Option<u16>,
    pub vrf: Option<String>,
}

impl From<SyslogHost> for SyslogServer {
    fn from(host: SyslogHost) -> Self {
        Self {
            host: host.host,
            ensure: Ensure::Present,
            port: host.port,
            vrf: host.vrf,
        }
    }
}

pub struct SyslogServerProvider<'a> {
    client: &'a EosClient,
}

impl<'a> SyslogServerProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for SyslogServerProvider<'_> {
    type Resource = SyslogServer;
    const KIND: &'static str = "syslog_server";

    async fn instances(&self) -> Result<Vec<SyslogServer>, CoreError> {
        Ok(self
            .client
            .logging_config()
            .await?
            .hosts
            .into_iter()
            .map(SyslogServer::from)
            .collect())
    }

    async fn apply(&self, desired: &SyslogServer) -> Result<ApplyReport, CoreError> {
        let host = desired.host.as_str();
        let mut report = ApplyReport::new(Self::KIND, host);
        let current = self
            .client
            .logging_config()
            .await?
            .hosts
            .into_iter()
            .find(|h| h.host == host);

        match (desired.ensure, current) {
            (Ensure::Absent, None) => {}
            (Ensure::Absent, Some(have)) => {
                self.client
                    .logging_remove_host(host, have.vrf.as_deref())
                    .await?;
                report.destroyed();
            }
            (Ensure::Present, None) => {
                self.client
                    .logging_add_host(host, desired.port, desired.vrf.as_deref())
                    .await?;
                report.created();
            }
            (Ensure::Present, Some(have)) => {
                let port = drift(desired.port.as_ref(), have.port.as_ref());
                let vrf = drift(desired.vrf.as_deref(), have.vrf.as_deref());
                if port.is_none() && vrf.is_none() {
                    return Ok(report);
                }
                // EOS keeps one entry per host and VRF; replace it
                self.client
                    .logging_remove_host(host, have.vrf.as_deref())
                    .await?;
                let new_port = desired.port.or(have.port);
                let new_vrf = desired.vrf.as_deref().or(have.vrf.as_deref());
                self.client.logging_add_host(host, new_port, new_vrf).await?;
                report.diff("port", have.port.as_ref(), port);
                report.diff("vrf", have.vrf.as_deref(), vrf);
            }
        }
        Ok(report)
    }
}
