// RADIUS and TACACS+ providers
//
// Both protocols share one settings shape, one server-group shape, and the
// same apply flow; the per-protocol providers pick the `EosClient` calls.
// Servers are named `host/auth_port/acct_port` (RADIUS) or `host/port`
// (TACACS+); group members use the same names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use eos_api::{
    AaaGlobal, EosClient, GroupKind, GroupMember, KeyFormat, RadiusServer, ServerGroup,
    TacacsServer,
};

use crate::convert::{split_radius_name, split_tacacs_name};
use crate::error::CoreError;
use crate::provider::{ApplyReport, Ensure, Provider, drift, list, reject_unsupported};
use crate::resources::SETTINGS;

/// Encoding EOS shows for stored secrets.
const OBFUSCATED: KeyFormat = 7;

// ── Global settings ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AaaSettings {
    pub key: Option<String>,
    pub key_format: Option<KeyFormat>,
    pub timeout: Option<u32>,
    /// RADIUS only.
    pub retransmit_count: Option<u32>,
    /// VRF (`default` for the global table) to source interface.
    pub source_interfaces: Option<BTreeMap<String, String>>,
    /// Always `true` on EOS; `false` is rejected.
    pub enable: Option<bool>,
}

impl From<AaaGlobal> for AaaSettings {
    fn from(global: AaaGlobal) -> Self {
        Self {
            key: global.key,
            key_format: global.key_format,
            timeout: global.timeout,
            retransmit_count: global.retransmit_count,
            source_interfaces: Some(global.source_interfaces),
            enable: Some(true),
        }
    }
}

async fn read_global(client: &EosClient, kind: GroupKind) -> Result<AaaGlobal, CoreError> {
    Ok(match kind {
        GroupKind::Radius => client.radius_config().await?.global,
        GroupKind::Tacacs => client.tacacs_config().await?.global,
    })
}

async fn apply_settings(
    client: &EosClient,
    kind: GroupKind,
    report_kind: &'static str,
    desired: &AaaSettings,
) -> Result<ApplyReport, CoreError> {
    if kind == GroupKind::Tacacs {
        reject_unsupported(report_kind, "retransmit_count", desired.retransmit_count.as_ref())?;
    }
    if let Some(enable) = desired.enable {
        match kind {
            GroupKind::Radius => client.radius_set_enable(enable)?,
            GroupKind::Tacacs => client.tacacs_set_enable(enable)?,
        }
    }

    let mut report = ApplyReport::new(report_kind, SETTINGS);
    let current = read_global(client, kind).await?;

    if let Some(key) = desired.key.as_deref() {
        let format = desired
            .key_format
            .or(current.key_format)
            .unwrap_or(OBFUSCATED);
        if current.key.as_deref() != Some(key) || current.key_format != Some(format) {
            match kind {
                GroupKind::Radius => client.radius_set_global_key(key, format).await?,
                GroupKind::Tacacs => client.tacacs_set_global_key(key, format).await?,
            }
            // secrets stay out of reports
            report.set("key", None::<&str>, "<redacted>");
        }
    }

    if let Some(&timeout) = drift(desired.timeout.as_ref(), current.timeout.as_ref()) {
        match kind {
            GroupKind::Radius => client.radius_set_global_timeout(timeout).await?,
            GroupKind::Tacacs => client.tacacs_set_global_timeout(timeout).await?,
        }
        report.set("timeout", current.timeout.as_ref(), &timeout);
    }

    if kind == GroupKind::Radius {
        if let Some(&count) =
            drift(desired.retransmit_count.as_ref(), current.retransmit_count.as_ref())
        {
            client.radius_set_global_retransmit(count).await?;
            report.set("retransmit_count", current.retransmit_count.as_ref(), &count);
        }
    }

    if let Some(wanted) = drift(
        desired.source_interfaces.as_ref(),
        Some(&current.source_interfaces),
    ) {
        let vrfs: Vec<String> = wanted.keys().cloned().collect();
        let interfaces: Vec<String> = wanted.values().cloned().collect();
        match kind {
            GroupKind::Radius => {
                client
                    .radius_set_source_interfaces(&vrfs, &interfaces)
                    .await?;
            }
            GroupKind::Tacacs => {
                client
                    .tacacs_set_source_interfaces(&vrfs, &interfaces)
                    .await?;
            }
        }
        report.set(
            "source_interfaces",
            Some(&pairs(&current.source_interfaces)),
            &pairs(wanted),
        );
    }

    Ok(report)
}

pub(crate) fn pairs(map: &BTreeMap<String, String>) -> String {
    let items: Vec<String> = map.iter().map(|(vrf, i)| format!("{vrf}={i}")).collect();
    list(&items)
}

pub struct RadiusSettingsProvider<'a> {
    client: &'a EosClient,
}

impl<'a> RadiusSettingsProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for RadiusSettingsProvider<'_> {
    type Resource = AaaSettings;
    const KIND: &'static str = "radius_settings";

    async fn instances(&self) -> Result<Vec<AaaSettings>, CoreError> {
        let global = read_global(self.client, GroupKind::Radius).await?;
        Ok(vec![AaaSettings::from(global)])
    }

    async fn apply(&self, desired: &AaaSettings) -> Result<ApplyReport, CoreError> {
        apply_settings(self.client, GroupKind::Radius, Self::KIND, desired).await
    }
}

pub struct TacacsSettingsProvider<'a> {
    client: &'a EosClient,
}

impl<'a> TacacsSettingsProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for TacacsSettingsProvider<'_> {
    type Resource = AaaSettings;
    const KIND: &'static str = "tacacs_settings";

    async fn instances(&self) -> Result<Vec<AaaSettings>, CoreError> {
        let mut settings = AaaSettings::from(read_global(self.client, GroupKind::Tacacs).await?);
        settings.retransmit_count = None;
        Ok(vec![settings])
    }

    async fn apply(&self, desired: &AaaSettings) -> Result<ApplyReport, CoreError> {
        apply_settings(self.client, GroupKind::Tacacs, Self::KIND, desired).await
    }
}

// ── RADIUS servers ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusServerResource {
    pub hostname: String,
    #[serde(default)]
    pub ensure: Ensure,
    pub vrf: Option<String>,
    pub auth_port: Option<u16>,
    pub acct_port: Option<u16>,
    pub timeout: Option<u32>,
    pub retransmit_count: Option<u32>,
    pub key: Option<String>,
    pub key_format: Option<KeyFormat>,
}

impl RadiusServerResource {
    /// Build from a `host/auth_port/acct_port` name.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        let (hostname, auth, acct) = split_radius_name(name)?;
        Ok(Self {
            hostname,
            auth_port: Some(auth),
            acct_port: Some(acct),
            ..Self::default()
        })
    }

    pub fn name(&self) -> String {
        format!(
            "{}/{}/{}",
            self.hostname,
            self.auth_port.unwrap_or(RadiusServer::DEFAULT_AUTH_PORT),
            self.acct_port.unwrap_or(RadiusServer::DEFAULT_ACCT_PORT)
        )
    }

    /// Desired device record, keeping unmanaged values from `current`.
    fn merge(&self, current: Option<&RadiusServer>) -> RadiusServer {
        let mut server = current
            .cloned()
            .unwrap_or_else(|| RadiusServer::new(&self.hostname));
        server.auth_port = self.auth_port.unwrap_or(server.auth_port);
        server.acct_port = self.acct_port.unwrap_or(server.acct_port);
        if self.vrf.is_some() {
            server.vrf.clone_from(&self.vrf);
        }
        server.timeout = self.timeout.or(server.timeout);
        server.retransmit_count = self.retransmit_count.or(server.retransmit_count);
        if self.key.is_some() {
            server.key.clone_from(&self.key);
            server.key_format = Some(self.key_format.unwrap_or(OBFUSCATED));
        }
        server
    }
}

impl From<RadiusServer> for RadiusServerResource {
    fn from(server: RadiusServer) -> Self {
        Self {
            hostname: server.hostname,
            ensure: Ensure::Present,
            vrf: server.vrf,
            auth_port: Some(server.auth_port),
            acct_port: Some(server.acct_port),
            timeout: server.timeout,
            retransmit_count: server.retransmit_count,
            key: server.key,
            key_format: server.key_format,
        }
    }
}

pub struct RadiusServerProvider<'a> {
    client: &'a EosClient,
}

impl<'a> RadiusServerProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for RadiusServerProvider<'_> {
    type Resource = RadiusServerResource;
    const KIND: &'static str = "radius_server";

    async fn instances(&self) -> Result<Vec<RadiusServerResource>, CoreError> {
        Ok(self
            .client
            .radius_config()
            .await?
            .servers
            .into_iter()
            .map(RadiusServerResource::from)
            .collect())
    }

    async fn apply(&self, desired: &RadiusServerResource) -> Result<ApplyReport, CoreError> {
        let name = desired.name();
        let mut report = ApplyReport::new(Self::KIND, &name);
        let current = self
            .client
            .radius_config()
            .await?
            .servers
            .into_iter()
            .find(|s| s.key_name() == name);

        match (desired.ensure, current) {
            (Ensure::Absent, None) => {}
            (Ensure::Absent, Some(server)) => {
                self.client.radius_server_remove(&server).await?;
                report.destroyed();
            }
            (Ensure::Present, current) => {
                let want = desired.merge(current.as_ref());
                if current.as_ref() == Some(&want) {
                    return Ok(report);
                }
                debug!(server = %name, "updating radius server");
                self.client.radius_server_update(&want).await?;
                match current {
                    None => report.created(),
                    Some(have) => {
                        report.diff("vrf", have.vrf.as_deref(), want.vrf.as_deref());
                        report.diff("timeout", have.timeout.as_ref(), want.timeout.as_ref());
                        report.diff(
                            "retransmit_count",
                            have.retransmit_count.as_ref(),
                            want.retransmit_count.as_ref(),
                        );
                        if have.key != want.key || have.key_format != want.key_format {
                            report.set("key", None::<&str>, "<redacted>");
                        }
                    }
                }
            }
        }
        Ok(report)
    }
}

// ── TACACS+ servers ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacacsServerResource {
    pub hostname: String,
    #[serde(default)]
    pub ensure: Ensure,
    pub vrf: Option<String>,
    pub port: Option<u16>,
    pub timeout: Option<u32>,
    pub key: Option<String>,
    pub key_format: Option<KeyFormat>,
    /// `single-connection`
    pub multiplex: Option<bool>,
}

impl TacacsServerResource {
    /// Build from a `host/port` name.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        let (hostname, port) = split_tacacs_name(name)?;
        Ok(Self {
            hostname,
            port: Some(port),
            ..Self::default()
        })
    }

    pub fn name(&self) -> String {
        format!(
            "{}/{}",
            self.hostname,
            self.port.unwrap_or(TacacsServer::DEFAULT_PORT)
        )
    }

    fn merge(&self, current: Option<&TacacsServer>) -> TacacsServer {
        let mut server = current
            .cloned()
            .unwrap_or_else(|| TacacsServer::new(&self.hostname));
        server.port = self.port.unwrap_or(server.port);
        if self.vrf.is_some() {
            server.vrf.clone_from(&self.vrf);
        }
        server.timeout = self.timeout.or(server.timeout);
        server.multiplex = self.multiplex.unwrap_or(server.multiplex);
        if self.key.is_some() {
            server.key.clone_from(&self.key);
            server.key_format = Some(self.key_format.unwrap_or(OBFUSCATED));
        }
        server
    }
}

impl From<TacacsServer> for TacacsServerResource {
    fn from(server: TacacsServer) -> Self {
        Self {
            hostname: server.hostname,
            ensure: Ensure::Present,
            vrf: server.vrf,
            port: Some(server.port),
            timeout: server.timeout,
            key: server.key,
            key_format: server.key_format,
            multiplex: Some(server.multiplex),
        }
    }
}

pub struct TacacsServerProvider<'a> {
    client: &'a EosClient,
}

impl<'a> TacacsServerProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for TacacsServerProvider<'_> {
    type Resource = TacacsServerResource;
    const KIND: &'static str = "tacacs_server";

    async fn instances(&self) -> Result<Vec<TacacsServerResource>, CoreError> {
        Ok(self
            .client
            .tacacs_config()
            .await?
            .servers
            .into_iter()
            .map(TacacsServerResource::from)
            .collect())
    }

    async fn apply(&self, desired: &TacacsServerResource) -> Result<ApplyReport, CoreError> {
        let name = desired.name();
        let mut report = ApplyReport::new(Self::KIND, &name);
        let current = self
            .client
            .tacacs_config()
            .await?
            .servers
            .into_iter()
            .find(|s| s.key_name() == name);

        match (desired.ensure, current) {
            (Ensure::Absent, None) => {}
            (Ensure::Absent, Some(server)) => {
                self.client.tacacs_server_remove(&server).await?;
                report.destroyed();
            }
            (Ensure::Present, current) => {
                let want = desired.merge(current.as_ref());
                if current.as_ref() == Some(&want) {
                    return Ok(report);
                }
                debug!(server = %name, "updating tacacs server");
                self.client.tacacs_server_update(&want).await?;
                match current {
                    None => report.created(),
                    Some(have) => {
                        report.diff("vrf", have.vrf.as_deref(), want.vrf.as_deref());
                        report.diff("timeout", have.timeout.as_ref(), want.timeout.as_ref());
                        report.diff("multiplex", Some(&have.multiplex), Some(&want.multiplex));
                        if have.key != want.key || have.key_format != want.key_format {
                            report.set("key", None::<&str>, "<redacted>");
                        }
                    }
                }
            }
        }
        Ok(report)
    }
}

// ── Server groups ───────────────────────────────────────────────────

/// An `aaa group server` block. `servers` lists member names in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerGroupResource {
    pub name: String,
    #[serde(default)]
    pub ensure: Ensure,
    pub servers: Option<Vec<String>>,
}

fn member_name(kind: GroupKind, member: &GroupMember) -> String {
    match kind {
        GroupKind::Radius => format!(
            "{}/{}/{}",
            member.hostname,
            member.auth_port.unwrap_or(RadiusServer::DEFAULT_AUTH_PORT),
            member.acct_port.unwrap_or(RadiusServer::DEFAULT_ACCT_PORT)
        ),
        GroupKind::Tacacs => format!(
            "{}/{}",
            member.hostname,
            member.port.unwrap_or(TacacsServer::DEFAULT_PORT)
        ),
    }
}

/// Default ports stay implicit so the member matches what EOS shows.
fn member_from_name(kind: GroupKind, name: &str) -> Result<GroupMember, CoreError> {
    Ok(match kind {
        GroupKind::Radius => {
            let (host, auth, acct) = split_radius_name(name)?;
            let mut member = GroupMember::new(host);
            member.auth_port = (auth != RadiusServer::DEFAULT_AUTH_PORT).then_some(auth);
            member.acct_port = (acct != RadiusServer::DEFAULT_ACCT_PORT).then_some(acct);
            member
        }
        GroupKind::Tacacs => {
            let (host, port) = split_tacacs_name(name)?;
            let mut member = GroupMember::new(host);
            member.port = (port != TacacsServer::DEFAULT_PORT).then_some(port);
            member
        }
    })
}

fn group_resource(group: ServerGroup) -> ServerGroupResource {
    let servers = group
        .servers
        .iter()
        .map(|m| member_name(group.kind, m))
        .collect();
    ServerGroupResource {
        name: group.name,
        ensure: Ensure::Present,
        servers: Some(servers),
    }
}

async fn read_groups(client: &EosClient, kind: GroupKind) -> Result<Vec<ServerGroup>, CoreError> {
    Ok(match kind {
        GroupKind::Radius => client.radius_server_groups().await?,
        GroupKind::Tacacs => client.tacacs_server_groups().await?,
    })
}

async fn apply_group(
    client: &EosClient,
    kind: GroupKind,
    report_kind: &'static str,
    desired: &ServerGroupResource,
) -> Result<ApplyReport, CoreError> {
    let name = desired.name.as_str();
    let mut report = ApplyReport::new(report_kind, name);
    let current = read_groups(client, kind)
        .await?
        .into_iter()
        .find(|g| g.name == name)
        .map(group_resource);

    if desired.ensure == Ensure::Absent {
        if current.is_some() {
            match kind {
                GroupKind::Radius => client.radius_server_group_remove(name).await?,
                GroupKind::Tacacs => client.tacacs_server_group_remove(name).await?,
            }
            report.destroyed();
        }
        return Ok(report);
    }

    let members = desired
        .servers
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|s| member_from_name(kind, s))
        .collect::<Result<Vec<_>, _>>()?;
    let wanted: Vec<String> = members.iter().map(|m| member_name(kind, m)).collect();

    let have = current.as_ref().and_then(|g| g.servers.clone());
    let changed = match (&desired.servers, &have) {
        (_, None) => true,
        (None, Some(_)) => false,
        (Some(_), Some(have)) => *have != wanted,
    };
    if !changed {
        return Ok(report);
    }

    match kind {
        GroupKind::Radius => client.radius_server_group_update(name, &members).await?,
        GroupKind::Tacacs => client.tacacs_server_group_update(name, &members).await?,
    }
    match have {
        None => report.created(),
        Some(have) => report.set("servers", Some(&list(&have)), &list(&wanted)),
    }
    Ok(report)
}

pub struct RadiusServerGroupProvider<'a> {
    client: &'a EosClient,
}

impl<'a> RadiusServerGroupProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for RadiusServerGroupProvider<'_> {
    type Resource = ServerGroupResource;
    const KIND: &'static str = "radius_server_group";

    async fn instances(&self) -> Result<Vec<ServerGroupResource>, CoreError> {
        let groups = read_groups(self.client, GroupKind::Radius).await?;
        Ok(groups.into_iter().map(group_resource).collect())
    }

    async fn apply(&self, desired: &ServerGroupResource) -> Result<ApplyReport, CoreError> {
        apply_group(self.client, GroupKind::Radius, Self::KIND, desired).await
    }
}

pub struct TacacsServerGroupProvider<'a> {
    client: &'a EosClient,
}

impl<'a> TacacsServerGroupProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for TacacsServerGroupProvider<'_> {
    type Resource = ServerGroupResource;
    const KIND: &'static str = "tacacs_server_group";

    async fn instances(&self) -> Result<Vec<ServerGroupResource>, CoreError> {
        let groups = read_groups(self.client, GroupKind::Tacacs).await?;
        Ok(groups.into_iter().map(group_resource).collect())
    }

    async fn apply(&self, desired: &ServerGroupResource) -> Result<ApplyReport, CoreError> {
        apply_group(self.client, GroupKind::Tacacs, Self::KIND, desired).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn member_names_round_trip_with_default_ports() {
        let member = member_from_name(GroupKind::Radius, "10.1.1.1").unwrap();
        assert_eq!(member.auth_port, None);
        assert_eq!(member_name(GroupKind::Radius, &member), "10.1.1.1/1812/1813");

        let member = member_from_name(GroupKind::Tacacs, "10.2.2.2/4949").unwrap();
        assert_eq!(member.port, Some(4949));
        assert_eq!(member_name(GroupKind::Tacacs, &member), "10.2.2.2/4949");
    }

    #[test]
    fn radius_merge_keeps_unmanaged_values() {
        let mut have = RadiusServer::new("10.11.12.13");
        have.timeout = Some(10);
        have.vrf = Some("mgmt".into());

        let desired = RadiusServerResource {
            retransmit_count: Some(3),
            ..RadiusServerResource::from_name("10.11.12.13").unwrap()
        };
        let want = desired.merge(Some(&have));
        assert_eq!(want.timeout, Some(10));
        assert_eq!(want.vrf.as_deref(), Some("mgmt"));
        assert_eq!(want.retransmit_count, Some(3));
        assert_eq!(desired.name(), "10.11.12.13/1812/1813");
    }

    #[test]
    fn tacacs_name_defaults_port() {
        let server = TacacsServerResource {
            hostname: "1.2.3.4".into(),
            ..TacacsServerResource::default()
        };
        assert_eq!(server.name(), "1.2.3.4/49");
        assert!(!server.merge(None).multiplex);
    }
}
