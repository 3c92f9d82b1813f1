// RADIUS and TACACS+ endpoints
//
// EOS has no JSON model for AAA server configuration, so reads scrape
// `show running-config all section ...` through `parse::running_config`.
// The two protocols share most commands; the `Protocol` helper keeps the
// keyword differences in one place.

use serde::Serialize;
use tracing::debug;

use crate::client::{EosClient, config_batch};
use crate::error::Error;
use crate::models::{
    AaaGlobal, GroupKind, GroupMember, KeyFormat, RadiusServer, ServerGroup, TacacsServer,
};
use crate::parse::running_config as parse;

const DEFAULT_VRF: &str = "default";

/// Global RADIUS settings plus the configured hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RadiusGlobal {
    #[serde(flatten)]
    pub global: AaaGlobal,
    pub servers: Vec<RadiusServer>,
}

/// Global TACACS+ settings plus the configured hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TacacsGlobal {
    #[serde(flatten)]
    pub global: AaaGlobal,
    pub servers: Vec<TacacsServer>,
}

#[derive(Debug, Clone, Copy)]
enum Protocol {
    Radius,
    Tacacs,
}

impl Protocol {
    /// `radius-server` / `tacacs-server`
    fn server_keyword(self) -> &'static str {
        match self {
            Self::Radius => "radius-server",
            Self::Tacacs => "tacacs-server",
        }
    }

    /// `ip radius` / `ip tacacs`
    fn ip_keyword(self) -> &'static str {
        match self {
            Self::Radius => "ip radius",
            Self::Tacacs => "ip tacacs",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Radius => "radius",
            Self::Tacacs => "tacacs",
        }
    }
}

impl EosClient {
    // ── Reads ────────────────────────────────────────────────────────

    /// `show running-config all section radius`
    pub async fn radius_config(&self) -> Result<RadiusGlobal, Error> {
        let text = self.running_config_section("radius", true).await?;
        let (global, servers) = parse::radius(&text)?;
        Ok(RadiusGlobal { global, servers })
    }

    /// `show running-config all section tacacs`
    pub async fn tacacs_config(&self) -> Result<TacacsGlobal, Error> {
        let text = self.running_config_section("tacacs", true).await?;
        let (global, servers) = parse::tacacs(&text)?;
        Ok(TacacsGlobal { global, servers })
    }

    /// Every `aaa group server` block, both protocols.
    pub async fn server_groups(&self) -> Result<Vec<ServerGroup>, Error> {
        let text = self.running_config_section("aaa group server", false).await?;
        parse::server_groups(&text)
    }

    pub async fn radius_server_groups(&self) -> Result<Vec<ServerGroup>, Error> {
        self.groups_of(GroupKind::Radius).await
    }

    pub async fn tacacs_server_groups(&self) -> Result<Vec<ServerGroup>, Error> {
        self.groups_of(GroupKind::Tacacs).await
    }

    async fn groups_of(&self, kind: GroupKind) -> Result<Vec<ServerGroup>, Error> {
        Ok(self
            .server_groups()
            .await?
            .into_iter()
            .filter(|g| g.kind == kind)
            .collect())
    }

    // ── Global settings ──────────────────────────────────────────────

    /// `radius-server key <format> <key>`; an empty key removes it.
    pub async fn radius_set_global_key(&self, key: &str, format: KeyFormat) -> Result<(), Error> {
        self.set_global_key(Protocol::Radius, key, format).await
    }

    /// `tacacs-server key <format> <key>`; an empty key removes it.
    pub async fn tacacs_set_global_key(&self, key: &str, format: KeyFormat) -> Result<(), Error> {
        self.set_global_key(Protocol::Tacacs, key, format).await
    }

    async fn set_global_key(&self, proto: Protocol, key: &str, format: KeyFormat) -> Result<(), Error> {
        let kw = proto.server_keyword();
        let cmd = if key.is_empty() {
            format!("no {kw} key")
        } else {
            format!("{kw} key {format} {key}")
        };
        self.configure(&config_batch([cmd]), &format!("set {} global key", proto.label()))
            .await
    }

    pub async fn radius_set_global_timeout(&self, seconds: u32) -> Result<(), Error> {
        self.set_global_timeout(Protocol::Radius, seconds).await
    }

    pub async fn tacacs_set_global_timeout(&self, seconds: u32) -> Result<(), Error> {
        self.set_global_timeout(Protocol::Tacacs, seconds).await
    }

    async fn set_global_timeout(&self, proto: Protocol, seconds: u32) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("{} timeout {seconds}", proto.server_keyword())]),
            &format!("set {} global timeout", proto.label()),
        )
        .await
    }

    pub async fn radius_set_global_retransmit(&self, count: u32) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("radius-server retransmit {count}")]),
            "set radius global retransmit",
        )
        .await
    }

    /// Always fails: EOS has no TACACS+ retransmit setting.
    pub fn tacacs_set_global_retransmit(&self, _count: u32) -> Result<(), Error> {
        Err(Error::Validation(
            "EOS does not support a TACACS+ retransmit count".into(),
        ))
    }

    /// Make the per-VRF source interfaces exactly the given pairs. `vrfs`
    /// and `interfaces` are zipped; `default` means the global table.
    pub async fn radius_set_source_interfaces(
        &self,
        vrfs: &[String],
        interfaces: &[String],
    ) -> Result<(), Error> {
        check_pairs(vrfs, interfaces)?;
        let current = self.radius_config().await?.global.source_interfaces;
        self.set_source_interfaces(Protocol::Radius, &current, vrfs, interfaces)
            .await
    }

    pub async fn tacacs_set_source_interfaces(
        &self,
        vrfs: &[String],
        interfaces: &[String],
    ) -> Result<(), Error> {
        check_pairs(vrfs, interfaces)?;
        let current = self.tacacs_config().await?.global.source_interfaces;
        self.set_source_interfaces(Protocol::Tacacs, &current, vrfs, interfaces)
            .await
    }

    async fn set_source_interfaces(
        &self,
        proto: Protocol,
        current: &std::collections::BTreeMap<String, String>,
        vrfs: &[String],
        interfaces: &[String],
    ) -> Result<(), Error> {
        let kw = proto.ip_keyword();
        let stale = current
            .keys()
            .filter(|vrf| !vrfs.contains(*vrf))
            .map(|vrf| format!("no {kw}{} source-interface", vrf_clause(vrf)));
        let wanted = vrfs
            .iter()
            .zip(interfaces)
            .map(|(vrf, iface)| format!("{kw}{} source-interface {iface}", vrf_clause(vrf)));
        let cmds: Vec<String> = stale.chain(wanted).collect();

        debug!(protocol = proto.label(), commands = cmds.len(), "setting source interfaces");
        self.configure(
            &config_batch(cmds),
            &format!("set {} source interfaces", proto.label()),
        )
        .await
    }

    /// Disabling is not supported; enabling is a no-op.
    pub fn radius_set_enable(&self, enabled: bool) -> Result<(), Error> {
        enable_guard(Protocol::Radius, enabled)
    }

    pub fn tacacs_set_enable(&self, enabled: bool) -> Result<(), Error> {
        enable_guard(Protocol::Tacacs, enabled)
    }

    // ── Servers ──────────────────────────────────────────────────────

    /// Create or replace a `radius-server host` entry.
    pub async fn radius_server_update(&self, server: &RadiusServer) -> Result<(), Error> {
        self.configure(
            &config_batch([radius_host_command(server)]),
            &format!("configure radius-server {}", server.hostname),
        )
        .await
    }

    pub async fn radius_server_remove(&self, server: &RadiusServer) -> Result<(), Error> {
        let cmd = format!(
            "no radius-server host {}{} auth-port {} acct-port {}",
            server.hostname,
            vrf_opt(server.vrf.as_deref()),
            server.auth_port,
            server.acct_port
        );
        self.configure(
            &config_batch([cmd]),
            &format!("remove radius-server {}", server.hostname),
        )
        .await
    }

    /// Create or replace a `tacacs-server host` entry.
    pub async fn tacacs_server_update(&self, server: &TacacsServer) -> Result<(), Error> {
        self.configure(
            &config_batch([tacacs_host_command(server)]),
            &format!("configure tacacs-server {}", server.hostname),
        )
        .await
    }

    pub async fn tacacs_server_remove(&self, server: &TacacsServer) -> Result<(), Error> {
        let cmd = format!(
            "no tacacs-server host {}{} port {}",
            server.hostname,
            vrf_opt(server.vrf.as_deref()),
            server.port
        );
        self.configure(
            &config_batch([cmd]),
            &format!("remove tacacs-server {}", server.hostname),
        )
        .await
    }

    // ── Server groups ────────────────────────────────────────────────

    pub async fn radius_server_group_update(
        &self,
        name: &str,
        servers: &[GroupMember],
    ) -> Result<(), Error> {
        self.server_group_update(GroupKind::Radius, name, servers)
            .await
    }

    pub async fn tacacs_server_group_update(
        &self,
        name: &str,
        servers: &[GroupMember],
    ) -> Result<(), Error> {
        self.server_group_update(GroupKind::Tacacs, name, servers)
            .await
    }

    /// Create the group if needed and make its member list exactly
    /// `servers`, in order.
    async fn server_group_update(
        &self,
        kind: GroupKind,
        name: &str,
        servers: &[GroupMember],
    ) -> Result<(), Error> {
        let existing = self
            .groups_of(kind)
            .await?
            .into_iter()
            .find(|g| g.name == name)
            .map(|g| g.servers)
            .unwrap_or_default();

        let mut cmds = vec![format!("aaa group server {kind} {name}")];
        cmds.extend(
            existing
                .iter()
                .filter(|m| !servers.contains(*m))
                .map(|m| format!("no {}", member_command(m))),
        );
        cmds.extend(servers.iter().map(member_command));

        self.configure(
            &config_batch(cmds),
            &format!("configure {kind} server group {name}"),
        )
        .await
    }

    pub async fn radius_server_group_remove(&self, name: &str) -> Result<(), Error> {
        self.server_group_remove(GroupKind::Radius, name).await
    }

    pub async fn tacacs_server_group_remove(&self, name: &str) -> Result<(), Error> {
        self.server_group_remove(GroupKind::Tacacs, name).await
    }

    async fn server_group_remove(&self, kind: GroupKind, name: &str) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("no aaa group server {kind} {name}")]),
            &format!("remove {kind} server group {name}"),
        )
        .await
    }
}

// ── Command builders ─────────────────────────────────────────────────

pub(crate) fn check_pairs(vrfs: &[String], interfaces: &[String]) -> Result<(), Error> {
    if vrfs.len() == interfaces.len() {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "got {} VRFs but {} source interfaces; they must pair up",
            vrfs.len(),
            interfaces.len()
        )))
    }
}

fn enable_guard(proto: Protocol, enabled: bool) -> Result<(), Error> {
    if enabled {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "{} cannot be disabled on EOS; remove its servers instead",
            proto.label()
        )))
    }
}

/// ` vrf <vrf>` unless it is the global table.
pub(crate) fn vrf_clause(vrf: &str) -> String {
    if vrf == DEFAULT_VRF {
        String::new()
    } else {
        format!(" vrf {vrf}")
    }
}

fn vrf_opt(vrf: Option<&str>) -> String {
    vrf.map(vrf_clause).unwrap_or_default()
}

fn key_opt(key: Option<&str>, format: Option<KeyFormat>) -> String {
    match (key, format) {
        (Some(key), Some(format)) => format!(" key {format} {key}"),
        (Some(key), None) => format!(" key {key}"),
        (None, _) => String::new(),
    }
}

pub(crate) fn radius_host_command(server: &RadiusServer) -> String {
    let mut cmd = format!(
        "radius-server host {}{} auth-port {} acct-port {}",
        server.hostname,
        vrf_opt(server.vrf.as_deref()),
        server.auth_port,
        server.acct_port
    );
    if let Some(timeout) = server.timeout {
        cmd.push_str(&format!(" timeout {timeout}"));
    }
    if let Some(count) = server.retransmit_count {
        cmd.push_str(&format!(" retransmit {count}"));
    }
    cmd.push_str(&key_opt(server.key.as_deref(), server.key_format));
    cmd
}

pub(crate) fn tacacs_host_command(server: &TacacsServer) -> String {
    let mut cmd = format!("tacacs-server host {}", server.hostname);
    if server.multiplex {
        cmd.push_str(" single-connection");
    }
    cmd.push_str(&vrf_opt(server.vrf.as_deref()));
    cmd.push_str(&format!(" port {}", server.port));
    if let Some(timeout) = server.timeout {
        cmd.push_str(&format!(" timeout {timeout}"));
    }
    cmd.push_str(&key_opt(server.key.as_deref(), server.key_format));
    cmd
}

/// `server <host> [vrf <vrf>] [port <p> | auth-port <a> acct-port <b>]`
pub(crate) fn member_command(member: &GroupMember) -> String {
    let mut cmd = format!("server {}{}", member.hostname, vrf_opt(member.vrf.as_deref()));
    if let Some(port) = member.port {
        cmd.push_str(&format!(" port {port}"));
    }
    if let Some(port) = member.auth_port {
        cmd.push_str(&format!(" auth-port {port}"));
    }
    if let Some(port) = member.acct_port {
        cmd.push_str(&format!(" acct-port {port}"));
    }
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_host_includes_only_set_options() {
        let mut server = RadiusServer::new("10.11.12.13");
        assert_eq!(
            radius_host_command(&server),
            "radius-server host 10.11.12.13 auth-port 1812 acct-port 1813"
        );

        server.vrf = Some("mgmt".into());
        server.timeout = Some(10);
        server.retransmit_count = Some(2);
        server.key = Some("0207165218120E".into());
        server.key_format = Some(7);
        assert_eq!(
            radius_host_command(&server),
            "radius-server host 10.11.12.13 vrf mgmt auth-port 1812 acct-port 1813 \
             timeout 10 retransmit 2 key 7 0207165218120E"
        );
    }

    #[test]
    fn tacacs_host_puts_single_connection_first() {
        let mut server = TacacsServer::new("1.2.3.5");
        server.multiplex = true;
        server.vrf = Some("default".into());
        server.port = 4949;
        assert_eq!(
            tacacs_host_command(&server),
            "tacacs-server host 1.2.3.5 single-connection port 4949"
        );
    }

    #[test]
    fn group_member_ports() {
        let mut member = GroupMember::new("10.11.12.17");
        member.auth_port = Some(1645);
        member.acct_port = Some(1646);
        assert_eq!(
            member_command(&member),
            "server 10.11.12.17 auth-port 1645 acct-port 1646"
        );
    }

    #[test]
    fn mismatched_source_interface_pairs_rejected() {
        let vrfs = vec!["default".to_owned(), "mgmt".to_owned()];
        let ifaces = vec!["Loopback0".to_owned()];
        assert!(matches!(check_pairs(&vrfs, &ifaces), Err(Error::Validation(_))));
        assert!(enable_guard(Protocol::Tacacs, false).is_err());
        assert!(enable_guard(Protocol::Radius, true).is_ok());
    }
}
