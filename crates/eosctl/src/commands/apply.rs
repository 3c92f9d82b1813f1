//! `eosctl apply -f manifest.yaml`: converge a list of resources in order.
//!
//! Each manifest entry is one resource tagged with its provider kind:
//!
//! ```yaml
//! - kind: vlan
//!   id: 10
//!   vlan_name: web
//! - kind: ntp_server
//!   host: 10.0.0.1
//!   prefer: true
//! ```
//!
//! JSON manifests parse too. The run stops at the first failure, after
//! printing what was already applied.

use std::path::Path;

use serde::Deserialize;

use eos_core::{
    AaaSettings, ApplyReport, ChannelGroup, CoreError, DnsSettings, DnsSettingsProvider,
    DomainName, DomainNameProvider, EosClient, InterfaceProvider, InterfaceResource, NameServer,
    NameServerProvider, NtpAuthKeyProvider, NtpAuthKeyResource, NtpServerProvider,
    NtpServerResource, NtpSettings, NtpSettingsProvider, PortChannelProvider, Provider,
    RadiusServerGroupProvider, RadiusServerProvider, RadiusServerResource,
    RadiusSettingsProvider, SearchDomain, SearchDomainProvider, ServerGroupResource,
    SnmpCommunityProvider, SnmpCommunityResource, SnmpNotificationProvider,
    SnmpNotificationResource, SnmpReceiverProvider, SnmpReceiverResource, SnmpSettingsProvider,
    SnmpSettingsResource, SnmpUserProvider, SnmpUserResource, SwitchportProvider,
    SwitchportResource, SyslogServer, SyslogServerProvider, SyslogSettings,
    SyslogSettingsProvider, TacacsServerGroupProvider, TacacsServerProvider,
    TacacsServerResource, TacacsSettingsProvider, VlanProvider, VlanResource,
};

use crate::cli::{ApplyArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// One manifest entry. Tags match `Provider::KIND`.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Resource {
    Vlan(VlanResource),
    Interface(InterfaceResource),
    PortChannel(ChannelGroup),
    Switchport(SwitchportResource),
    SnmpSettings(SnmpSettingsResource),
    SnmpCommunity(SnmpCommunityResource),
    SnmpNotification(SnmpNotificationResource),
    SnmpNotificationReceiver(SnmpReceiverResource),
    SnmpUser(SnmpUserResource),
    RadiusSettings(AaaSettings),
    RadiusServer(RadiusServerResource),
    RadiusServerGroup(ServerGroupResource),
    TacacsSettings(AaaSettings),
    TacacsServer(TacacsServerResource),
    TacacsServerGroup(ServerGroupResource),
    NtpSettings(NtpSettings),
    NtpServer(NtpServerResource),
    NtpAuthKey(NtpAuthKeyResource),
    DnsSettings(DnsSettings),
    NameServer(NameServer),
    SearchDomain(SearchDomain),
    DomainName(DomainName),
    SyslogSettings(SyslogSettings),
    SyslogServer(SyslogServer),
}

async fn apply_one(client: &EosClient, resource: &Resource) -> Result<ApplyReport, CoreError> {
    match resource {
        Resource::Vlan(r) => VlanProvider::new(client).apply(r).await,
        Resource::Interface(r) => InterfaceProvider::new(client).apply(r).await,
        Resource::PortChannel(r) => PortChannelProvider::new(client).apply(r).await,
        Resource::Switchport(r) => SwitchportProvider::new(client).apply(r).await,
        Resource::SnmpSettings(r) => SnmpSettingsProvider::new(client).apply(r).await,
        Resource::SnmpCommunity(r) => SnmpCommunityProvider::new(client).apply(r).await,
        Resource::SnmpNotification(r) => SnmpNotificationProvider::new(client).apply(r).await,
        Resource::SnmpNotificationReceiver(r) => SnmpReceiverProvider::new(client).apply(r).await,
        Resource::SnmpUser(r) => SnmpUserProvider::new(client).apply(r).await,
        Resource::RadiusSettings(r) => RadiusSettingsProvider::new(client).apply(r).await,
        Resource::RadiusServer(r) => RadiusServerProvider::new(client).apply(r).await,
        Resource::RadiusServerGroup(r) => RadiusServerGroupProvider::new(client).apply(r).await,
        Resource::TacacsSettings(r) => TacacsSettingsProvider::new(client).apply(r).await,
        Resource::TacacsServer(r) => TacacsServerProvider::new(client).apply(r).await,
        Resource::TacacsServerGroup(r) => TacacsServerGroupProvider::new(client).apply(r).await,
        Resource::NtpSettings(r) => NtpSettingsProvider::new(client).apply(r).await,
        Resource::NtpServer(r) => NtpServerProvider::new(client).apply(r).await,
        Resource::NtpAuthKey(r) => NtpAuthKeyProvider::new(client).apply(r).await,
        Resource::DnsSettings(r) => DnsSettingsProvider::new(client).apply(r).await,
        Resource::NameServer(r) => NameServerProvider::new(client).apply(r).await,
        Resource::SearchDomain(r) => SearchDomainProvider::new(client).apply(r).await,
        Resource::DomainName(r) => DomainNameProvider::new(client).apply(r).await,
        Resource::SyslogSettings(r) => SyslogSettingsProvider::new(client).apply(r).await,
        Resource::SyslogServer(r) => SyslogServerProvider::new(client).apply(r).await,
    }
}

fn load_manifest(path: &Path) -> Result<Vec<Resource>, CliError> {
    let text = std::fs::read_to_string(path)?;
    parse_manifest(&text).map_err(|e| CliError::Manifest {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn parse_manifest(text: &str) -> Result<Vec<Resource>, serde_yaml::Error> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(text)
}

pub async fn handle(client: &EosClient, args: ApplyArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let resources = load_manifest(&args.file)?;
    tracing::info!(
        manifest = %args.file.display(),
        count = resources.len(),
        "applying manifest"
    );

    let mut reports = Vec::with_capacity(resources.len());
    let mut failure = None;
    for resource in &resources {
        match apply_one(client, resource).await {
            Ok(report) => reports.push(report),
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }

    let color = output::should_color(&global.color);
    let out = output::render_reports(&global.output, &reports, color)?;
    output::print_output(&out, global.quiet);

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use eos_core::{Ensure, SnmpVersion};

    use super::*;

    #[test]
    fn yaml_manifest_keeps_order_and_kinds() {
        let manifest = r"
- kind: vlan
  id: 10
  vlan_name: web
- kind: ntp_server
  host: 10.0.0.1
  prefer: true
- kind: snmp_user
  name: ops
  version: v3
  ensure: absent
- kind: radius_settings
  timeout: 5
";
        let resources = parse_manifest(manifest).unwrap();
        assert_eq!(resources.len(), 4);

        match &resources[0] {
            Resource::Vlan(v) => {
                assert_eq!(v.id, 10);
                assert_eq!(v.vlan_name.as_deref(), Some("web"));
                assert_eq!(v.ensure, Ensure::Present);
            }
            other => panic!("expected vlan, got {other:?}"),
        }
        assert!(matches!(&resources[1], Resource::NtpServer(s) if s.prefer == Some(true)));
        match &resources[2] {
            Resource::SnmpUser(u) => {
                assert_eq!(u.version, SnmpVersion::V3);
                assert_eq!(u.ensure, Ensure::Absent);
            }
            other => panic!("expected snmp_user, got {other:?}"),
        }
        assert!(matches!(&resources[3], Resource::RadiusSettings(s) if s.timeout == Some(5)));
    }

    #[test]
    fn json_manifest_parses() {
        let resources =
            parse_manifest(r#"[{"kind": "syslog_server", "host": "10.1.1.1", "port": 514}]"#)
                .unwrap();
        assert!(matches!(&resources[0], Resource::SyslogServer(s) if s.port == Some(514)));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = parse_manifest("- kind: bgp_neighbor\n  peer: 10.0.0.2\n").unwrap_err();
        assert!(err.to_string().contains("bgp_neighbor"));
    }

    #[test]
    fn empty_manifest_is_empty() {
        assert!(parse_manifest("  \n").unwrap().is_empty());
    }
}
