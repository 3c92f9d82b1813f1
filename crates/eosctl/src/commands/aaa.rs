//! RADIUS and TACACS+ command handlers.
//!
//! Both protocols share one argument tree; `kind` picks the providers.

use std::collections::BTreeMap;

use tabled::Tabled;

use eos_core::{
    AaaSettings, EosClient, Ensure, GroupKind, Provider, RadiusServerGroupProvider,
    RadiusServerProvider, RadiusServerResource, RadiusSettingsProvider, ServerGroupResource,
    TacacsServerGroupProvider, TacacsServerProvider, TacacsServerResource, TacacsSettingsProvider,
};

use crate::cli::{AaaArgs, AaaCommand, AaaServerCommand, GlobalOpts, ServerGroupCommand};
use crate::error::CliError;
use crate::output::or_dash;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct RadiusServerRow {
    #[tabled(rename = "Server")]
    name: String,
    #[tabled(rename = "VRF")]
    vrf: String,
    #[tabled(rename = "Timeout")]
    timeout: String,
    #[tabled(rename = "Retransmit")]
    retransmit: String,
    #[tabled(rename = "Key")]
    key: &'static str,
}

impl From<&RadiusServerResource> for RadiusServerRow {
    fn from(s: &RadiusServerResource) -> Self {
        Self {
            name: s.name(),
            vrf: or_dash(s.vrf.as_deref()),
            timeout: or_dash(s.timeout),
            retransmit: or_dash(s.retransmit_count),
            key: key_state(s.key.as_deref()),
        }
    }
}

#[derive(Tabled)]
struct TacacsServerRow {
    #[tabled(rename = "Server")]
    name: String,
    #[tabled(rename = "VRF")]
    vrf: String,
    #[tabled(rename = "Timeout")]
    timeout: String,
    #[tabled(rename = "Multiplex")]
    multiplex: String,
    #[tabled(rename = "Key")]
    key: &'static str,
}

impl From<&TacacsServerResource> for TacacsServerRow {
    fn from(s: &TacacsServerResource) -> Self {
        Self {
            name: s.name(),
            vrf: or_dash(s.vrf.as_deref()),
            timeout: or_dash(s.timeout),
            multiplex: or_dash(s.multiplex),
            key: key_state(s.key.as_deref()),
        }
    }
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Group")]
    name: String,
    #[tabled(rename = "Servers")]
    servers: String,
}

fn key_state(key: Option<&str>) -> &'static str {
    if key.is_some_and(|k| !k.is_empty()) {
        "set"
    } else {
        "-"
    }
}

fn settings_detail(s: &AaaSettings) -> String {
    let mut lines = vec![
        format!("Key:        {}", key_state(s.key.as_deref())),
        format!("Timeout:    {}", or_dash(s.timeout)),
    ];
    if let Some(count) = s.retransmit_count {
        lines.push(format!("Retransmit: {count}"));
    }
    match s.source_interfaces.as_ref().filter(|m| !m.is_empty()) {
        Some(map) => {
            lines.push("Source interfaces:".into());
            lines.extend(map.iter().map(|(vrf, iface)| format!("  {vrf}: {iface}")));
        }
        None => lines.push("Source interfaces: -".into()),
    }
    lines.join("\n")
}

/// Parse repeated `VRF=INTERFACE` flags.
pub(super) fn parse_source_interfaces(pairs: &[String]) -> Result<BTreeMap<String, String>, CliError> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((vrf, iface)) if !vrf.is_empty() && !iface.is_empty() => {
                Ok((vrf.to_owned(), iface.to_owned()))
            }
            _ => Err(CliError::Validation {
                field: "source-interface".into(),
                reason: format!("expected VRF=INTERFACE, got '{pair}'"),
            }),
        })
        .collect()
}

fn unsupported<P: Provider>(property: &str) -> CliError {
    CliError::Unsupported {
        resource: P::KIND.into(),
        property: property.into(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &EosClient,
    kind: GroupKind,
    args: AaaArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AaaCommand::Show => match kind {
            GroupKind::Radius => {
                util::show(&RadiusSettingsProvider::new(client), global, settings_detail).await
            }
            GroupKind::Tacacs => {
                util::show(&TacacsSettingsProvider::new(client), global, settings_detail).await
            }
        },

        AaaCommand::Set {
            key,
            key_format,
            response_timeout,
            retransmit,
            source_interfaces,
        } => {
            util::require_any(
                "settings",
                &[
                    key.is_some(),
                    key_format.is_some(),
                    response_timeout.is_some(),
                    retransmit.is_some(),
                    !source_interfaces.is_empty(),
                ],
            )?;
            let source_interfaces = if source_interfaces.is_empty() {
                None
            } else {
                Some(parse_source_interfaces(&source_interfaces)?)
            };
            let desired = AaaSettings {
                key,
                key_format,
                timeout: response_timeout,
                retransmit_count: retransmit,
                source_interfaces,
                enable: None,
            };
            match kind {
                GroupKind::Radius => {
                    util::apply(&RadiusSettingsProvider::new(client), &desired, global).await
                }
                GroupKind::Tacacs => {
                    util::apply(&TacacsSettingsProvider::new(client), &desired, global).await
                }
            }
        }

        AaaCommand::Servers { command } => match kind {
            GroupKind::Radius => radius_servers(client, command, global).await,
            GroupKind::Tacacs => tacacs_servers(client, command, global).await,
        },

        AaaCommand::Groups { command } => match kind {
            GroupKind::Radius => {
                groups(&RadiusServerGroupProvider::new(client), command, global).await
            }
            GroupKind::Tacacs => {
                groups(&TacacsServerGroupProvider::new(client), command, global).await
            }
        },
    }
}

async fn radius_servers(
    client: &EosClient,
    command: AaaServerCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let provider = RadiusServerProvider::new(client);
    match command {
        AaaServerCommand::List => {
            util::list(
                &provider,
                global,
                |s| RadiusServerRow::from(s),
                RadiusServerResource::name,
            )
            .await
        }
        AaaServerCommand::Ensure {
            name,
            vrf,
            response_timeout,
            retransmit,
            key,
            key_format,
            multiplex,
        } => {
            if multiplex.is_some() {
                return Err(unsupported::<RadiusServerProvider>("multiplex"));
            }
            let desired = RadiusServerResource {
                vrf,
                timeout: response_timeout,
                retransmit_count: retransmit,
                key,
                key_format,
                ..RadiusServerResource::from_name(&name)?
            };
            util::apply(&provider, &desired, global).await
        }
        AaaServerCommand::Remove { name } => {
            let desired = RadiusServerResource {
                ensure: Ensure::Absent,
                ..RadiusServerResource::from_name(&name)?
            };
            util::remove(&provider, &desired, &desired.name(), global).await
        }
    }
}

async fn tacacs_servers(
    client: &EosClient,
    command: AaaServerCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let provider = TacacsServerProvider::new(client);
    match command {
        AaaServerCommand::List => {
            util::list(
                &provider,
                global,
                |s| TacacsServerRow::from(s),
                TacacsServerResource::name,
            )
            .await
        }
        AaaServerCommand::Ensure {
            name,
            vrf,
            response_timeout,
            retransmit,
            key,
            key_format,
            multiplex,
        } => {
            if retransmit.is_some() {
                return Err(unsupported::<TacacsServerProvider>("retransmit_count"));
            }
            let desired = TacacsServerResource {
                vrf,
                timeout: response_timeout,
                key,
                key_format,
                multiplex,
                ..TacacsServerResource::from_name(&name)?
            };
            util::apply(&provider, &desired, global).await
        }
        AaaServerCommand::Remove { name } => {
            let desired = TacacsServerResource {
                ensure: Ensure::Absent,
                ..TacacsServerResource::from_name(&name)?
            };
            util::remove(&provider, &desired, &desired.name(), global).await
        }
    }
}

async fn groups<P>(provider: &P, command: ServerGroupCommand, global: &GlobalOpts) -> Result<(), CliError>
where
    P: Provider<Resource = ServerGroupResource> + Sync,
{
    match command {
        ServerGroupCommand::List => {
            util::list(
                provider,
                global,
                |g| GroupRow {
                    name: g.name.clone(),
                    servers: g.servers.as_deref().unwrap_or_default().join(", "),
                },
                |g| g.name.clone(),
            )
            .await
        }
        ServerGroupCommand::Ensure { name, servers } => {
            let desired = ServerGroupResource {
                name,
                ensure: Ensure::Present,
                servers: Some(servers),
            };
            util::apply(provider, &desired, global).await
        }
        ServerGroupCommand::Remove { name } => {
            let desired = ServerGroupResource {
                name: name.clone(),
                ensure: Ensure::Absent,
                servers: None,
            };
            util::remove(provider, &desired, &name, global).await
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn source_interface_pairs() {
        let map = parse_source_interfaces(&[
            "default=Management1".into(),
            "mgmt=Loopback0".into(),
        ])
        .unwrap();
        assert_eq!(map.get("default").map(String::as_str), Some("Management1"));
        assert_eq!(map.len(), 2);

        assert!(parse_source_interfaces(&["Management1".into()]).is_err());
        assert!(parse_source_interfaces(&["default=".into()]).is_err());
    }

    #[test]
    fn detail_hides_key_value() {
        let settings = AaaSettings {
            key: Some("070E234F".into()),
            timeout: Some(5),
            ..AaaSettings::default()
        };
        let text = settings_detail(&settings);
        assert!(text.contains("Key:        set"));
        assert!(!text.contains("070E234F"));
        assert!(text.contains("Source interfaces: -"));
    }
}
