//! Settings scraped from `show running-config [all] section <feature>`.
//!
//! Lines are matched independently, so section ordering and unrelated
//! lines (`no radius-server deadtime`, `!`) do not matter.

use std::collections::BTreeMap;

use crate::error::Error;
use crate::models::{
    AaaGlobal, DnsConfig, GroupKind, GroupMember, KeyFormat, LoggingConfig, NtpAuthKey, NtpConfig,
    NtpServer, RadiusServer, ServerGroup, SyslogHost, TacacsServer,
};

const DEFAULT_VRF: &str = "default";

// ── RADIUS / TACACS+ ─────────────────────────────────────────────────

/// Global RADIUS settings and configured servers.
pub fn radius(text: &str) -> Result<(AaaGlobal, Vec<RadiusServer>), Error> {
    let mut global = AaaGlobal::default();
    let mut servers = Vec::new();

    for line in text.lines() {
        if let Some(caps) = regex!(r"^radius-server key (?:(\d) )?(\S+)\s*$").captures(line) {
            global.key_format = key_format(caps.get(1).map(|m| m.as_str()), line)?;
            global.key = Some(caps[2].to_owned());
        } else if let Some(caps) = regex!(r"^radius-server timeout (\d+)").captures(line) {
            global.timeout = Some(number(&caps[1], line)?);
        } else if let Some(caps) = regex!(r"^radius-server retransmit (\d+)").captures(line) {
            global.retransmit_count = Some(number(&caps[1], line)?);
        } else if let Some(caps) = regex!(r"^radius-server host (\S+)(.*)$").captures(line) {
            let mut server = RadiusServer::new(&caps[1]);
            let opts = HostOptions::parse(&caps[2], line)?;
            server.vrf = opts.vrf;
            server.auth_port = opts.auth_port.unwrap_or(RadiusServer::DEFAULT_AUTH_PORT);
            server.acct_port = opts.acct_port.unwrap_or(RadiusServer::DEFAULT_ACCT_PORT);
            server.timeout = opts.timeout;
            server.retransmit_count = opts.retransmit;
            server.key = opts.key;
            server.key_format = opts.key_format;
            servers.push(server);
        } else if let Some((vrf, iface)) = source_interface(line, "ip radius") {
            global.source_interfaces.insert(vrf, iface);
        }
    }

    Ok((global, servers))
}

/// Global TACACS+ settings and configured servers.
pub fn tacacs(text: &str) -> Result<(AaaGlobal, Vec<TacacsServer>), Error> {
    let mut global = AaaGlobal::default();
    let mut servers = Vec::new();

    for line in text.lines() {
        if let Some(caps) = regex!(r"^tacacs-server key (?:(\d) )?(\S+)\s*$").captures(line) {
            global.key_format = key_format(caps.get(1).map(|m| m.as_str()), line)?;
            global.key = Some(caps[2].to_owned());
        } else if let Some(caps) = regex!(r"^tacacs-server timeout (\d+)").captures(line) {
            global.timeout = Some(number(&caps[1], line)?);
        } else if let Some(caps) = regex!(r"^tacacs-server host (\S+)(.*)$").captures(line) {
            let mut server = TacacsServer::new(&caps[1]);
            let opts = HostOptions::parse(&caps[2], line)?;
            server.vrf = opts.vrf;
            server.port = opts.port.unwrap_or(TacacsServer::DEFAULT_PORT);
            server.timeout = opts.timeout;
            server.key = opts.key;
            server.key_format = opts.key_format;
            server.multiplex = opts.single_connection;
            servers.push(server);
        } else if let Some((vrf, iface)) = source_interface(line, "ip tacacs") {
            global.source_interfaces.insert(vrf, iface);
        }
    }

    Ok((global, servers))
}

/// `aaa group server <radius|tacacs+> <name>` blocks.
pub fn server_groups(text: &str) -> Result<Vec<ServerGroup>, Error> {
    let mut groups: Vec<ServerGroup> = Vec::new();

    for line in text.lines() {
        if let Some(caps) = regex!(r"^aaa group server (radius|tacacs\+) (\S+)").captures(line) {
            let kind = if &caps[1] == "radius" {
                GroupKind::Radius
            } else {
                GroupKind::Tacacs
            };
            groups.push(ServerGroup {
                name: caps[2].to_owned(),
                kind,
                servers: Vec::new(),
            });
        } else if let Some(caps) = regex!(r"^\s+server (\S+)(.*)$").captures(line) {
            let Some(group) = groups.last_mut() else {
                return Err(Error::parse("server entry outside of a server group", line));
            };
            let opts = HostOptions::parse(&caps[2], line)?;
            group.servers.push(GroupMember {
                hostname: caps[1].to_owned(),
                vrf: opts.vrf,
                port: opts.port,
                auth_port: opts.auth_port,
                acct_port: opts.acct_port,
            });
        }
    }

    Ok(groups)
}

/// Trailing keyword/value options of a `*-server host` or group `server` line.
#[derive(Debug, Default)]
struct HostOptions {
    vrf: Option<String>,
    port: Option<u16>,
    auth_port: Option<u16>,
    acct_port: Option<u16>,
    timeout: Option<u32>,
    retransmit: Option<u32>,
    key: Option<String>,
    key_format: Option<KeyFormat>,
    single_connection: bool,
}

impl HostOptions {
    fn parse(rest: &str, line: &str) -> Result<Self, Error> {
        let mut opts = Self::default();
        let mut tokens = rest.split_whitespace();

        while let Some(token) = tokens.next() {
            let mut value = || {
                tokens
                    .next()
                    .ok_or_else(|| Error::parse(format!("'{token}' is missing its value"), line))
            };
            match token {
                "vrf" => opts.vrf = Some(value()?.to_owned()),
                "port" => opts.port = Some(number(value()?, line)?),
                "auth-port" => opts.auth_port = Some(number(value()?, line)?),
                "acct-port" => opts.acct_port = Some(number(value()?, line)?),
                "timeout" => opts.timeout = Some(number(value()?, line)?),
                "retransmit" => opts.retransmit = Some(number(value()?, line)?),
                "single-connection" => opts.single_connection = true,
                "key" => {
                    let first = value()?;
                    // `key 7 <secret>` or a bare `key <secret>`
                    if first.len() == 1 && first.chars().all(|c| c.is_ascii_digit()) {
                        opts.key_format = Some(number(first, line)?);
                        opts.key = Some(value()?.to_owned());
                    } else {
                        opts.key = Some(first.to_owned());
                    }
                }
                _ => {}
            }
        }

        Ok(opts)
    }
}

/// `<prefix> [vrf <vrf>] source-interface <iface>`
fn source_interface(line: &str, prefix: &str) -> Option<(String, String)> {
    let rest = line.strip_prefix(prefix)?.trim_start();
    let caps = regex!(r"^(?:vrf (\S+) )?source-interface (\S+)").captures(rest)?;
    let vrf = caps.get(1).map_or(DEFAULT_VRF, |m| m.as_str());
    Some((vrf.to_owned(), caps[2].to_owned()))
}

fn key_format(token: Option<&str>, line: &str) -> Result<Option<KeyFormat>, Error> {
    token.map(|t| number(t, line)).transpose()
}

fn number<T: std::str::FromStr>(token: &str, line: &str) -> Result<T, Error> {
    token
        .parse()
        .map_err(|_| Error::parse(format!("expected a number, got '{token}'"), line))
}

// ── NTP ──────────────────────────────────────────────────────────────

pub fn ntp(text: &str) -> Result<NtpConfig, Error> {
    let mut config = NtpConfig::default();

    for line in text.lines() {
        if let Some(caps) = regex!(r"^ntp source (?:vrf \S+ )?(\S+)").captures(line) {
            config.source_interface = Some(caps[1].to_owned());
        } else if let Some(caps) =
            regex!(r"^ntp authentication-key (\d+) (\w+) (\d) (\S+)").captures(line)
        {
            config.auth_keys.push(NtpAuthKey {
                id: number(&caps[1], line)?,
                algorithm: caps[2].to_owned(),
                mode: number(&caps[3], line)?,
                password: caps[4].to_owned(),
            });
        } else if let Some(caps) = regex!(r"^ntp server (?:vrf (\S+) )?(\S+)(.*)$").captures(line) {
            config.servers.push(NtpServer {
                host: caps[2].to_owned(),
                vrf: caps.get(1).map(|m| m.as_str().to_owned()),
                prefer: caps[3].split_whitespace().any(|t| t == "prefer"),
            });
        }
    }

    Ok(config)
}

// ── DNS ──────────────────────────────────────────────────────────────

pub fn dns(text: &str) -> DnsConfig {
    let mut config = DnsConfig::default();

    for line in text.lines() {
        if let Some(caps) = regex!(r"^ip domain-name (\S+)").captures(line) {
            config.domain_name = Some(caps[1].to_owned());
        } else if let Some(caps) = regex!(r"^ip domain-list (\S+)").captures(line) {
            config.domain_list.push(caps[1].to_owned());
        } else if let Some(caps) = regex!(r"^ip name-server(?: vrf \S+)? (.+)$").captures(line) {
            config
                .name_servers
                .extend(caps[1].split_whitespace().map(str::to_owned));
        }
    }

    config
}

// ── Logging ──────────────────────────────────────────────────────────

pub fn logging(text: &str) -> Result<LoggingConfig, Error> {
    let mut config = LoggingConfig::default();
    let mut sources = BTreeMap::new();

    for line in text.lines() {
        if line.trim() == "no logging on" {
            config.enabled = false;
        } else if let Some(caps) =
            regex!(r"^logging (?:vrf (\S+) )?host (\S+)(?: (\d+))?").captures(line)
        {
            config.hosts.push(SyslogHost {
                host: caps[2].to_owned(),
                port: caps.get(3).map(|m| number(m.as_str(), line)).transpose()?,
                vrf: caps.get(1).map(|m| m.as_str().to_owned()),
            });
        } else if let Some((vrf, iface)) = source_interface(line, "logging") {
            sources.insert(vrf, iface);
        }
    }

    config.source_interfaces = sources;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const RADIUS: &str = "\
radius-server key 7 070E234F1F5B4A
radius-server timeout 5
radius-server retransmit 3
no radius-server deadtime
radius-server host 10.11.12.13 auth-port 1812 acct-port 1813 key 7 0207165218120E
radius-server host 10.11.12.14 vrf mgmt auth-port 1645 acct-port 1646 timeout 10 retransmit 2
ip radius source-interface Loopback0
ip radius vrf mgmt source-interface Management1
";

    const TACACS: &str = "\
tacacs-server key 7 070E234F1F5B4A
tacacs-server timeout 7
tacacs-server host 1.2.3.4
tacacs-server host 1.2.3.5 single-connection vrf mgmt port 4949 timeout 12 key 7 0207165218120E
ip tacacs vrf mgmt source-interface Management1
";

    const GROUPS: &str = "\
aaa group server radius RADIUS-SV1
   server 10.11.12.16 vrf MGMT
   server 10.11.12.17 auth-port 1645 acct-port 1646
!
aaa group server tacacs+ TAC-GR
   server 10.11.12.20 port 4949
";

    #[test]
    fn radius_globals_and_servers() {
        let (global, servers) = radius(RADIUS).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(global.key.as_deref(), Some("070E234F1F5B4A"));
        assert_eq!(global.key_format, Some(7));
        assert_eq!(global.timeout, Some(5));
        assert_eq!(global.retransmit_count, Some(3));
        assert_eq!(global.source_interfaces["default"], "Loopback0");
        assert_eq!(global.source_interfaces["mgmt"], "Management1");

        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].key_name(), "10.11.12.13/1812/1813");
        assert_eq!(servers[0].key_format, Some(7));
        assert_eq!(servers[1].vrf.as_deref(), Some("mgmt"));
        assert_eq!(servers[1].key_name(), "10.11.12.14/1645/1646");
        assert_eq!(servers[1].retransmit_count, Some(2));
        assert_eq!(servers[1].key, None);
    }

    #[test]
    fn tacacs_defaults_and_multiplex() {
        let (global, servers) = tacacs(TACACS).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(global.timeout, Some(7));
        assert_eq!(global.retransmit_count, None);
        assert_eq!(servers[0].key_name(), "1.2.3.4/49");
        assert!(!servers[0].multiplex);
        assert_eq!(servers[1].key_name(), "1.2.3.5/4949");
        assert!(servers[1].multiplex);
        assert_eq!(servers[1].timeout, Some(12));
    }

    #[test]
    fn server_groups_collect_members() {
        let groups = server_groups(GROUPS).unwrap_or_default();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].kind, GroupKind::Radius);
        assert_eq!(groups[0].servers[0].vrf.as_deref(), Some("MGMT"));
        assert_eq!(groups[0].servers[1].auth_port, Some(1645));
        assert_eq!(groups[1].kind, GroupKind::Tacacs);
        assert_eq!(groups[1].servers[0].port, Some(4949));
    }

    #[test]
    fn orphan_group_member_fails() {
        assert!(server_groups("   server 1.1.1.1\n").is_err());
    }

    #[test]
    fn ntp_sources_keys_and_servers() {
        let text = "\
ntp source Management1
ntp authentication-key 1 md5 7 0702325F5B0A
ntp server 1.2.3.4 prefer
ntp server vrf mgmt 5.6.7.8 iburst
";
        let config = ntp(text).unwrap_or_default();
        assert_eq!(config.source_interface.as_deref(), Some("Management1"));
        assert_eq!(config.auth_keys[0].id, 1);
        assert_eq!(config.auth_keys[0].mode, 7);
        assert!(config.servers[0].prefer);
        assert_eq!(config.servers[1].vrf.as_deref(), Some("mgmt"));
        assert!(!config.servers[1].prefer);
    }

    #[test]
    fn dns_collects_every_name_server() {
        let text = "\
ip domain-name arista.com
ip domain-list foo.com
ip domain-list bar.com
ip name-server vrf default 8.8.8.8 8.8.4.4
";
        let config = dns(text);
        assert_eq!(config.domain_name.as_deref(), Some("arista.com"));
        assert_eq!(config.domain_list, vec!["foo.com", "bar.com"]);
        assert_eq!(config.name_servers, vec!["8.8.8.8", "8.8.4.4"]);
    }

    #[test]
    fn logging_hosts_and_state() {
        let text = "\
no logging on
logging host 10.1.1.1 514
logging vrf mgmt host 10.2.2.2
logging vrf mgmt source-interface Management1
";
        let config = logging(text).unwrap_or_default();
        assert!(!config.enabled);
        assert_eq!(config.hosts[0].port, Some(514));
        assert_eq!(config.hosts[1].vrf.as_deref(), Some("mgmt"));
        assert_eq!(config.hosts[1].port, None);
        assert_eq!(config.source_interfaces["mgmt"], "Management1");
    }
}
