// Device records
//
// Typed records returned by the endpoint methods. JSON-model commands are
// decoded through the private `Show*` structs at the bottom; text-model
// commands are produced by the parsers in `crate::parse`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::error::Error;

// ── VLAN ─────────────────────────────────────────────────────────────

/// Administrative VLAN state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VlanState {
    Active,
    Suspend,
    /// Any other status EOS reports (e.g. `act/lshut`).
    Other(String),
}

impl VlanState {
    pub fn from_status(status: &str) -> Self {
        match status {
            "active" => Self::Active,
            "suspend" | "suspended" => Self::Suspend,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Keyword for the `state` sub-command. `None` for non-settable states.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Active => Some("active"),
            Self::Suspend => Some("suspend"),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for VlanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Suspend => f.write_str("suspend"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vlan {
    pub id: String,
    pub name: String,
    pub state: VlanState,
    pub interfaces: Vec<String>,
    pub dynamic: bool,
}

// ── Interfaces ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interface {
    pub name: String,
    pub description: String,
    pub mtu: Option<u32>,
    /// Bits per second.
    pub bandwidth: Option<u64>,
    /// `duplexFull`, `duplexHalf`, `duplexUnknown`, ...
    pub duplex: Option<String>,
    /// `connected`, `notconnect`, `disabled`, ...
    pub status: String,
    pub hardware: Option<String>,
}

/// Value for the `speed` interface sub-command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
pub enum SpeedSetting {
    #[strum(serialize = "auto")]
    Auto,
    #[strum(serialize = "10full")]
    Full10M,
    #[strum(serialize = "10half")]
    Half10M,
    #[strum(serialize = "100full")]
    Full100M,
    #[strum(serialize = "100half")]
    Half100M,
    #[strum(serialize = "1000full")]
    Full1G,
    #[strum(serialize = "1000half")]
    Half1G,
    #[strum(serialize = "10gfull")]
    Full10G,
    #[strum(serialize = "40gfull")]
    Full40G,
    #[strum(serialize = "100gfull")]
    Full100G,
}

impl SpeedSetting {
    /// Map a speed token (`10m`, `100m`, `1g`, `10g`, `40g`, `100g`, `auto`)
    /// and a duplex token (`full`, `half`, `auto`) to the CLI value.
    pub fn from_speed_duplex(speed: &str, duplex: &str) -> Result<Self, Error> {
        if speed == "auto" || duplex == "auto" {
            return Ok(Self::Auto);
        }
        let full = match duplex {
            "full" => true,
            "half" => false,
            other => return Err(Error::Validation(format!("unknown duplex '{other}'"))),
        };
        match (speed, full) {
            ("10m", true) => Ok(Self::Full10M),
            ("10m", false) => Ok(Self::Half10M),
            ("100m", true) => Ok(Self::Full100M),
            ("100m", false) => Ok(Self::Half100M),
            ("1g", true) => Ok(Self::Full1G),
            ("1g", false) => Ok(Self::Half1G),
            ("10g", true) => Ok(Self::Full10G),
            ("40g", true) => Ok(Self::Full40G),
            ("100g", true) => Ok(Self::Full100G),
            ("10g" | "40g" | "100g", false) => Err(Error::Validation(format!(
                "speed {speed} does not support half duplex"
            ))),
            _ => Err(Error::Validation(format!("unsupported speed '{speed}'"))),
        }
    }

    /// Full `speed` sub-command text.
    pub fn command(self) -> String {
        match self {
            Self::Auto => "speed auto".to_owned(),
            forced => format!("speed forced {forced}"),
        }
    }
}

// ── Switchports ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Switchport {
    pub name: String,
    /// `access`, `trunk`, ...
    pub mode: String,
    pub access_vlan: Option<u32>,
    /// EOS range syntax, e.g. `1-10,20` or `ALL`.
    pub trunk_allowed_vlans: String,
}

// ── Port-channels ────────────────────────────────────────────────────

/// LACP negotiation mode of a channel group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PortChannelMode {
    Active,
    Passive,
    /// Static bundle, no LACP (`mode on`).
    Disabled,
}

impl PortChannelMode {
    /// Keyword accepted by `channel-group <n> mode <keyword>`.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Passive => "passive",
            Self::Disabled => "on",
        }
    }
}

impl FromStr for PortChannelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "passive" => Ok(Self::Passive),
            "disabled" | "on" => Ok(Self::Disabled),
            other => Err(Error::Validation(format!("Unknown LACP mode {other}"))),
        }
    }
}

/// Merged port-channel view: membership, LACP mode and min-links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortChannel {
    pub name: String,
    pub ports: Vec<String>,
    pub mode: Option<PortChannelMode>,
    pub min_links: u32,
}

// ── SNMP ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnmpSettings {
    pub enabled: bool,
    pub contact: String,
    pub location: String,
}

/// Community access group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CommunityGroup {
    Ro,
    Rw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnmpCommunity {
    pub name: String,
    pub group: Option<CommunityGroup>,
    pub acl: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnmpNotification {
    /// `<category> <trap>`, e.g. `bgp arista-established`.
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Traps,
    Informs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SnmpVersion {
    V1,
    V2,
    V3,
}

impl SnmpVersion {
    /// Token for `version <n>` in `snmp-server host` / `snmp-server user`.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::V1 => "1",
            Self::V2 => "2c",
            Self::V3 => "3",
        }
    }
}

impl FromStr for SnmpVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v1" | "1" => Ok(Self::V1),
            "v2" | "v2c" | "2" | "2c" => Ok(Self::V2),
            "v3" | "3" => Ok(Self::V3),
            other => Err(Error::Validation(format!("unknown SNMP version '{other}'"))),
        }
    }
}

/// Credential a notification receiver is addressed with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiverAuth {
    /// v1 / v2c community string.
    Community(String),
    /// v3 user plus security level (`noauth`, `auth`, `priv`).
    User { username: String, security: String },
}

impl ReceiverAuth {
    pub fn credential(&self) -> &str {
        match self {
            Self::Community(c) => c,
            Self::User { username, .. } => username,
        }
    }
}

/// One `snmp-server host` entry. The device may list the same host more
/// than once; entries are distinct when any field differs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NotificationReceiver {
    pub host: String,
    pub port: u16,
    pub kind: NotificationKind,
    pub version: SnmpVersion,
    pub auth: ReceiverAuth,
}

impl NotificationReceiver {
    pub const DEFAULT_PORT: u16 = 162;

    /// `host:credential:port`, used as a display name. Identity is the
    /// whole record (`PartialEq`), so several entries can share a key.
    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.host, self.auth.credential(), self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnmpUser {
    pub name: String,
    pub version: SnmpVersion,
    pub group: String,
    /// Authentication protocol, lowercase (`md5`, `sha`).
    pub auth: Option<String>,
    /// Privacy protocol, lowercase (`aes`, `des`).
    pub privacy: Option<String>,
    pub engine_id: Option<String>,
}

// ── AAA ──────────────────────────────────────────────────────────────

/// Shared-secret encoding: 0 = cleartext, 7 = Cisco type 7.
pub type KeyFormat = u8;

/// Global RADIUS / TACACS+ settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AaaGlobal {
    pub key: Option<String>,
    pub key_format: Option<KeyFormat>,
    pub timeout: Option<u32>,
    /// RADIUS only; EOS has no TACACS+ retransmit knob.
    pub retransmit_count: Option<u32>,
    /// VRF name (`default` for the global table) to source interface.
    pub source_interfaces: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadiusServer {
    pub hostname: String,
    pub vrf: Option<String>,
    pub auth_port: u16,
    pub acct_port: u16,
    pub timeout: Option<u32>,
    pub retransmit_count: Option<u32>,
    pub key: Option<String>,
    pub key_format: Option<KeyFormat>,
}

impl RadiusServer {
    pub const DEFAULT_AUTH_PORT: u16 = 1812;
    pub const DEFAULT_ACCT_PORT: u16 = 1813;

    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            vrf: None,
            auth_port: Self::DEFAULT_AUTH_PORT,
            acct_port: Self::DEFAULT_ACCT_PORT,
            timeout: None,
            retransmit_count: None,
            key: None,
            key_format: None,
        }
    }

    /// `hostname/auth_port/acct_port`
    pub fn key_name(&self) -> String {
        format!("{}/{}/{}", self.hostname, self.auth_port, self.acct_port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TacacsServer {
    pub hostname: String,
    pub vrf: Option<String>,
    pub port: u16,
    pub timeout: Option<u32>,
    pub key: Option<String>,
    pub key_format: Option<KeyFormat>,
    /// `single-connection` (multiplexed session).
    pub multiplex: bool,
}

impl TacacsServer {
    pub const DEFAULT_PORT: u16 = 49;

    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            vrf: None,
            port: Self::DEFAULT_PORT,
            timeout: None,
            key: None,
            key_format: None,
            multiplex: false,
        }
    }

    /// `hostname/port`
    pub fn key_name(&self) -> String {
        format!("{}/{}", self.hostname, self.port)
    }
}

/// AAA server group protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
pub enum GroupKind {
    #[strum(serialize = "radius")]
    Radius,
    #[strum(serialize = "tacacs+")]
    Tacacs,
}

/// Member of an `aaa group server`. Ports are `None` when left at default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMember {
    pub hostname: String,
    pub vrf: Option<String>,
    /// TACACS+ `port`.
    pub port: Option<u16>,
    /// RADIUS `auth-port` / `acct-port`.
    pub auth_port: Option<u16>,
    pub acct_port: Option<u16>,
}

impl GroupMember {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            vrf: None,
            port: None,
            auth_port: None,
            acct_port: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerGroup {
    pub name: String,
    pub kind: GroupKind,
    pub servers: Vec<GroupMember>,
}

// ── NTP ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NtpServer {
    pub host: String,
    pub vrf: Option<String>,
    pub prefer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NtpAuthKey {
    pub id: u32,
    /// `md5` or `sha1`.
    pub algorithm: String,
    /// Key encoding: 0 = cleartext, 7 = obfuscated.
    pub mode: u8,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NtpConfig {
    pub source_interface: Option<String>,
    pub servers: Vec<NtpServer>,
    pub auth_keys: Vec<NtpAuthKey>,
}

// ── DNS ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DnsConfig {
    pub domain_name: Option<String>,
    pub name_servers: Vec<String>,
    pub domain_list: Vec<String>,
}

// ── Logging ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyslogHost {
    pub host: String,
    pub port: Option<u16>,
    pub vrf: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub hosts: Vec<SyslogHost>,
    pub source_interfaces: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hosts: Vec::new(),
            source_interfaces: BTreeMap::new(),
        }
    }
}

// ── JSON command models ──────────────────────────────────────────────

/// `show vlan`
#[derive(Debug, Deserialize)]
pub(crate) struct ShowVlan {
    #[serde(default)]
    pub vlans: BTreeMap<String, VlanEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VlanEntry {
    pub status: String,
    pub name: String,
    #[serde(default)]
    pub interfaces: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub dynamic: bool,
}

/// `show interfaces`
#[derive(Debug, Deserialize)]
pub(crate) struct ShowInterfaces {
    #[serde(default)]
    pub interfaces: BTreeMap<String, InterfaceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InterfaceEntry {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mtu: Option<u32>,
    #[serde(default)]
    pub bandwidth: Option<u64>,
    #[serde(default)]
    pub duplex: Option<String>,
    #[serde(default)]
    pub interface_status: String,
    #[serde(default)]
    pub hardware: Option<String>,
}

/// `show interfaces switchport`
#[derive(Debug, Deserialize)]
pub(crate) struct ShowSwitchports {
    #[serde(default)]
    pub switchports: BTreeMap<String, SwitchportEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SwitchportEntry {
    #[serde(default)]
    pub enabled: bool,
    pub switchport_info: SwitchportInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SwitchportInfo {
    pub mode: String,
    #[serde(default)]
    pub access_vlan_id: Option<u32>,
    #[serde(default)]
    pub trunk_allowed_vlans: String,
}

/// `show snmp location`
#[derive(Debug, Deserialize)]
pub(crate) struct ShowSnmpLocation {
    #[serde(default)]
    pub location: String,
}

/// `show snmp contact`
#[derive(Debug, Deserialize)]
pub(crate) struct ShowSnmpContact {
    #[serde(default)]
    pub contact: String,
}
