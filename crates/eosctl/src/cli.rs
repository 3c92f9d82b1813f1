//! Clap derive structures for the `eosctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared value enums.
//! This file is also compiled by `build.rs` for man page generation, so it
//! may only depend on `clap` and `clap_complete`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// eosctl -- desired-state CLI for Arista EOS switches
#[derive(Debug, Parser)]
#[command(
    name = "eosctl",
    version,
    about = "Manage Arista EOS switches from the command line",
    long_about = "Reads and converges Arista EOS switch configuration over eAPI.\n\n\
        Every `ensure` and `remove` re-reads the switch, compares it with the\n\
        requested state, and sends only the commands needed to converge.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Switch profile to use
    #[arg(long, short = 'p', env = "EOS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Switch address, URL, or unix socket path (overrides profile)
    #[arg(long, short = 'a', env = "EOS_ADDRESS", global = true)]
    pub address: Option<String>,

    /// eAPI port (overrides profile)
    #[arg(long, env = "EOS_PORT", global = true)]
    pub eapi_port: Option<u16>,

    /// eAPI user (overrides profile)
    #[arg(long, short = 'u', env = "EOS_USERNAME", global = true)]
    pub username: Option<String>,

    /// Use HTTPS instead of HTTP
    #[arg(long, global = true)]
    pub tls: bool,

    /// Path to the config file
    #[arg(long, env = "EOS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "EOS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "EOS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "EOS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage VLANs
    #[command(alias = "vlan")]
    Vlans(VlansArgs),

    /// Inspect and configure Ethernet interfaces
    #[command(alias = "intf", alias = "if")]
    Interfaces(InterfacesArgs),

    /// Manage port-channels (LAGs)
    #[command(alias = "pc", alias = "lag")]
    PortChannels(PortChannelsArgs),

    /// Manage layer 2 switchport settings
    #[command(alias = "sw")]
    Switchports(SwitchportsArgs),

    /// Manage the SNMP agent, communities, traps, receivers, and users
    Snmp(SnmpArgs),

    /// Manage RADIUS settings, servers, and server groups
    Radius(AaaArgs),

    /// Manage TACACS+ settings, servers, and server groups
    #[command(alias = "tacacs+")]
    Tacacs(AaaArgs),

    /// Manage NTP source, servers, and authentication keys
    Ntp(NtpArgs),

    /// Manage DNS domain, name servers, and search domains
    Dns(DnsArgs),

    /// Manage syslog state and remote hosts
    #[command(alias = "syslog")]
    Logging(LoggingArgs),

    /// Print the running configuration
    #[command(alias = "rc")]
    RunningConfig,

    /// Converge every resource in a YAML or JSON manifest
    Apply(ApplyArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared value enums ───────────────────────────────────────────────

/// LACP mode of a channel group.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LacpMode {
    Active,
    Passive,
    /// Static bundle, no LACP
    #[value(alias = "on")]
    Disabled,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SwitchportMode {
    Access,
    Trunk,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CommunityAccess {
    /// Read-only
    Ro,
    /// Read-write
    Rw,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReceiverType {
    Traps,
    Informs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SnmpVersionArg {
    V1,
    #[value(alias = "v2c")]
    V2,
    V3,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VLANS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VlansArgs {
    #[command(subcommand)]
    pub command: VlansCommand,
}

#[derive(Debug, Subcommand)]
pub enum VlansCommand {
    /// List all VLANs
    #[command(alias = "ls")]
    List,

    /// Create or update a VLAN
    Ensure {
        /// VLAN ID (1-4094)
        #[arg(value_parser = clap::value_parser!(u32).range(1..=4094))]
        id: u32,

        /// VLAN name
        #[arg(long)]
        name: Option<String>,

        /// Suspend (true) or activate (false) the VLAN
        #[arg(long, action = clap::ArgAction::Set)]
        shutdown: Option<bool>,
    },

    /// Delete a VLAN
    #[command(alias = "rm")]
    Remove {
        /// VLAN ID (1-4094)
        #[arg(value_parser = clap::value_parser!(u32).range(1..=4094))]
        id: u32,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INTERFACES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct InterfacesArgs {
    #[command(subcommand)]
    pub command: InterfacesCommand,
}

#[derive(Debug, Subcommand)]
pub enum InterfacesCommand {
    /// List Ethernet interfaces
    #[command(alias = "ls")]
    List,

    /// Configure an Ethernet interface
    Set {
        /// Interface name, e.g. Ethernet1
        name: String,

        /// Interface description
        #[arg(long)]
        description: Option<String>,

        /// Administratively enable (true) or shut down (false)
        #[arg(long, action = clap::ArgAction::Set)]
        enable: Option<bool>,

        /// MTU in bytes
        #[arg(long)]
        mtu: Option<u32>,

        /// Speed: 10m, 100m, 1g, 10g, 40g, 100g, or auto
        #[arg(long)]
        speed: Option<String>,

        /// Duplex: full, half, or auto
        #[arg(long)]
        duplex: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PORT-CHANNELS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PortChannelsArgs {
    #[command(subcommand)]
    pub command: PortChannelsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PortChannelsCommand {
    /// List port-channels with members and LACP mode
    #[command(alias = "ls")]
    List,

    /// Create or update a port-channel
    Ensure {
        /// Port-channel name, e.g. Port-Channel10
        name: String,

        /// LACP mode (default for new port-channels: active)
        #[arg(long, value_enum)]
        mode: Option<LacpMode>,

        /// Member interfaces (comma-separated)
        #[arg(long, value_delimiter = ',')]
        members: Option<Vec<String>>,

        /// Minimum number of active links
        #[arg(long)]
        min_links: Option<u32>,

        /// Port-channel description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a port-channel and release its members
    #[command(alias = "rm")]
    Remove {
        /// Port-channel name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SWITCHPORTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SwitchportsArgs {
    #[command(subcommand)]
    pub command: SwitchportsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SwitchportsCommand {
    /// List layer 2 switchports
    #[command(alias = "ls")]
    List,

    /// Make an interface a switchport and configure it
    Ensure {
        /// Interface name
        name: String,

        /// Switchport mode
        #[arg(long, value_enum)]
        mode: Option<SwitchportMode>,

        /// Access VLAN
        #[arg(long)]
        access_vlan: Option<u32>,

        /// Trunk allowed VLANs, e.g. "1-3,10" or "all"
        #[arg(long)]
        trunk_vlans: Option<String>,
    },

    /// Turn a switchport back into a routed port
    #[command(alias = "rm")]
    Remove {
        /// Interface name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SNMP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SnmpArgs {
    #[command(subcommand)]
    pub command: SnmpCommand,
}

#[derive(Debug, Subcommand)]
pub enum SnmpCommand {
    /// Show agent state, contact, and location
    Show,

    /// Set contact and location
    Set {
        /// System contact
        #[arg(long)]
        contact: Option<String>,

        /// System location
        #[arg(long)]
        location: Option<String>,
    },

    /// Turn the SNMP agent on
    Enable,

    /// Turn the SNMP agent off
    Disable,

    /// Manage communities
    #[command(alias = "community")]
    Communities {
        #[command(subcommand)]
        command: SnmpCommunityCommand,
    },

    /// Manage trap notifications
    #[command(alias = "traps")]
    Notifications {
        #[command(subcommand)]
        command: SnmpNotificationCommand,
    },

    /// Manage notification receivers (snmp-server host)
    #[command(alias = "hosts")]
    Receivers {
        #[command(subcommand)]
        command: SnmpReceiverCommand,
    },

    /// Manage SNMP users
    #[command(alias = "user")]
    Users {
        #[command(subcommand)]
        command: SnmpUserCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum SnmpCommunityCommand {
    /// List communities
    #[command(alias = "ls")]
    List,

    /// Create or update a community
    Ensure {
        /// Community string
        name: String,

        /// Access group
        #[arg(long, value_enum)]
        group: Option<CommunityAccess>,

        /// Standard ACL restricting access
        #[arg(long)]
        acl: Option<String>,
    },

    /// Delete a community
    #[command(alias = "rm")]
    Remove {
        /// Community string
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum SnmpNotificationCommand {
    /// List trap notifications and their state
    #[command(alias = "ls")]
    List,

    /// Enable or disable a trap notification
    Set {
        /// Notification name, e.g. "bgp arista-established" or "all"
        name: String,

        /// Enable (true) or disable (false)
        #[arg(long, action = clap::ArgAction::Set)]
        enable: bool,
    },
}

#[derive(Debug, Args)]
pub struct ReceiverIdentity {
    /// Receiver host
    pub host: String,

    /// UDP port (default 162)
    #[arg(long)]
    pub port: Option<u16>,

    /// SNMP version (default v1)
    #[arg(long, value_enum)]
    pub snmp_version: Option<SnmpVersionArg>,

    /// Community string (v1 / v2c)
    #[arg(long)]
    pub community: Option<String>,

    /// User name (v3)
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum SnmpReceiverCommand {
    /// List notification receivers
    #[command(alias = "ls")]
    List,

    /// Create or update a receiver
    Ensure {
        #[command(flatten)]
        id: ReceiverIdentity,

        /// Notification type (default traps)
        #[arg(long = "type", value_enum)]
        kind: Option<ReceiverType>,

        /// v3 security level: noauth, auth, or priv
        #[arg(long)]
        security: Option<String>,
    },

    /// Delete the receiver entries for host, credential and port
    #[command(alias = "rm")]
    Remove {
        #[command(flatten)]
        id: ReceiverIdentity,

        /// Only remove entries of this notification type
        #[arg(long = "type", value_enum)]
        kind: Option<ReceiverType>,

        /// Only remove v3 entries with this security level
        #[arg(long)]
        security: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum SnmpUserCommand {
    /// List SNMP users
    #[command(alias = "ls")]
    List,

    /// Create or update a user
    Ensure {
        /// User name, optionally as name:version
        name: String,

        /// SNMP version (default v3)
        #[arg(long, value_enum)]
        snmp_version: Option<SnmpVersionArg>,

        /// Group the user belongs to (required for new users)
        #[arg(long)]
        group: Option<String>,

        /// Authentication protocol: md5 or sha
        #[arg(long)]
        auth: Option<String>,

        /// Authentication passphrase
        #[arg(long)]
        password: Option<String>,

        /// Privacy protocol: aes or des
        #[arg(long)]
        privacy: Option<String>,

        /// Privacy passphrase
        #[arg(long)]
        private_key: Option<String>,
    },

    /// Delete a user
    #[command(alias = "rm")]
    Remove {
        /// User name, optionally as name:version
        name: String,

        /// SNMP version (default v3)
        #[arg(long, value_enum)]
        snmp_version: Option<SnmpVersionArg>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RADIUS / TACACS+
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AaaArgs {
    #[command(subcommand)]
    pub command: AaaCommand,
}

#[derive(Debug, Subcommand)]
pub enum AaaCommand {
    /// Show global key, timeout, retransmit, and source interfaces
    Show,

    /// Set global parameters
    Set {
        /// Shared secret
        #[arg(long)]
        key: Option<String>,

        /// Key format: 0 (cleartext) or 7 (obfuscated, default)
        #[arg(long)]
        key_format: Option<u8>,

        /// Response timeout in seconds
        #[arg(long)]
        response_timeout: Option<u32>,

        /// Retransmit count (RADIUS only)
        #[arg(long)]
        retransmit: Option<u32>,

        /// Source interface per VRF as VRF=INTERFACE (repeatable)
        #[arg(long = "source-interface", value_name = "VRF=INTERFACE")]
        source_interfaces: Vec<String>,
    },

    /// Manage servers
    #[command(alias = "server")]
    Servers {
        #[command(subcommand)]
        command: AaaServerCommand,
    },

    /// Manage server groups
    #[command(alias = "group")]
    Groups {
        #[command(subcommand)]
        command: ServerGroupCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum AaaServerCommand {
    /// List servers
    #[command(alias = "ls")]
    List,

    /// Create or update a server
    Ensure {
        /// Server name: host, host/port (TACACS+), or host/auth/acct (RADIUS)
        name: String,

        /// VRF the server is reached through
        #[arg(long)]
        vrf: Option<String>,

        /// Response timeout in seconds
        #[arg(long)]
        response_timeout: Option<u32>,

        /// Retransmit count (RADIUS only)
        #[arg(long)]
        retransmit: Option<u32>,

        /// Per-server shared secret
        #[arg(long)]
        key: Option<String>,

        /// Key format: 0 (cleartext) or 7 (obfuscated, default)
        #[arg(long)]
        key_format: Option<u8>,

        /// Share one TCP connection for all sessions (TACACS+ only)
        #[arg(long, action = clap::ArgAction::Set)]
        multiplex: Option<bool>,
    },

    /// Delete a server
    #[command(alias = "rm")]
    Remove {
        /// Server name: host, host/port (TACACS+), or host/auth/acct (RADIUS)
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ServerGroupCommand {
    /// List server groups and their members
    #[command(alias = "ls")]
    List,

    /// Create a group or replace its member list
    Ensure {
        /// Group name
        name: String,

        /// Member servers in order, in the same name format as `servers ensure`
        #[arg(long = "server", required = true)]
        servers: Vec<String>,
    },

    /// Delete a server group
    #[command(alias = "rm")]
    Remove {
        /// Group name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  NTP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct NtpArgs {
    #[command(subcommand)]
    pub command: NtpCommand,
}

#[derive(Debug, Subcommand)]
pub enum NtpCommand {
    /// Show the NTP source interface
    Show,

    /// Set the NTP source interface ("" removes it)
    Set {
        #[arg(long)]
        source_interface: String,
    },

    /// Manage NTP servers
    #[command(alias = "server")]
    Servers {
        #[command(subcommand)]
        command: NtpServerCommand,
    },

    /// Manage NTP authentication keys
    #[command(alias = "key")]
    Keys {
        #[command(subcommand)]
        command: NtpKeyCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum NtpServerCommand {
    /// List NTP servers
    #[command(alias = "ls")]
    List,

    /// Add a server or change its preference
    Ensure {
        /// Server address
        host: String,

        /// Mark the server as preferred
        #[arg(long, action = clap::ArgAction::Set)]
        prefer: Option<bool>,
    },

    /// Delete a server
    #[command(alias = "rm")]
    Remove {
        /// Server address
        host: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum NtpKeyCommand {
    /// List authentication keys
    #[command(alias = "ls")]
    List,

    /// Create or update a key
    Ensure {
        /// Key ID
        id: u32,

        /// Hash algorithm: md5 or sha1
        #[arg(long)]
        algorithm: Option<String>,

        /// Key mode: 0 (cleartext) or 7 (obfuscated, default)
        #[arg(long)]
        mode: Option<u8>,

        /// Key secret
        #[arg(long)]
        password: Option<String>,
    },

    /// Delete a key
    #[command(alias = "rm")]
    Remove {
        /// Key ID
        id: u32,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DNS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DnsArgs {
    #[command(subcommand)]
    pub command: DnsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DnsCommand {
    /// Show domain name, name servers, and search list
    Show,

    /// Converge the domain name and whole lists at once
    Set {
        /// Domain name ("" removes it)
        #[arg(long)]
        domain: Option<String>,

        /// Complete search list (comma-separated)
        #[arg(long, value_delimiter = ',')]
        search: Option<Vec<String>>,

        /// Complete name-server list (comma-separated)
        #[arg(long, value_delimiter = ',')]
        servers: Option<Vec<String>>,
    },

    /// Manage individual name servers
    #[command(alias = "ns")]
    NameServers {
        #[command(subcommand)]
        command: DnsEntryCommand,
    },

    /// Manage individual search domains
    #[command(alias = "search")]
    SearchDomains {
        #[command(subcommand)]
        command: DnsEntryCommand,
    },

    /// Manage the domain name as a single entry
    DomainName {
        #[command(subcommand)]
        command: DnsEntryCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum DnsEntryCommand {
    /// List entries
    #[command(alias = "ls")]
    List,

    /// Add an entry
    Ensure { value: String },

    /// Remove an entry
    #[command(alias = "rm")]
    Remove { value: String },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOGGING
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoggingArgs {
    #[command(subcommand)]
    pub command: LoggingCommand,
}

#[derive(Debug, Subcommand)]
pub enum LoggingCommand {
    /// Show logging state and source interfaces
    Show,

    /// Turn logging on
    Enable,

    /// Turn logging off
    Disable,

    /// Replace the logging source interfaces
    Set {
        /// Source interface per VRF as VRF=INTERFACE (repeatable)
        #[arg(long = "source-interface", value_name = "VRF=INTERFACE", required = true)]
        source_interfaces: Vec<String>,
    },

    /// Manage remote syslog hosts
    #[command(alias = "hosts")]
    Servers {
        #[command(subcommand)]
        command: SyslogServerCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum SyslogServerCommand {
    /// List remote syslog hosts
    #[command(alias = "ls")]
    List,

    /// Add a host or change its port / VRF
    Ensure {
        /// Host address
        host: String,

        /// UDP port
        #[arg(long)]
        port: Option<u16>,

        /// VRF
        #[arg(long)]
        vrf: Option<String>,
    },

    /// Delete a host
    #[command(alias = "rm")]
    Remove {
        /// Host address
        host: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  APPLY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Manifest file (YAML or JSON): a list of resources tagged by `kind`
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create a profile with guided setup
    Init,

    /// Display current configuration (passwords hidden)
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the profile's password in the system keyring
    SetPassword,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
