// ── Resource families ──
//
// One module per device feature. Every provider borrows the client, so a
// single `EosClient` can back any number of providers.

pub mod aaa;
pub mod dns;
pub mod interface;
pub mod ntp;
pub mod port_channel;
pub mod snmp;
pub mod switchport;
pub mod syslog;
pub mod vlan;

pub use aaa::{
    AaaSettings, RadiusServerGroupProvider, RadiusServerProvider, RadiusServerResource,
    RadiusSettingsProvider, ServerGroupResource, TacacsServerGroupProvider, TacacsServerProvider,
    TacacsServerResource, TacacsSettingsProvider,
};
pub use dns::{
    DnsSettings, DnsSettingsProvider, DomainName, DomainNameProvider, NameServer,
    NameServerProvider, SearchDomain, SearchDomainProvider,
};
pub use interface::{InterfaceProvider, InterfaceResource};
pub use ntp::{
    NtpAuthKeyProvider, NtpAuthKeyResource, NtpServerProvider, NtpServerResource, NtpSettings,
    NtpSettingsProvider,
};
pub use port_channel::{ChannelGroup, PortChannelProvider};
pub use snmp::{
    SnmpCommunityProvider, SnmpCommunityResource, SnmpNotificationProvider,
    SnmpNotificationResource, SnmpReceiverProvider, SnmpReceiverResource, SnmpSettingsProvider,
    SnmpSettingsResource, SnmpUserProvider, SnmpUserResource,
};
pub use switchport::{SwitchportProvider, SwitchportResource};
pub use syslog::{SyslogServer, SyslogServerProvider, SyslogSettings, SyslogSettingsProvider};
pub use vlan::{VlanProvider, VlanResource};

/// Name used by singleton resources (one per switch).
pub const SETTINGS: &str = "settings";
