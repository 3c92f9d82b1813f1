// Port-channel and channel-group endpoints
//
// Membership and LACP mode are only available as text, so reads go
// through `parse::port_channel`. A channel group is created implicitly by
// joining its first member and destroyed by removing the Port-Channel
// interface.

use tracing::debug;

use crate::client::{EosClient, config_batch};
use crate::error::Error;
use crate::models::{PortChannel, PortChannelMode};
use crate::parse::port_channel;

const PORT_CHANNEL_PREFIX: &str = "Port-Channel";

impl EosClient {
    /// Channel name → sorted member ports.
    ///
    /// `show etherchannel detailed`
    pub async fn port_channels_detailed(
        &self,
    ) -> Result<std::collections::BTreeMap<String, Vec<String>>, Error> {
        let text = self
            .last_output(
                &["show etherchannel detailed".to_owned()],
                "get port channels",
            )
            .await?;
        port_channel::port_channel_detail(&text)
    }

    /// Channel name → LACP mode.
    ///
    /// `show port-channel summary`
    pub async fn port_channel_modes(
        &self,
    ) -> Result<std::collections::BTreeMap<String, PortChannelMode>, Error> {
        let text = self
            .last_output(
                &["show port-channel summary".to_owned()],
                "get port channel modes",
            )
            .await?;
        port_channel::port_channel_modes(&text)
    }

    /// Configured `min-links` of one channel; 0 when unset.
    pub async fn port_channel_min_links(&self, name: &str) -> Result<u32, Error> {
        let text = self
            .last_output(
                &[format!("show running-config interfaces {name}")],
                &format!("get {name} configuration"),
            )
            .await?;
        Ok(port_channel::min_links(&text))
    }

    /// Merged view of membership, mode and min-links for every channel.
    pub async fn port_channels(&self) -> Result<Vec<PortChannel>, Error> {
        let detailed = self.port_channels_detailed().await?;
        let modes = self.port_channel_modes().await?;

        let mut channels = Vec::with_capacity(detailed.len());
        for (name, ports) in detailed {
            let min_links = self.port_channel_min_links(&name).await?;
            channels.push(PortChannel {
                mode: modes.get(&name).copied(),
                name,
                ports,
                min_links,
            });
        }
        Ok(channels)
    }

    pub async fn port_channel_create(&self, name: &str) -> Result<(), Error> {
        self.interface_apply(name, std::iter::empty(), &format!("create {name}"))
            .await
    }

    /// `no interface <name>`
    pub async fn port_channel_destroy(&self, name: &str) -> Result<(), Error> {
        debug!(name, "removing port-channel");
        self.configure(
            &config_batch([format!("no interface {name}")]),
            &format!("remove {name}"),
        )
        .await
    }

    pub async fn port_channel_set_min_links(&self, name: &str, min_links: u32) -> Result<(), Error> {
        self.interface_apply(
            name,
            [format!("port-channel min-links {min_links}")],
            &format!("set {name} min-links to {min_links}"),
        )
        .await
    }

    pub async fn port_channel_set_description(
        &self,
        name: &str,
        description: &str,
    ) -> Result<(), Error> {
        self.interface_set_description(name, description).await
    }

    /// `channel-group <group> mode <active|passive|on>` on one member.
    pub async fn interface_set_channel_group(
        &self,
        interface: &str,
        group: u32,
        mode: PortChannelMode,
    ) -> Result<(), Error> {
        debug!(interface, group, %mode, "joining channel group");
        self.interface_apply(
            interface,
            [format!("channel-group {group} mode {}", mode.keyword())],
            &format!("join {interface} to channel group {group}"),
        )
        .await
    }

    /// `no channel-group` on one member.
    pub async fn interface_unset_channel_group(&self, interface: &str) -> Result<(), Error> {
        self.interface_apply(
            interface,
            ["no channel-group".to_owned()],
            &format!("remove {interface} from channel group"),
        )
        .await
    }

    /// Create a channel group by joining each member, one batch per member.
    pub async fn channel_group_create(
        &self,
        name: &str,
        mode: PortChannelMode,
        interfaces: &[String],
    ) -> Result<(), Error> {
        if interfaces.is_empty() {
            return Err(Error::Validation(format!(
                "{name} needs at least one member interface"
            )));
        }
        let group = channel_group_number(name)?;
        for interface in interfaces {
            self.interface_set_channel_group(interface, group, mode)
                .await?;
        }
        Ok(())
    }

    /// Take every member out of an existing channel group, one batch per
    /// member. The Port-Channel interface itself is left in place.
    pub async fn channel_group_destroy(&self, name: &str) -> Result<(), Error> {
        let existing = self.port_channels_detailed().await?;
        let Some(members) = existing.get(name) else {
            let known: Vec<&str> = existing.keys().map(String::as_str).collect();
            return Err(Error::Validation(format!("{name} is not in {known:?}")));
        };
        for interface in members {
            self.interface_unset_channel_group(interface).await?;
        }
        Ok(())
    }

    /// Re-join every current member with a new LACP mode.
    pub async fn channel_group_set_mode(&self, name: &str, mode: PortChannelMode) -> Result<(), Error> {
        let group = channel_group_number(name)?;
        let existing = self.port_channels_detailed().await?;
        let Some(members) = existing.get(name) else {
            return Err(Error::Validation(format!("{name} does not exist")));
        };
        for interface in members {
            self.interface_set_channel_group(interface, group, mode)
                .await?;
        }
        Ok(())
    }

    /// Make membership exactly `interfaces`, leaving common members alone.
    pub async fn channel_group_set_members(
        &self,
        name: &str,
        mode: PortChannelMode,
        interfaces: &[String],
    ) -> Result<(), Error> {
        let group = channel_group_number(name)?;
        let existing = self.port_channels_detailed().await?;
        let current = existing.get(name).cloned().unwrap_or_default();

        for interface in current.iter().filter(|i| !interfaces.contains(*i)) {
            self.interface_unset_channel_group(interface).await?;
        }
        for interface in interfaces.iter().filter(|i| !current.contains(*i)) {
            self.interface_set_channel_group(interface, group, mode)
                .await?;
        }
        Ok(())
    }
}

/// `Port-Channel9` -> 9
pub fn channel_group_number(name: &str) -> Result<u32, Error> {
    name.strip_prefix(PORT_CHANNEL_PREFIX)
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| Error::Validation(format!("'{name}' is not a Port-Channel interface name")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_group_number_from_name() {
        assert_eq!(channel_group_number("Port-Channel9").ok(), Some(9));
        assert!(channel_group_number("Ethernet1").is_err());
        assert!(channel_group_number("Port-Channel").is_err());
    }
}
