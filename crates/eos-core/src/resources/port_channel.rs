// Port-channel (LAG) provider
//
// A channel group exists on EOS only while it has members, so creating one
// requires at least one interface. Membership is compared as a set in
// interface order; LACP mode changes re-join every member.

use serde::{Deserialize, Serialize};
use tracing::debug;

use eos_api::parse::interface_order;
use eos_api::{EosClient, PortChannel, PortChannelMode};

use crate::error::CoreError;
use crate::provider::{ApplyReport, Ensure, Provider, drift, list, reject_unsupported};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelGroup {
    /// `Port-Channel<n>`
    pub name: String,
    #[serde(default)]
    pub ensure: Ensure,
    pub mode: Option<PortChannelMode>,
    pub interfaces: Option<Vec<String>>,
    pub minimum_links: Option<u32>,
    pub description: Option<String>,
    /// Not settable on port-channels; present so a managed value fails loudly.
    pub mtu: Option<u32>,
}

impl From<PortChannel> for ChannelGroup {
    fn from(channel: PortChannel) -> Self {
        Self {
            name: channel.name,
            ensure: Ensure::Present,
            mode: channel.mode,
            interfaces: Some(channel.ports),
            minimum_links: Some(channel.min_links),
            description: None,
            mtu: None,
        }
    }
}

fn sorted(interfaces: &[String]) -> Vec<String> {
    let mut out = interfaces.to_vec();
    out.sort_by(|a, b| interface_order(a, b));
    out.dedup();
    out
}

pub struct PortChannelProvider<'a> {
    client: &'a EosClient,
}

impl<'a> PortChannelProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }

    async fn description(&self, name: &str) -> Result<Option<String>, CoreError> {
        Ok(self
            .client
            .interfaces()
            .await?
            .into_iter()
            .find(|i| i.name == name)
            .map(|i| i.description))
    }
}

impl Provider for PortChannelProvider<'_> {
    type Resource = ChannelGroup;
    const KIND: &'static str = "port_channel";

    async fn instances(&self) -> Result<Vec<ChannelGroup>, CoreError> {
        let mut groups: Vec<ChannelGroup> = self
            .client
            .port_channels()
            .await?
            .into_iter()
            .map(ChannelGroup::from)
            .collect();
        let interfaces = self.client.interfaces().await?;
        for group in &mut groups {
            group.description = interfaces
                .iter()
                .find(|i| i.name == group.name)
                .map(|i| i.description.clone());
        }
        Ok(groups)
    }

    async fn apply(&self, desired: &ChannelGroup) -> Result<ApplyReport, CoreError> {
        reject_unsupported(Self::KIND, "mtu", desired.mtu.as_ref())?;

        let name = desired.name.as_str();
        let mut report = ApplyReport::new(Self::KIND, name);
        let current = self
            .client
            .port_channels()
            .await?
            .into_iter()
            .find(|c| c.name == name)
            .map(ChannelGroup::from);

        let current = match (desired.ensure, current) {
            (Ensure::Absent, None) => return Ok(report),
            (Ensure::Absent, Some(_)) => {
                self.client.channel_group_destroy(name).await?;
                report.destroyed();
                return Ok(report);
            }
            (Ensure::Present, None) => {
                let mode = desired.mode.unwrap_or(PortChannelMode::Active);
                let members = sorted(desired.interfaces.as_deref().unwrap_or_default());
                debug!(name, %mode, members = members.len(), "creating channel group");
                self.client
                    .channel_group_create(name, mode, &members)
                    .await?;
                report.created();
                ChannelGroup {
                    name: name.to_owned(),
                    mode: Some(mode),
                    interfaces: Some(members),
                    minimum_links: Some(0),
                    ..ChannelGroup::default()
                }
            }
            (Ensure::Present, Some(current)) => current,
        };

        let mode = desired
            .mode
            .or(current.mode)
            .unwrap_or(PortChannelMode::Active);
        if let Some(&want) = drift(desired.mode.as_ref(), current.mode.as_ref()) {
            self.client.channel_group_set_mode(name, want).await?;
            report.set("mode", current.mode.as_ref(), &want);
        }

        let have = sorted(current.interfaces.as_deref().unwrap_or_default());
        if let Some(want) = desired.interfaces.as_deref().map(sorted) {
            if want != have {
                self.client
                    .channel_group_set_members(name, mode, &want)
                    .await?;
                report.set("interfaces", Some(&list(&have)), &list(&want));
            }
        }

        if let Some(&links) = drift(desired.minimum_links.as_ref(), current.minimum_links.as_ref())
        {
            self.client.port_channel_set_min_links(name, links).await?;
            report.set("minimum_links", current.minimum_links.as_ref(), &links);
        }

        if let Some(want) = desired.description.as_deref() {
            let have = self.description(name).await?;
            if have.as_deref() != Some(want) {
                self.client.port_channel_set_description(name, want).await?;
                report.set("description", have.as_deref(), want);
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_ordered_by_interface() {
        let members = vec![
            "Ethernet10".to_owned(),
            "Ethernet2".to_owned(),
            "Ethernet2".to_owned(),
        ];
        assert_eq!(sorted(&members), vec!["Ethernet2", "Ethernet10"]);
    }
}
