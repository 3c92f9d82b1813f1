// Switchport provider
//
// Trunk VLANs are handled as id lists and written back in EOS range
// syntax. EOS offers no per-port encapsulation or pruning knobs.

use serde::{Deserialize, Serialize};

use eos_api::{EosClient, Switchport};

use crate::convert::{ids_to_vlan_range, vlan_range_to_ids};
use crate::error::CoreError;
use crate::provider::{ApplyReport, Ensure, Provider, drift, reject_unsupported};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchportResource {
    pub name: String,
    #[serde(default)]
    pub ensure: Ensure,
    /// `access` or `trunk`.
    pub mode: Option<String>,
    pub tagged_vlans: Option<Vec<u32>>,
    pub untagged_vlan: Option<u32>,
    pub encapsulation: Option<String>,
    pub pruned_vlans: Option<Vec<u32>>,
}

impl TryFrom<Switchport> for SwitchportResource {
    type Error = CoreError;

    fn try_from(port: Switchport) -> Result<Self, Self::Error> {
        Ok(Self {
            tagged_vlans: Some(vlan_range_to_ids(&port.trunk_allowed_vlans)?),
            untagged_vlan: port.access_vlan,
            mode: Some(port.mode),
            name: port.name,
            ensure: Ensure::Present,
            encapsulation: None,
            pruned_vlans: None,
        })
    }
}

pub struct SwitchportProvider<'a> {
    client: &'a EosClient,
}

impl<'a> SwitchportProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for SwitchportProvider<'_> {
    type Resource = SwitchportResource;
    const KIND: &'static str = "switchport";

    async fn instances(&self) -> Result<Vec<SwitchportResource>, CoreError> {
        self.client
            .switchports()
            .await?
            .into_iter()
            .map(SwitchportResource::try_from)
            .collect()
    }

    async fn apply(&self, desired: &SwitchportResource) -> Result<ApplyReport, CoreError> {
        reject_unsupported(Self::KIND, "encapsulation", desired.encapsulation.as_ref())?;
        reject_unsupported(Self::KIND, "pruned_vlans", desired.pruned_vlans.as_ref())?;

        let name = desired.name.as_str();
        let mut report = ApplyReport::new(Self::KIND, name);
        let current = self
            .instances()
            .await?
            .into_iter()
            .find(|p| p.name == name);

        let current = match (desired.ensure, current) {
            (Ensure::Absent, None) => return Ok(report),
            (Ensure::Absent, Some(_)) => {
                self.client.switchport_remove(name).await?;
                report.destroyed();
                return Ok(report);
            }
            (Ensure::Present, None) => {
                self.client.switchport_create(name).await?;
                report.created();
                SwitchportResource::default()
            }
            (Ensure::Present, Some(current)) => current,
        };

        if let Some(mode) = drift(desired.mode.as_deref(), current.mode.as_deref()) {
            self.client.switchport_set_mode(name, mode).await?;
            report.set("mode", current.mode.as_deref(), mode);
        }
        if let Some(&vlan) = drift(desired.untagged_vlan.as_ref(), current.untagged_vlan.as_ref()) {
            self.client.switchport_set_access_vlan(name, vlan).await?;
            report.set("untagged_vlan", current.untagged_vlan.as_ref(), &vlan);
        }

        let want = desired.tagged_vlans.as_deref().map(ids_to_vlan_range);
        let have = current.tagged_vlans.as_deref().map(ids_to_vlan_range);
        if let Some(range) = drift(want.as_deref(), have.as_deref()) {
            self.client
                .switchport_set_trunk_allowed_vlans(name, range)
                .await?;
            report.set("tagged_vlans", have.as_deref(), range);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trunk_range_becomes_vlan_list() {
        let port = Switchport {
            name: "Ethernet3".into(),
            mode: "trunk".into(),
            access_vlan: Some(1),
            trunk_allowed_vlans: "10-12,20".into(),
        };
        let resource = SwitchportResource::try_from(port).ok();
        assert_eq!(
            resource.and_then(|r| r.tagged_vlans),
            Some(vec![10, 11, 12, 20])
        );
    }
}
