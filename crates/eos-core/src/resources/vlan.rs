// VLAN provider
//
// `shutdown` maps onto the VLAN state: suspended VLANs are shut down,
// active ones are not. Other states (`act/lshut`, ...) are reported as
// unknown and cannot be set.

use serde::{Deserialize, Serialize};
use tracing::debug;

use eos_api::{EosClient, Vlan, VlanState};

use crate::error::CoreError;
use crate::provider::{ApplyReport, Ensure, Provider, drift};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanResource {
    pub id: u32,
    #[serde(default)]
    pub ensure: Ensure,
    pub vlan_name: Option<String>,
    pub shutdown: Option<bool>,
}

impl TryFrom<Vlan> for VlanResource {
    type Error = CoreError;

    fn try_from(vlan: Vlan) -> Result<Self, Self::Error> {
        let id = vlan
            .id
            .parse()
            .map_err(|_| CoreError::Protocol(format!("invalid VLAN id '{}'", vlan.id)))?;
        let shutdown = match vlan.state {
            VlanState::Active => Some(false),
            VlanState::Suspend => Some(true),
            VlanState::Other(_) => None,
        };
        Ok(Self {
            id,
            ensure: Ensure::Present,
            vlan_name: Some(vlan.name),
            shutdown,
        })
    }
}

pub struct VlanProvider<'a> {
    client: &'a EosClient,
}

impl<'a> VlanProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for VlanProvider<'_> {
    type Resource = VlanResource;
    const KIND: &'static str = "vlan";

    async fn instances(&self) -> Result<Vec<VlanResource>, CoreError> {
        self.client
            .vlans()
            .await?
            .into_iter()
            .map(VlanResource::try_from)
            .collect()
    }

    async fn apply(&self, desired: &VlanResource) -> Result<ApplyReport, CoreError> {
        let id = desired.id;
        let mut report = ApplyReport::new(Self::KIND, id.to_string());
        let current = self
            .client
            .vlan(id)
            .await?
            .map(VlanResource::try_from)
            .transpose()?;

        let current = match (desired.ensure, current) {
            (Ensure::Absent, None) => return Ok(report),
            (Ensure::Absent, Some(_)) => {
                debug!(id, "destroying vlan");
                self.client.vlan_destroy(id).await?;
                report.destroyed();
                return Ok(report);
            }
            (Ensure::Present, None) => {
                debug!(id, "creating vlan");
                self.client.vlan_create(id).await?;
                report.created();
                VlanResource::default()
            }
            (Ensure::Present, Some(current)) => current,
        };

        if let Some(name) = drift(desired.vlan_name.as_deref(), current.vlan_name.as_deref()) {
            self.client.vlan_rename(id, name).await?;
            report.set("vlan_name", current.vlan_name.as_deref(), name);
        }
        if let Some(&shutdown) = drift(desired.shutdown.as_ref(), current.shutdown.as_ref()) {
            let state = if shutdown {
                VlanState::Suspend
            } else {
                VlanState::Active
            };
            self.client.vlan_set_state(id, &state).await?;
            report.set("shutdown", current.shutdown.as_ref(), &shutdown);
        }

        Ok(report)
    }
}
