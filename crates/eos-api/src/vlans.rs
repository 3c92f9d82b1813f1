// VLAN endpoints
//
// Reads come from the `show vlan` JSON model; every mutation enters the
// `vlan <id>` context before its sub-command.

use std::fmt::Display;

use tracing::debug;

use crate::client::{EosClient, config_batch};
use crate::error::Error;
use crate::models::{ShowVlan, Vlan, VlanEntry, VlanState};
use crate::rpc::RequestOptions;

impl EosClient {
    /// All VLANs, ordered by numeric id.
    ///
    /// `show vlan`
    pub async fn vlans(&self) -> Result<Vec<Vlan>, Error> {
        let show: ShowVlan = self.last_json(&["show vlan".to_owned()], "list vlans").await?;
        let mut vlans: Vec<Vlan> = show.vlans.into_iter().map(into_vlan).collect();
        vlans.sort_by_key(|v| v.id.parse::<u32>().unwrap_or(u32::MAX));
        Ok(vlans)
    }

    /// A single VLAN, or `None` when the device does not know the id.
    ///
    /// `show vlan <id>`
    pub async fn vlan(&self, id: impl Display) -> Result<Option<Vlan>, Error> {
        let response = self
            .send(&[format!("show vlan {id}")], &RequestOptions::default())
            .await?;
        if response.error.is_some() {
            debug!(%id, "vlan not found");
            return Ok(None);
        }
        let Some(last) = response.result.and_then(|mut r| r.pop()) else {
            return Ok(None);
        };
        let show: ShowVlan = serde_json::from_value(last.clone()).map_err(|e| {
            Error::Deserialization {
                message: e.to_string(),
                body: last.to_string(),
            }
        })?;
        Ok(show.vlans.into_iter().map(into_vlan).next())
    }

    pub async fn vlan_create(&self, id: impl Display) -> Result<(), Error> {
        debug!(%id, "creating vlan");
        self.configure(&config_batch([format!("vlan {id}")]), &format!("create vlan {id}"))
            .await
    }

    pub async fn vlan_destroy(&self, id: impl Display) -> Result<(), Error> {
        debug!(%id, "destroying vlan");
        self.configure(
            &config_batch([format!("no vlan {id}")]),
            &format!("destroy vlan {id}"),
        )
        .await
    }

    pub async fn vlan_rename(&self, id: impl Display, name: &str) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("vlan {id}"), format!("name {name}")]),
            &format!("name vlan {id} as {name}"),
        )
        .await
    }

    /// Set the administrative state. Only `active` and `suspend` are settable.
    pub async fn vlan_set_state(&self, id: impl Display, state: &VlanState) -> Result<(), Error> {
        let Some(keyword) = state.keyword() else {
            return Err(Error::Validation(format!(
                "vlan state must be 'active' or 'suspend', got '{state}'"
            )));
        };
        self.configure(
            &config_batch([format!("vlan {id}"), format!("state {keyword}")]),
            &format!("set vlan {id} state to {keyword}"),
        )
        .await
    }
}

fn into_vlan((id, entry): (String, VlanEntry)) -> Vlan {
    Vlan {
        id,
        name: entry.name,
        state: VlanState::from_status(&entry.status),
        interfaces: entry.interfaces.into_keys().collect(),
        dynamic: entry.dynamic,
    }
}
