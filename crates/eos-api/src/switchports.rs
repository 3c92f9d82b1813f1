// Switchport (layer-2 interface) endpoints

use crate::client::EosClient;
use crate::error::Error;
use crate::models::{ShowSwitchports, Switchport};
use crate::parse::interface_order;

impl EosClient {
    /// Interfaces currently operating as switchports.
    ///
    /// `show interfaces switchport`
    pub async fn switchports(&self) -> Result<Vec<Switchport>, Error> {
        let show: ShowSwitchports = self
            .last_json(&["show interfaces switchport".to_owned()], "list switchports")
            .await?;
        let mut ports: Vec<Switchport> = show
            .switchports
            .into_iter()
            .filter(|(_, entry)| entry.enabled)
            .map(|(name, entry)| Switchport {
                name,
                mode: entry.switchport_info.mode,
                access_vlan: entry.switchport_info.access_vlan_id,
                trunk_allowed_vlans: entry.switchport_info.trunk_allowed_vlans,
            })
            .collect();
        ports.sort_by(|a, b| interface_order(&a.name, &b.name));
        Ok(ports)
    }

    pub async fn switchport_create(&self, name: &str) -> Result<(), Error> {
        self.interface_apply(name, ["switchport".to_owned()], &format!("enable switchport on {name}"))
            .await
    }

    pub async fn switchport_remove(&self, name: &str) -> Result<(), Error> {
        self.interface_apply(
            name,
            ["no switchport".to_owned()],
            &format!("disable switchport on {name}"),
        )
        .await
    }

    /// `switchport mode <access|trunk>`
    pub async fn switchport_set_mode(&self, name: &str, mode: &str) -> Result<(), Error> {
        if !matches!(mode, "access" | "trunk") {
            return Err(Error::Validation(format!(
                "switchport mode must be 'access' or 'trunk', got '{mode}'"
            )));
        }
        self.interface_apply(
            name,
            [format!("switchport mode {mode}")],
            &format!("set {name} switchport mode to {mode}"),
        )
        .await
    }

    pub async fn switchport_set_access_vlan(&self, name: &str, vlan: u32) -> Result<(), Error> {
        self.interface_apply(
            name,
            [format!("switchport access vlan {vlan}")],
            &format!("set {name} access vlan to {vlan}"),
        )
        .await
    }

    /// `switchport trunk allowed vlan <range>`; `range` uses EOS syntax
    /// (`1-10,20`, `all`, `none`).
    pub async fn switchport_set_trunk_allowed_vlans(&self, name: &str, range: &str) -> Result<(), Error> {
        self.interface_apply(
            name,
            [format!("switchport trunk allowed vlan {range}")],
            &format!("set {name} trunk allowed vlans"),
        )
        .await
    }
}
