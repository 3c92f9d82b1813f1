// Ethernet interface provider
//
// Only front-panel `Ethernet*` ports are managed here; port-channels have
// their own provider. Interfaces cannot be created or destroyed, so there
// is no `ensure`. Speed and duplex are one CLI command on EOS and are
// always written together.

use serde::{Deserialize, Serialize};
use tracing::debug;

use eos_api::{EosClient, Interface, SpeedSetting};

use crate::convert::{bandwidth_to_speed, duplex_to_value, status_to_enabled};
use crate::error::CoreError;
use crate::provider::{ApplyReport, Provider, drift};

const ETHERNET_PREFIX: &str = "Ethernet";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceResource {
    pub name: String,
    pub description: Option<String>,
    pub enable: Option<bool>,
    pub mtu: Option<u32>,
    /// `10m`, `100m`, `1g`, `10g`, `40g`, `100g` or `auto`.
    pub speed: Option<String>,
    /// `full`, `half` or `auto`.
    pub duplex: Option<String>,
}

impl From<Interface> for InterfaceResource {
    fn from(iface: Interface) -> Self {
        Self {
            enable: Some(status_to_enabled(&iface.status)),
            mtu: iface.mtu,
            speed: iface.bandwidth.and_then(bandwidth_to_speed),
            // link-down ports report `duplexUnknown`
            duplex: iface
                .duplex
                .as_deref()
                .and_then(|d| duplex_to_value(d).ok())
                .map(str::to_owned),
            description: Some(iface.description),
            name: iface.name,
        }
    }
}

pub struct InterfaceProvider<'a> {
    client: &'a EosClient,
}

impl<'a> InterfaceProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for InterfaceProvider<'_> {
    type Resource = InterfaceResource;
    const KIND: &'static str = "interface";

    async fn instances(&self) -> Result<Vec<InterfaceResource>, CoreError> {
        Ok(self
            .client
            .interfaces()
            .await?
            .into_iter()
            .filter(|i| i.name.starts_with(ETHERNET_PREFIX))
            .map(InterfaceResource::from)
            .collect())
    }

    async fn apply(&self, desired: &InterfaceResource) -> Result<ApplyReport, CoreError> {
        let name = desired.name.as_str();
        let mut report = ApplyReport::new(Self::KIND, name);
        let current = self
            .instances()
            .await?
            .into_iter()
            .find(|i| i.name == name)
            .ok_or_else(|| CoreError::not_found(Self::KIND, name))?;

        if let Some(description) =
            drift(desired.description.as_deref(), current.description.as_deref())
        {
            self.client
                .interface_set_description(name, description)
                .await?;
            report.set("description", current.description.as_deref(), description);
        }
        if let Some(&enable) = drift(desired.enable.as_ref(), current.enable.as_ref()) {
            self.client.interface_set_shutdown(name, !enable).await?;
            report.set("enable", current.enable.as_ref(), &enable);
        }
        if let Some(&mtu) = drift(desired.mtu.as_ref(), current.mtu.as_ref()) {
            self.client.interface_set_mtu(name, mtu).await?;
            report.set("mtu", current.mtu.as_ref(), &mtu);
        }

        let speed = drift(desired.speed.as_deref(), current.speed.as_deref());
        let duplex = drift(desired.duplex.as_deref(), current.duplex.as_deref());
        if speed.is_some() || duplex.is_some() {
            let speed = desired
                .speed
                .as_deref()
                .or(current.speed.as_deref())
                .unwrap_or("auto");
            let duplex = desired
                .duplex
                .as_deref()
                .or(current.duplex.as_deref())
                .unwrap_or("full");
            let setting = SpeedSetting::from_speed_duplex(speed, duplex)?;
            debug!(name, %setting, "setting speed and duplex");
            self.client.interface_set_speed(name, setting).await?;
            if current.speed.as_deref() != Some(speed) {
                report.set("speed", current.speed.as_deref(), speed);
            }
            if current.duplex.as_deref() != Some(duplex) {
                report.set("duplex", current.duplex.as_deref(), duplex);
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_device_interface() {
        let iface = Interface {
            name: "Ethernet1".into(),
            description: "uplink".into(),
            mtu: Some(9214),
            bandwidth: Some(10_000_000_000),
            duplex: Some("duplexFull".into()),
            status: "connected".into(),
            hardware: Some("ethernet".into()),
        };
        let resource = InterfaceResource::from(iface);
        assert_eq!(resource.speed.as_deref(), Some("10g"));
        assert_eq!(resource.duplex.as_deref(), Some("full"));
        assert_eq!(resource.enable, Some(true));
    }

    #[test]
    fn disabled_port_with_unknown_duplex() {
        let iface = Interface {
            name: "Ethernet2".into(),
            description: String::new(),
            mtu: None,
            bandwidth: Some(0),
            duplex: Some("duplexUnknown".into()),
            status: "disabled".into(),
            hardware: None,
        };
        let resource = InterfaceResource::from(iface);
        assert_eq!(resource.enable, Some(false));
        assert_eq!(resource.speed, None);
        assert_eq!(resource.duplex, None);
    }
}
