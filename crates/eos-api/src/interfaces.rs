// Interface endpoints
//
// Every setter enters `interface <name>` before its sub-command.

use tracing::debug;

use crate::client::{EosClient, config_batch, negate};
use crate::error::Error;
use crate::models::{Interface, ShowInterfaces, SpeedSetting};
use crate::parse::interface_order;

impl EosClient {
    /// All interfaces, in interface order.
    ///
    /// `show interfaces`
    pub async fn interfaces(&self) -> Result<Vec<Interface>, Error> {
        let show: ShowInterfaces = self
            .last_json(&["show interfaces".to_owned()], "list interfaces")
            .await?;
        let mut interfaces: Vec<Interface> = show
            .interfaces
            .into_iter()
            .map(|(name, entry)| Interface {
                name,
                description: entry.description,
                mtu: entry.mtu,
                bandwidth: entry.bandwidth,
                duplex: entry.duplex,
                status: entry.interface_status,
                hardware: entry.hardware,
            })
            .collect();
        interfaces.sort_by(|a, b| interface_order(&a.name, &b.name));
        Ok(interfaces)
    }

    /// Run sub-commands inside `interface <name>`.
    pub(crate) async fn interface_apply(
        &self,
        name: &str,
        cmds: impl IntoIterator<Item = String>,
        action: &str,
    ) -> Result<(), Error> {
        let batch = config_batch(std::iter::once(format!("interface {name}")).chain(cmds));
        self.configure(&batch, action).await
    }

    pub async fn interface_set_description(&self, name: &str, description: &str) -> Result<(), Error> {
        let cmd = if description.is_empty() {
            "no description".to_owned()
        } else {
            format!("description {description}")
        };
        self.interface_apply(name, [cmd], &format!("set {name} description"))
            .await
    }

    /// `shutdown` when `shutdown` is true, `no shutdown` otherwise.
    pub async fn interface_set_shutdown(&self, name: &str, shutdown: bool) -> Result<(), Error> {
        debug!(name, shutdown, "setting interface admin state");
        let cmd = negate(shutdown, "shutdown");
        let state = if shutdown { "disable" } else { "enable" };
        self.interface_apply(name, [cmd], &format!("{state} {name}"))
            .await
    }

    pub async fn interface_set_mtu(&self, name: &str, mtu: u32) -> Result<(), Error> {
        self.interface_apply(name, [format!("mtu {mtu}")], &format!("set {name} mtu to {mtu}"))
            .await
    }

    pub async fn interface_set_speed(&self, name: &str, speed: SpeedSetting) -> Result<(), Error> {
        self.interface_apply(name, [speed.command()], &format!("set {name} speed to {speed}"))
            .await
    }
}
