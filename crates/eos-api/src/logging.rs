// Syslog endpoints

use tracing::debug;

use crate::aaa::{check_pairs, vrf_clause};
use crate::client::{EosClient, config_batch, negate};
use crate::error::Error;
use crate::models::LoggingConfig;
use crate::parse::running_config as parse;

impl EosClient {
    /// `show running-config all section logging`
    pub async fn logging_config(&self) -> Result<LoggingConfig, Error> {
        let text = self.running_config_section("logging", true).await?;
        parse::logging(&text)
    }

    /// `[no] logging on`
    pub async fn logging_set_enable(&self, enabled: bool) -> Result<(), Error> {
        self.configure(&config_batch([negate(enabled, "logging on")]), "set logging state")
            .await
    }

    /// `logging [vrf <vrf>] host <host> [<port>]`
    pub async fn logging_add_host(
        &self,
        host: &str,
        port: Option<u16>,
        vrf: Option<&str>,
    ) -> Result<(), Error> {
        let mut cmd = host_command(host, vrf);
        if let Some(port) = port {
            cmd.push_str(&format!(" {port}"));
        }
        debug!(host, ?port, ?vrf, "adding syslog host");
        self.configure(&config_batch([cmd]), &format!("add logging host {host}"))
            .await
    }

    /// `no logging [vrf <vrf>] host <host>`
    pub async fn logging_remove_host(&self, host: &str, vrf: Option<&str>) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("no {}", host_command(host, vrf))]),
            &format!("remove logging host {host}"),
        )
        .await
    }

    /// Make the per-VRF logging source interfaces exactly the given pairs.
    /// VRFs present on the switch but not in `vrfs` are cleared first.
    pub async fn logging_set_source_interfaces(
        &self,
        vrfs: &[String],
        interfaces: &[String],
    ) -> Result<(), Error> {
        check_pairs(vrfs, interfaces)?;
        let current = self.logging_config().await?.source_interfaces;
        let stale = current
            .keys()
            .filter(|vrf| !vrfs.contains(*vrf))
            .map(|vrf| format!("no logging{} source-interface", vrf_clause(vrf)));
        let wanted = vrfs
            .iter()
            .zip(interfaces)
            .map(|(vrf, iface)| format!("logging{} source-interface {iface}", vrf_clause(vrf)));
        let cmds: Vec<String> = stale.chain(wanted).collect();

        debug!(commands = cmds.len(), "setting logging source interfaces");
        self.configure(&config_batch(cmds), "set logging source interfaces")
            .await
    }
}

fn host_command(host: &str, vrf: Option<&str>) -> String {
    match vrf {
        Some(vrf) if vrf != "default" => format!("logging vrf {vrf} host {host}"),
        _ => format!("logging host {host}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vrf_is_implicit() {
        assert_eq!(host_command("10.1.1.1", Some("default")), "logging host 10.1.1.1");
        assert_eq!(host_command("10.1.1.1", None), "logging host 10.1.1.1");
        assert_eq!(
            host_command("10.1.1.1", Some("mgmt")),
            "logging vrf mgmt host 10.1.1.1"
        );
    }
}
