//! Syslog command handlers.

use tabled::Tabled;

use eos_core::{
    EosClient, Ensure, SyslogServer, SyslogServerProvider, SyslogSettings, SyslogSettingsProvider,
};

use crate::cli::{GlobalOpts, LoggingArgs, LoggingCommand, SyslogServerCommand};
use crate::error::CliError;
use crate::output::or_dash;

use super::{aaa, util};

#[derive(Tabled)]
struct ServerRow {
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "VRF")]
    vrf: String,
}

impl From<&SyslogServer> for ServerRow {
    fn from(s: &SyslogServer) -> Self {
        Self {
            host: s.host.clone(),
            port: or_dash(s.port),
            vrf: or_dash(s.vrf.as_deref()),
        }
    }
}

fn settings_detail(s: &SyslogSettings) -> String {
    let state = match s.enable {
        Some(true) => "enabled",
        Some(false) => "disabled",
        None => "-",
    };
    let mut lines = vec![format!("Logging: {state}")];
    match s.source_interfaces.as_ref().filter(|m| !m.is_empty()) {
        Some(map) => {
            lines.push("Source interfaces:".into());
            lines.extend(map.iter().map(|(vrf, iface)| format!("  {vrf}: {iface}")));
        }
        None => lines.push("Source interfaces: -".into()),
    }
    lines.join("\n")
}

pub async fn handle(
    client: &EosClient,
    args: LoggingArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        LoggingCommand::Show => {
            util::show(&SyslogSettingsProvider::new(client), global, settings_detail).await
        }
        LoggingCommand::Enable => set_enabled(client, true, global).await,
        LoggingCommand::Disable => set_enabled(client, false, global).await,
        LoggingCommand::Set { source_interfaces } => {
            let desired = SyslogSettings {
                source_interfaces: Some(aaa::parse_source_interfaces(&source_interfaces)?),
                ..SyslogSettings::default()
            };
            util::apply(&SyslogSettingsProvider::new(client), &desired, global).await
        }
        LoggingCommand::Servers { command } => servers(client, command, global).await,
    }
}

async fn set_enabled(client: &EosClient, enable: bool, global: &GlobalOpts) -> Result<(), CliError> {
    let desired = SyslogSettings {
        enable: Some(enable),
        ..SyslogSettings::default()
    };
    util::apply(&SyslogSettingsProvider::new(client), &desired, global).await
}

async fn servers(
    client: &EosClient,
    command: SyslogServerCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let provider = SyslogServerProvider::new(client);
    match command {
        SyslogServerCommand::List => {
            util::list(&provider, global, |s| ServerRow::from(s), |s| s.host.clone()).await
        }
        SyslogServerCommand::Ensure { host, port, vrf } => {
            let desired = SyslogServer {
                host,
                ensure: Ensure::Present,
                port,
                vrf,
            };
            util::apply(&provider, &desired, global).await
        }
        SyslogServerCommand::Remove { host } => {
            let desired = SyslogServer {
                host: host.clone(),
                ensure: Ensure::Absent,
                ..SyslogServer::default()
            };
            util::remove(&provider, &desired, &host, global).await
        }
    }
}
