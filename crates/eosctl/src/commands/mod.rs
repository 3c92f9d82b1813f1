//! Command dispatch: bridges CLI args -> providers -> output formatting.

pub mod aaa;
pub mod apply;
pub mod config_cmd;
pub mod dns;
pub mod interfaces;
pub mod logging;
pub mod ntp;
pub mod port_channels;
pub mod snmp;
pub mod switchports;
pub mod system;
pub mod util;
pub mod vlans;

use eos_core::{EosClient, GroupKind};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a switch-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &EosClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Vlans(args) => vlans::handle(client, args, global).await,
        Command::Interfaces(args) => interfaces::handle(client, args, global).await,
        Command::PortChannels(args) => port_channels::handle(client, args, global).await,
        Command::Switchports(args) => switchports::handle(client, args, global).await,
        Command::Snmp(args) => snmp::handle(client, args, global).await,
        Command::Radius(args) => aaa::handle(client, GroupKind::Radius, args, global).await,
        Command::Tacacs(args) => aaa::handle(client, GroupKind::Tacacs, args, global).await,
        Command::Ntp(args) => ntp::handle(client, args, global).await,
        Command::Dns(args) => dns::handle(client, args, global).await,
        Command::Logging(args) => logging::handle(client, args, global).await,
        Command::RunningConfig => system::running_config(client, global).await,
        Command::Apply(args) => apply::handle(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
