//! Port-channel command handlers.

use tabled::Tabled;

use eos_core::{ChannelGroup, EosClient, Ensure, PortChannelMode, PortChannelProvider};

use crate::cli::{GlobalOpts, LacpMode, PortChannelsArgs, PortChannelsCommand};
use crate::error::CliError;
use crate::output::or_dash;

use super::util;

impl From<LacpMode> for PortChannelMode {
    fn from(mode: LacpMode) -> Self {
        match mode {
            LacpMode::Active => Self::Active,
            LacpMode::Passive => Self::Passive,
            LacpMode::Disabled => Self::Disabled,
        }
    }
}

#[derive(Tabled)]
struct PortChannelRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Members")]
    members: String,
    #[tabled(rename = "Min Links")]
    min_links: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&ChannelGroup> for PortChannelRow {
    fn from(pc: &ChannelGroup) -> Self {
        Self {
            name: pc.name.clone(),
            mode: or_dash(pc.mode),
            members: pc
                .interfaces
                .as_ref()
                .map(|m| m.join(", "))
                .unwrap_or_default(),
            min_links: or_dash(pc.minimum_links),
            description: pc.description.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(
    client: &EosClient,
    args: PortChannelsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let provider = PortChannelProvider::new(client);
    match args.command {
        PortChannelsCommand::List => {
            util::list(
                &provider,
                global,
                |pc| PortChannelRow::from(pc),
                |pc| pc.name.clone(),
            )
            .await
        }

        PortChannelsCommand::Ensure {
            name,
            mode,
            members,
            min_links,
            description,
        } => {
            let desired = ChannelGroup {
                name,
                ensure: Ensure::Present,
                mode: mode.map(PortChannelMode::from),
                interfaces: members,
                minimum_links: min_links,
                description,
                mtu: None,
            };
            util::apply(&provider, &desired, global).await
        }

        PortChannelsCommand::Remove { name } => {
            let desired = ChannelGroup {
                name: name.clone(),
                ensure: Ensure::Absent,
                ..ChannelGroup::default()
            };
            util::remove(&provider, &desired, &name, global).await
        }
    }
}
