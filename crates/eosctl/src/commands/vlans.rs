//! VLAN command handlers.

use tabled::Tabled;

use eos_core::{EosClient, Ensure, VlanProvider, VlanResource};

use crate::cli::{GlobalOpts, VlansArgs, VlansCommand};
use crate::error::CliError;
use crate::output::or_dash;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct VlanRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: &'static str,
}

impl From<&VlanResource> for VlanRow {
    fn from(v: &VlanResource) -> Self {
        Self {
            id: v.id,
            name: or_dash(v.vlan_name.as_deref()),
            state: match v.shutdown {
                Some(true) => "suspended",
                Some(false) => "active",
                None => "-",
            },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &EosClient,
    args: VlansArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let provider = VlanProvider::new(client);
    match args.command {
        VlansCommand::List => {
            util::list(&provider, global, |v| VlanRow::from(v), |v| v.id.to_string()).await
        }

        VlansCommand::Ensure { id, name, shutdown } => {
            let desired = VlanResource {
                id,
                ensure: Ensure::Present,
                vlan_name: name,
                shutdown,
            };
            util::apply(&provider, &desired, global).await
        }

        VlansCommand::Remove { id } => {
            let desired = VlanResource {
                id,
                ensure: Ensure::Absent,
                ..VlanResource::default()
            };
            util::remove(&provider, &desired, &id.to_string(), global).await
        }
    }
}
