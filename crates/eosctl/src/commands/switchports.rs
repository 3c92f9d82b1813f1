//! Switchport command handlers.

use tabled::Tabled;

use eos_core::convert::{ids_to_vlan_range, vlan_range_to_ids};
use eos_core::{EosClient, Ensure, SwitchportProvider, SwitchportResource};

use crate::cli::{GlobalOpts, SwitchportMode, SwitchportsArgs, SwitchportsCommand};
use crate::error::CliError;
use crate::output::or_dash;

use super::util;

#[derive(Tabled)]
struct SwitchportRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Access VLAN")]
    access_vlan: String,
    #[tabled(rename = "Trunk VLANs")]
    trunk_vlans: String,
}

impl From<&SwitchportResource> for SwitchportRow {
    fn from(sp: &SwitchportResource) -> Self {
        Self {
            name: sp.name.clone(),
            mode: or_dash(sp.mode.as_deref()),
            access_vlan: or_dash(sp.untagged_vlan),
            trunk_vlans: or_dash(sp.tagged_vlans.as_deref().map(ids_to_vlan_range)),
        }
    }
}

pub async fn handle(
    client: &EosClient,
    args: SwitchportsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let provider = SwitchportProvider::new(client);
    match args.command {
        SwitchportsCommand::List => {
            util::list(
                &provider,
                global,
                |sp| SwitchportRow::from(sp),
                |sp| sp.name.clone(),
            )
            .await
        }

        SwitchportsCommand::Ensure {
            name,
            mode,
            access_vlan,
            trunk_vlans,
        } => {
            let desired = SwitchportResource {
                name,
                ensure: Ensure::Present,
                mode: mode.map(|m| {
                    match m {
                        SwitchportMode::Access => "access",
                        SwitchportMode::Trunk => "trunk",
                    }
                    .to_owned()
                }),
                tagged_vlans: trunk_vlans.as_deref().map(vlan_range_to_ids).transpose()?,
                untagged_vlan: access_vlan,
                ..SwitchportResource::default()
            };
            util::apply(&provider, &desired, global).await
        }

        SwitchportsCommand::Remove { name } => {
            let desired = SwitchportResource {
                name: name.clone(),
                ensure: Ensure::Absent,
                ..SwitchportResource::default()
            };
            util::remove(&provider, &desired, &name, global).await
        }
    }
}
