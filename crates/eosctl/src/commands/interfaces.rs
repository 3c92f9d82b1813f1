//! Interface command handlers.

use tabled::Tabled;

use eos_core::{EosClient, InterfaceProvider, InterfaceResource};

use crate::cli::{GlobalOpts, InterfacesArgs, InterfacesCommand};
use crate::error::CliError;
use crate::output::or_dash;

use super::util;

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Speed")]
    speed: String,
    #[tabled(rename = "Duplex")]
    duplex: String,
    #[tabled(rename = "MTU")]
    mtu: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&InterfaceResource> for InterfaceRow {
    fn from(i: &InterfaceResource) -> Self {
        Self {
            name: i.name.clone(),
            enabled: or_dash(i.enable),
            speed: or_dash(i.speed.as_deref()),
            duplex: or_dash(i.duplex.as_deref()),
            mtu: or_dash(i.mtu),
            description: i.description.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(
    client: &EosClient,
    args: InterfacesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let provider = InterfaceProvider::new(client);
    match args.command {
        InterfacesCommand::List => {
            util::list(
                &provider,
                global,
                |i| InterfaceRow::from(i),
                |i| i.name.clone(),
            )
            .await
        }

        InterfacesCommand::Set {
            name,
            description,
            enable,
            mtu,
            speed,
            duplex,
        } => {
            util::require_any(
                "interface",
                &[
                    description.is_some(),
                    enable.is_some(),
                    mtu.is_some(),
                    speed.is_some(),
                    duplex.is_some(),
                ],
            )?;
            let desired = InterfaceResource {
                name,
                description,
                enable,
                mtu,
                speed,
                duplex,
            };
            util::apply(&provider, &desired, global).await
        }
    }
}
