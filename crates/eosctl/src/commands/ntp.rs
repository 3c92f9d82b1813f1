//! NTP command handlers.

use tabled::Tabled;

use eos_core::{
    EosClient, Ensure, NtpAuthKeyProvider, NtpAuthKeyResource, NtpServerProvider,
    NtpServerResource, NtpSettings, NtpSettingsProvider,
};

use crate::cli::{GlobalOpts, NtpArgs, NtpCommand, NtpKeyCommand, NtpServerCommand};
use crate::error::CliError;
use crate::output::or_dash;

use super::util;

#[derive(Tabled)]
struct ServerRow {
    #[tabled(rename = "Server")]
    host: String,
    #[tabled(rename = "Prefer")]
    prefer: &'static str,
}

#[derive(Tabled)]
struct KeyRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Algorithm")]
    algorithm: String,
    #[tabled(rename = "Mode")]
    mode: String,
}

impl From<&NtpAuthKeyResource> for KeyRow {
    fn from(k: &NtpAuthKeyResource) -> Self {
        Self {
            id: k.id,
            algorithm: or_dash(k.algorithm.as_deref()),
            mode: or_dash(k.mode),
        }
    }
}

fn settings_detail(s: &NtpSettings) -> String {
    let source = s.source_interface.as_deref().filter(|i| !i.is_empty());
    format!("Source interface: {}", or_dash(source))
}

pub async fn handle(client: &EosClient, args: NtpArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        NtpCommand::Show => {
            util::show(&NtpSettingsProvider::new(client), global, settings_detail).await
        }

        NtpCommand::Set { source_interface } => {
            let desired = NtpSettings {
                source_interface: Some(source_interface),
            };
            util::apply(&NtpSettingsProvider::new(client), &desired, global).await
        }

        NtpCommand::Servers { command } => servers(client, command, global).await,
        NtpCommand::Keys { command } => keys(client, command, global).await,
    }
}

async fn servers(
    client: &EosClient,
    command: NtpServerCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let provider = NtpServerProvider::new(client);
    match command {
        NtpServerCommand::List => {
            util::list(
                &provider,
                global,
                |s| ServerRow {
                    host: s.host.clone(),
                    prefer: if s.prefer == Some(true) { "yes" } else { "" },
                },
                |s| s.host.clone(),
            )
            .await
        }
        NtpServerCommand::Ensure { host, prefer } => {
            let desired = NtpServerResource {
                host,
                ensure: Ensure::Present,
                prefer,
            };
            util::apply(&provider, &desired, global).await
        }
        NtpServerCommand::Remove { host } => {
            let desired = NtpServerResource {
                host: host.clone(),
                ensure: Ensure::Absent,
                prefer: None,
            };
            util::remove(&provider, &desired, &host, global).await
        }
    }
}

async fn keys(client: &EosClient, command: NtpKeyCommand, global: &GlobalOpts) -> Result<(), CliError> {
    let provider = NtpAuthKeyProvider::new(client);
    match command {
        NtpKeyCommand::List => {
            util::list(&provider, global, |k| KeyRow::from(k), |k| k.id.to_string()).await
        }
        NtpKeyCommand::Ensure {
            id,
            algorithm,
            mode,
            password,
        } => {
            if let Some(mode) = mode {
                if mode != 0 && mode != 7 {
                    return Err(CliError::Validation {
                        field: "mode".into(),
                        reason: format!("expected 0 or 7, got {mode}"),
                    });
                }
            }
            let desired = NtpAuthKeyResource {
                id,
                ensure: Ensure::Present,
                algorithm,
                mode,
                password,
            };
            util::apply(&provider, &desired, global).await
        }
        NtpKeyCommand::Remove { id } => {
            let desired = NtpAuthKeyResource {
                id,
                ensure: Ensure::Absent,
                ..NtpAuthKeyResource::default()
            };
            util::remove(&provider, &desired, &id.to_string(), global).await
        }
    }
}
