//! DNS command handlers.
//!
//! `dns set` converges whole lists; the entry subcommands add or remove
//! one value at a time.

use tabled::Tabled;

use eos_core::{
    DnsSettings, DnsSettingsProvider, DomainName, DomainNameProvider, EosClient, Ensure,
    NameServer, NameServerProvider, SearchDomain, SearchDomainProvider,
};

use crate::cli::{DnsArgs, DnsCommand, DnsEntryCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::or_dash;

use super::util;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Value")]
    value: String,
}

fn settings_detail(s: &DnsSettings) -> String {
    let join = |list: &Option<Vec<String>>| {
        list.as_ref()
            .filter(|l| !l.is_empty())
            .map(|l| l.join(", "))
    };
    let domain = s.domain.as_deref().filter(|d| !d.is_empty());
    [
        format!("Domain:       {}", or_dash(domain)),
        format!("Name servers: {}", or_dash(join(&s.servers))),
        format!("Search:       {}", or_dash(join(&s.search))),
    ]
    .join("\n")
}

pub async fn handle(client: &EosClient, args: DnsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        DnsCommand::Show => {
            util::show(&DnsSettingsProvider::new(client), global, settings_detail).await
        }

        DnsCommand::Set {
            domain,
            search,
            servers,
        } => {
            util::require_any(
                "dns",
                &[domain.is_some(), search.is_some(), servers.is_some()],
            )?;
            let desired = DnsSettings {
                domain,
                search,
                servers,
            };
            util::apply(&DnsSettingsProvider::new(client), &desired, global).await
        }

        DnsCommand::NameServers { command } => {
            let provider = NameServerProvider::new(client);
            match command {
                DnsEntryCommand::List => {
                    util::list(
                        &provider,
                        global,
                        |n| EntryRow {
                            value: n.address.clone(),
                        },
                        |n| n.address.clone(),
                    )
                    .await
                }
                DnsEntryCommand::Ensure { value } => {
                    let desired = NameServer {
                        address: value,
                        ensure: Ensure::Present,
                    };
                    util::apply(&provider, &desired, global).await
                }
                DnsEntryCommand::Remove { value } => {
                    let desired = NameServer {
                        address: value.clone(),
                        ensure: Ensure::Absent,
                    };
                    util::remove(&provider, &desired, &value, global).await
                }
            }
        }

        DnsCommand::SearchDomains { command } => {
            let provider = SearchDomainProvider::new(client);
            match command {
                DnsEntryCommand::List => {
                    util::list(
                        &provider,
                        global,
                        |d| EntryRow {
                            value: d.name.clone(),
                        },
                        |d| d.name.clone(),
                    )
                    .await
                }
                DnsEntryCommand::Ensure { value } => {
                    let desired = SearchDomain {
                        name: value,
                        ensure: Ensure::Present,
                    };
                    util::apply(&provider, &desired, global).await
                }
                DnsEntryCommand::Remove { value } => {
                    let desired = SearchDomain {
                        name: value.clone(),
                        ensure: Ensure::Absent,
                    };
                    util::remove(&provider, &desired, &value, global).await
                }
            }
        }

        DnsCommand::DomainName { command } => {
            let provider = DomainNameProvider::new(client);
            match command {
                DnsEntryCommand::List => {
                    util::list(
                        &provider,
                        global,
                        |d| EntryRow {
                            value: d.name.clone(),
                        },
                        |d| d.name.clone(),
                    )
                    .await
                }
                DnsEntryCommand::Ensure { value } => {
                    let desired = DomainName {
                        name: value,
                        ensure: Ensure::Present,
                    };
                    util::apply(&provider, &desired, global).await
                }
                DnsEntryCommand::Remove { value } => {
                    let desired = DomainName {
                        name: value.clone(),
                        ensure: Ensure::Absent,
                    };
                    util::remove(&provider, &desired, &value, global).await
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_dashes_empty_fields() {
        let settings = DnsSettings {
            domain: Some(String::new()),
            search: Some(vec![]),
            servers: Some(vec!["8.8.8.8".into(), "1.1.1.1".into()]),
        };
        let text = settings_detail(&settings);
        assert!(text.contains("Domain:       -"));
        assert!(text.contains("Name servers: 8.8.8.8, 1.1.1.1"));
        assert!(text.contains("Search:       -"));
    }
}
