// DNS providers
//
// `DnsSettings` manages the domain name and both lists as a whole; the
// ensure-only resources manage one list entry (or the domain name) each.

use serde::{Deserialize, Serialize};

use eos_api::EosClient;

use crate::error::CoreError;
use crate::provider::{ApplyReport, Ensure, Provider, drift, list};
use crate::resources::SETTINGS;

// ── Settings ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsSettings {
    /// Empty string removes the domain name.
    pub domain: Option<String>,
    pub search: Option<Vec<String>>,
    pub servers: Option<Vec<String>>,
}

pub struct DnsSettingsProvider<'a> {
    client: &'a EosClient,
}

impl<'a> DnsSettingsProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for DnsSettingsProvider<'_> {
    type Resource = DnsSettings;
    const KIND: &'static str = "dns_settings";

    async fn instances(&self) -> Result<Vec<DnsSettings>, CoreError> {
        let config = self.client.dns_config().await?;
        Ok(vec![DnsSettings {
            domain: Some(config.domain_name.unwrap_or_default()),
            search: Some(config.domain_list),
            servers: Some(config.name_servers),
        }])
    }

    async fn apply(&self, desired: &DnsSettings) -> Result<ApplyReport, CoreError> {
        let mut report = ApplyReport::new(Self::KIND, SETTINGS);
        let current = self.client.dns_config().await?;

        let have_domain = current.domain_name.clone().unwrap_or_default();
        if let Some(domain) = drift(desired.domain.as_deref(), Some(have_domain.as_str())) {
            let target = (!domain.is_empty()).then_some(domain);
            self.client.dns_set_domain_name(target).await?;
            report.set("domain", Some(&have_domain), domain);
        }

        if let Some(search) = drift(desired.search.as_ref(), Some(&current.domain_list)) {
            for stale in current.domain_list.iter().filter(|d| !search.contains(*d)) {
                self.client.dns_remove_domain_list(stale).await?;
            }
            for fresh in search.iter().filter(|d| !current.domain_list.contains(*d)) {
                self.client.dns_add_domain_list(fresh).await?;
            }
            report.set("search", Some(&list(&current.domain_list)), &list(search));
        }

        if let Some(servers) = drift(desired.servers.as_ref(), Some(&current.name_servers)) {
            for stale in current.name_servers.iter().filter(|s| !servers.contains(*s)) {
                self.client.dns_remove_name_server(stale).await?;
            }
            for fresh in servers.iter().filter(|s| !current.name_servers.contains(*s)) {
                self.client.dns_add_name_server(fresh).await?;
            }
            report.set("servers", Some(&list(&current.name_servers)), &list(servers));
        }

        Ok(report)
    }
}

// ── Name servers ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameServer {
    pub address: String,
    #[serde(default)]
    pub ensure: Ensure,
}

pub struct NameServerProvider<'a> {
    client: &'a EosClient,
}

impl<'a> NameServerProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for NameServerProvider<'_> {
    type Resource = NameServer;
    const KIND: &'static str = "name_server";

    async fn instances(&self) -> Result<Vec<NameServer>, CoreError> {
        Ok(self
            .client
            .dns_config()
            .await?
            .name_servers
            .into_iter()
            .map(|address| NameServer {
                address,
                ensure: Ensure::Present,
            })
            .collect())
    }

    async fn apply(&self, desired: &NameServer) -> Result<ApplyReport, CoreError> {
        let address = desired.address.as_str();
        let mut report = ApplyReport::new(Self::KIND, address);
        let exists = self
            .client
            .dns_config()
            .await?
            .name_servers
            .iter()
            .any(|s| s == address);

        match (desired.ensure, exists) {
            (Ensure::Present, false) => {
                self.client.dns_add_name_server(address).await?;
                report.created();
            }
            (Ensure::Absent, true) => {
                self.client.dns_remove_name_server(address).await?;
                report.destroyed();
            }
            _ => {}
        }
        Ok(report)
    }
}

// ── Search domains ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDomain {
    pub name: String,
    #[serde(default)]
    pub ensure: Ensure,
}

pub struct SearchDomainProvider<'a> {
    client: &'a EosClient,
}

impl<'a> SearchDomainProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for SearchDomainProvider<'_> {
    type Resource = SearchDomain;
    const KIND: &'static str = "search_domain";

    async fn instances(&self) -> Result<Vec<SearchDomain>, CoreError> {
        Ok(self
            .client
            .dns_config()
            .await?
            .domain_list
            .into_iter()
            .map(|name| SearchDomain {
                name,
                ensure: Ensure::Present,
            })
            .collect())
    }

    async fn apply(&self, desired: &SearchDomain) -> Result<ApplyReport, CoreError> {
        let name = desired.name.as_str();
        let mut report = ApplyReport::new(Self::KIND, name);
        let exists = self
            .client
            .dns_config()
            .await?
            .domain_list
            .iter()
            .any(|d| d == name);

        match (desired.ensure, exists) {
            (Ensure::Present, false) => {
                self.client.dns_add_domain_list(name).await?;
                report.created();
            }
            (Ensure::Absent, true) => {
                self.client.dns_remove_domain_list(name).await?;
                report.destroyed();
            }
            _ => {}
        }
        Ok(report)
    }
}

// ── Domain name ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainName {
    pub name: String,
    #[serde(default)]
    pub ensure: Ensure,
}

pub struct DomainNameProvider<'a> {
    client: &'a EosClient,
}

impl<'a> DomainNameProvider<'a> {
    pub fn new(client: &'a EosClient) -> Self {
        Self { client }
    }
}

impl Provider for DomainNameProvider<'_> {
    type Resource = DomainName;
    const KIND: &'static str = "domain_name";

    async fn instances(&self) -> Result<Vec<DomainName>, CoreError> {
        Ok(self
            .client
            .dns_config()
            .await?
            .domain_name
            .into_iter()
            .map(|name| DomainName {
                name,
                ensure: Ensure::Present,
            })
            .collect())
    }

    async fn apply(&self, desired: &DomainName) -> Result<ApplyReport, CoreError> {
        let name = desired.name.as_str();
        let mut report = ApplyReport::new(Self::KIND, name);
        let current = self.client.dns_config().await?.domain_name;
        let matches = current.as_deref() == Some(name);

        match (desired.ensure, matches) {
            (Ensure::Present, false) => {
                self.client.dns_set_domain_name(Some(name)).await?;
                match current.as_deref() {
                    None => report.created(),
                    Some(old) => report.set("name", Some(old), name),
                }
            }
            // only the named domain is removed, never a different one
            (Ensure::Absent, true) => {
                self.client.dns_set_domain_name(None).await?;
                report.destroyed();
            }
            _ => {}
        }
        Ok(report)
    }
}
