// DNS resolver endpoints
//
// Resolver lines are top-level and spread over the running config, so reads
// scan the whole text rather than one section.

use crate::client::{EosClient, config_batch};
use crate::error::Error;
use crate::models::DnsConfig;
use crate::parse::running_config as parse;

impl EosClient {
    pub async fn dns_config(&self) -> Result<DnsConfig, Error> {
        let text = self.running_config().await?;
        Ok(parse::dns(&text))
    }

    /// `ip domain-name <name>`; `None` removes it.
    pub async fn dns_set_domain_name(&self, name: Option<&str>) -> Result<(), Error> {
        let cmd = match name {
            Some(name) => format!("ip domain-name {name}"),
            None => "no ip domain-name".to_owned(),
        };
        self.configure(&config_batch([cmd]), "set domain name").await
    }

    pub async fn dns_add_name_server(&self, server: &str) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("ip name-server {server}")]),
            &format!("add name server {server}"),
        )
        .await
    }

    pub async fn dns_remove_name_server(&self, server: &str) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("no ip name-server {server}")]),
            &format!("remove name server {server}"),
        )
        .await
    }

    pub async fn dns_add_domain_list(&self, domain: &str) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("ip domain-list {domain}")]),
            &format!("add search domain {domain}"),
        )
        .await
    }

    pub async fn dns_remove_domain_list(&self, domain: &str) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("no ip domain-list {domain}")]),
            &format!("remove search domain {domain}"),
        )
        .await
    }
}
