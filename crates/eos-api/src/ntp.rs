// NTP endpoints

use crate::client::{EosClient, config_batch};
use crate::error::Error;
use crate::models::{NtpAuthKey, NtpConfig};
use crate::parse::running_config as parse;

impl EosClient {
    /// `show running-config section ntp`
    pub async fn ntp_config(&self) -> Result<NtpConfig, Error> {
        let text = self.running_config_section("ntp", false).await?;
        parse::ntp(&text)
    }

    /// `ntp source <iface>`; `None` removes it.
    pub async fn ntp_set_source_interface(&self, interface: Option<&str>) -> Result<(), Error> {
        let cmd = match interface {
            Some(iface) => format!("ntp source {iface}"),
            None => "no ntp source".to_owned(),
        };
        self.configure(&config_batch([cmd]), "set ntp source interface")
            .await
    }

    pub async fn ntp_server_add(&self, host: &str, prefer: bool) -> Result<(), Error> {
        let cmd = if prefer {
            format!("ntp server {host} prefer")
        } else {
            format!("ntp server {host}")
        };
        self.configure(&config_batch([cmd]), &format!("add ntp server {host}"))
            .await
    }

    pub async fn ntp_server_remove(&self, host: &str) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("no ntp server {host}")]),
            &format!("remove ntp server {host}"),
        )
        .await
    }

    /// `ntp authentication-key <id> <algorithm> <mode> <password>`
    pub async fn ntp_set_auth_key(&self, key: &NtpAuthKey) -> Result<(), Error> {
        if !matches!(key.algorithm.as_str(), "md5" | "sha1") {
            return Err(Error::Validation(format!(
                "ntp key algorithm must be 'md5' or 'sha1', got '{}'",
                key.algorithm
            )));
        }
        self.configure(
            &config_batch([format!(
                "ntp authentication-key {} {} {} {}",
                key.id, key.algorithm, key.mode, key.password
            )]),
            &format!("set ntp authentication key {}", key.id),
        )
        .await
    }

    pub async fn ntp_remove_auth_key(&self, id: u32) -> Result<(), Error> {
        self.configure(
            &config_batch([format!("no ntp authentication-key {id}")]),
            &format!("remove ntp authentication key {id}"),
        )
        .await
    }
}
