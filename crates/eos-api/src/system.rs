// Whole-device queries.

use crate::client::{EosClient, exec_batch};
use crate::error::Error;

impl EosClient {
    /// Full running configuration as text.
    ///
    /// `["enable", "show running-config"]`
    pub async fn running_config(&self) -> Result<String, Error> {
        self.last_output(&exec_batch(["show running-config"]), "show running configuration")
            .await
    }

    /// Text of `show running-config [all] section <pattern>`.
    ///
    /// `all` includes default values (`radius-server timeout 5`) that the
    /// plain view omits.
    pub(crate) async fn running_config_section(
        &self,
        pattern: &str,
        all: bool,
    ) -> Result<String, Error> {
        let cmd = if all {
            format!("show running-config all section {pattern}")
        } else {
            format!("show running-config section {pattern}")
        };
        self.last_output(&exec_batch([cmd]), &format!("show {pattern} configuration"))
            .await
    }
}
