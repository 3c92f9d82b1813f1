//! Switch-wide read-only commands.

use eos_core::{CoreError, EosClient};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Print `show running-config` as text, or wrapped in a JSON/YAML string.
pub async fn running_config(client: &EosClient, global: &GlobalOpts) -> Result<(), CliError> {
    let text = client.running_config().await.map_err(CoreError::from)?;
    let out = output::render_single(&global.output, &text, String::clone, String::clone)?;
    output::print_output(out.trim_end(), global.quiet);
    Ok(())
}
