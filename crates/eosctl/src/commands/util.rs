//! Shared helpers for command handlers.

use serde::Serialize;
use tabled::Tabled;

use eos_core::{ApplyReport, Provider};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Read every instance from `provider` and print them.
pub async fn list<P, R>(
    provider: &P,
    global: &GlobalOpts,
    to_row: impl Fn(&P::Resource) -> R,
    id_fn: impl Fn(&P::Resource) -> String,
) -> Result<(), CliError>
where
    P: Provider + Sync,
    P::Resource: Serialize,
    R: Tabled,
{
    let items = provider.instances().await?;
    let out = output::render_list(&global.output, &items, to_row, id_fn)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Print the single instance of a settings provider.
pub async fn show<P>(
    provider: &P,
    global: &GlobalOpts,
    detail_fn: impl Fn(&P::Resource) -> String,
) -> Result<(), CliError>
where
    P: Provider + Sync,
    P::Resource: Serialize,
{
    let items = provider.instances().await?;
    let Some(item) = items.first() else {
        return Ok(());
    };
    let out = output::render_single(&global.output, item, &detail_fn, &detail_fn)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Converge one resource and print what changed.
pub async fn apply<P>(provider: &P, desired: &P::Resource, global: &GlobalOpts) -> Result<(), CliError>
where
    P: Provider + Sync,
{
    let report = provider.apply(desired).await?;
    print_report(&report, global)
}

/// Like [`apply`], but asks first. `desired` should be `ensure: absent`.
pub async fn remove<P>(
    provider: &P,
    desired: &P::Resource,
    name: &str,
    global: &GlobalOpts,
) -> Result<(), CliError>
where
    P: Provider + Sync,
{
    if !confirm(&format!("Remove {} '{name}' from the switch?", P::KIND), global.yes)? {
        return Ok(());
    }
    apply(provider, desired, global).await
}

pub fn print_report(report: &ApplyReport, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let out = output::render_report(&global.output, report, color)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Fail early when a `set` was given nothing to set.
pub fn require_any(what: &str, given: &[bool]) -> Result<(), CliError> {
    if given.iter().any(|g| *g) {
        Ok(())
    } else {
        Err(CliError::Validation {
            field: what.into(),
            reason: "nothing to change; pass at least one option".into(),
        })
    }
}
