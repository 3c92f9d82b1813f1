//! Config subcommand handlers. None of these talk to a switch.

use dialoguer::{Confirm, Input, Select};
use serde::Serialize;
use tabled::Tabled;

use eos_config::{Config, ConfigError, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

const MASK: &str = "********";

// ── Helpers ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ProfileEntry {
    name: String,
    address: String,
    default: bool,
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Default")]
    default: &'static str,
}

/// Replace every stored password with a fixed mask.
fn redact(cfg: &mut Config) {
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(MASK.into());
        }
    }
}

fn profile_entries(cfg: &Config) -> Vec<ProfileEntry> {
    let default = cfg.default_profile.as_deref();
    let mut entries: Vec<ProfileEntry> = cfg
        .profiles
        .iter()
        .map(|(name, p)| ProfileEntry {
            name: name.clone(),
            address: p.address.clone(),
            default: default == Some(name.as_str()),
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

fn save(cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    eos_config::save_config_to(cfg, &config::config_file(global))?;
    Ok(())
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Ask where a password should live. Returns the plaintext value to write
/// into the profile, or `None` when it went to the keyring or was skipped.
fn prompt_password_storage(profile_name: &str) -> Result<Option<String>, CliError> {
    let password = rpassword::prompt_password("Password (empty to skip): ").map_err(prompt_err)?;
    if password.is_empty() {
        return Ok(None);
    }

    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
        "Don't store it (use EOS_PASSWORD)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    match selection {
        0 => {
            eos_config::store_password(profile_name, &password)?;
            eprintln!("   ✓ Password stored in system keyring");
            Ok(None)
        }
        1 => Ok(Some(password)),
        _ => Ok(None),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),

        ConfigCommand::Show => {
            let mut cfg = config::load(global)?;
            redact(&mut cfg);
            // table and plain both show the file as it would be written
            let out = match global.output {
                OutputFormat::Table | OutputFormat::Plain => {
                    toml::to_string_pretty(&cfg).map_err(ConfigError::from)?
                }
                _ => output::render_single(&global.output, &cfg, |_| String::new(), |_| String::new())?,
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load(global)?;
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: eosctl config init");
                return Ok(());
            }
            let entries = profile_entries(&cfg);
            let out = output::render_list(
                &global.output,
                &entries,
                |e| ProfileRow {
                    name: e.name.clone(),
                    address: e.address.clone(),
                    default: if e.default { "*" } else { "" },
                },
                |e| e.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load(global)?;
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            save(&cfg, global)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        ConfigCommand::SetPassword => {
            let cfg = config::load(global)?;
            let name = config::active_profile_name(global, &cfg);
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            let password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }
            eos_config::store_password(&name, &password)?;
            eprintln!("✓ Password stored in system keyring for profile '{name}'");
            Ok(())
        }
    }
}

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_file(global);
    eprintln!("eosctl configuration wizard");
    eprintln!("   Config path: {}\n", path.display());

    let mut cfg = config::load(global)?;

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let address: String = Input::new()
        .with_prompt("Switch address (host, URL, or unix:// socket)")
        .interact_text()
        .map_err(prompt_err)?;

    let use_tls = Confirm::new()
        .with_prompt("Use HTTPS?")
        .default(true)
        .interact()
        .map_err(prompt_err)?;

    let insecure = if use_tls {
        let accept = Confirm::new()
            .with_prompt("Accept self-signed certificates?")
            .default(true)
            .interact()
            .map_err(prompt_err)?;
        Some(accept)
    } else {
        None
    };

    let port: String = Input::new()
        .with_prompt("eAPI port (empty for default)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    let port = if port.trim().is_empty() {
        None
    } else {
        Some(port.trim().parse::<u16>().map_err(|_| CliError::Validation {
            field: "port".into(),
            reason: format!("'{port}' is not a port number"),
        })?)
    };

    let username: String = Input::new()
        .with_prompt("Username")
        .default("admin".into())
        .interact_text()
        .map_err(prompt_err)?;

    let password = prompt_password_storage(&profile_name)?;

    let profile = Profile {
        address,
        port,
        username: Some(username),
        password,
        use_tls,
        insecure,
        ..Profile::default()
    };

    let default_missing = cfg
        .default_profile
        .as_ref()
        .is_none_or(|d| !cfg.profiles.contains_key(d));
    if default_missing {
        cfg.default_profile = Some(profile_name.clone());
    }
    cfg.profiles.insert(profile_name.clone(), profile);
    save(&cfg, global)?;

    eprintln!("\n✓ Configuration written to {}", path.display());
    eprintln!("  Profile: {profile_name}");
    eprintln!("\n  Test it: eosctl --profile {profile_name} running-config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        let mut cfg = Config {
            default_profile: Some("spine".into()),
            ..Config::default()
        };
        cfg.profiles.insert(
            "spine".into(),
            Profile {
                address: "10.0.0.1".into(),
                password: Some("hunter2".into()),
                ..Profile::default()
            },
        );
        cfg.profiles.insert(
            "leaf".into(),
            Profile {
                address: "10.0.0.2".into(),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn redact_masks_only_set_passwords() {
        let mut cfg = sample();
        redact(&mut cfg);
        assert_eq!(cfg.profiles["spine"].password.as_deref(), Some(MASK));
        assert_eq!(cfg.profiles["leaf"].password, None);
    }

    #[test]
    fn entries_sorted_with_default_marked() {
        let entries = profile_entries(&sample());
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["leaf", "spine"]);
        assert!(!entries[0].default);
        assert!(entries[1].default);
    }
}
