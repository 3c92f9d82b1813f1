//! Profile selection and command-line overrides.
//!
//! `eos-config` owns the file format and password chain; this module picks
//! the active profile, layers `GlobalOpts` on top, and hands the result to
//! `eos_config::profile_to_client_config`.

use std::path::PathBuf;

use eos_config::{Config, Profile};
use eos_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Config file in effect: `--config` / `EOS_CONFIG`, else the platform path.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(eos_config::config_path)
}

pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(eos_config::load_config_from(&config_file(global))?)
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

/// Build the `ClientConfig` for a switch-bound command.
pub fn resolve_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let config = load(global)?;
    let name = active_profile_name(global, &config);

    let mut profile = match config.profiles.get(&name) {
        Some(profile) => profile.clone(),
        // --address alone is enough to talk to a switch
        None if global.address.is_some() => Profile::default(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                available: available_profiles(&config),
                name,
            });
        }
        None => {
            return Err(CliError::NoConfig {
                path: config_file(global).display().to_string(),
            });
        }
    };

    apply_overrides(&mut profile, global);
    tracing::debug!(profile = %name, address = %profile.address, "resolved switch profile");
    Ok(eos_config::profile_to_client_config(&profile, &name)?)
}

/// Flags win over the profile; unset flags leave it alone.
fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(address) = &global.address {
        profile.address.clone_from(address);
    }
    if global.eapi_port.is_some() {
        profile.port = global.eapi_port;
    }
    if global.username.is_some() {
        profile.username.clone_from(&global.username);
    }
    if global.tls {
        profile.use_tls = true;
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["eosctl"];
        argv.extend_from_slice(args);
        argv.push("running-config");
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn flags_override_profile() {
        let mut profile = Profile {
            address: "10.0.0.1".into(),
            port: Some(8080),
            username: Some("ops".into()),
            timeout: Some(10),
            ..Profile::default()
        };
        let opts = global(&["--address", "spine1", "--tls", "-k", "--timeout", "5"]);
        apply_overrides(&mut profile, &opts);

        assert_eq!(profile.address, "spine1");
        assert_eq!(profile.port, Some(8080));
        assert_eq!(profile.username.as_deref(), Some("ops"));
        assert!(profile.use_tls);
        assert_eq!(profile.insecure, Some(true));
        assert_eq!(profile.timeout, Some(5));
    }

    #[test]
    fn profile_name_prefers_flag() {
        let mut config = Config::default();
        assert_eq!(active_profile_name(&global(&[]), &config), "default");

        config.default_profile = Some("leaf".into());
        assert_eq!(active_profile_name(&global(&[]), &config), "leaf");
        assert_eq!(
            active_profile_name(&global(&["--profile", "spine"]), &config),
            "spine"
        );
    }

    #[test]
    fn profiles_listed_sorted() {
        let mut config = Config::default();
        assert_eq!(available_profiles(&config), "(none)");
        config.profiles.insert("spine".into(), Profile::default());
        config.profiles.insert("leaf".into(), Profile::default());
        assert_eq!(available_profiles(&config), "leaf, spine");
    }
}
