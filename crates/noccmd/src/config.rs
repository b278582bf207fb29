//! Flag-aware session configuration.
//!
//! Loads the shared config file, picks the active profile, and layers the
//! global command-line flags on top before handing a `SessionConfig` to
//! the API client.

use secrecy::SecretString;
use zenoss_api::SessionConfig;
use zenoss_config::{Config, Profile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use zenoss_config::{config_path, load_config, save_config};

/// Resolve the active profile name from flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// The stored profile with every global flag applied on top.
///
/// Without a stored profile, `--host` alone is enough to build one.
pub fn effective_profile(global: &GlobalOpts, config: &Config) -> Result<Profile, CliError> {
    let name = active_profile_name(global, config);

    let mut profile = match config.profiles.get(&name) {
        Some(p) => p.clone(),
        None if global.profile.is_some() => {
            let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        None => {
            let host = global.host.clone().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            Profile::new(host)
        }
    };

    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(port) = global.port {
        profile.port = port;
    }
    if let Some(ref scheme) = global.scheme {
        profile.scheme.clone_from(scheme);
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if global.limit.is_some() {
        profile.limit = global.limit;
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
    if global.debug {
        profile.debug = Some(true);
    }
    if global.no_verify_login {
        profile.verify_login = Some(false);
    }

    Ok(profile)
}

/// Build the `SessionConfig` for the current invocation.
pub fn build_session_config(global: &GlobalOpts) -> Result<(String, SessionConfig), CliError> {
    let cfg = load_config()?;
    let name = active_profile_name(global, &cfg);
    let mut profile = effective_profile(global, &cfg)?;

    // An explicit password outranks anything the profile would resolve.
    if let Some(ref password) = global.password {
        profile.password = Some(password.clone());
        profile.password_env = None;
    }

    let mut session = zenoss_config::resolve_profile(&profile, &name, &cfg.defaults)?;
    if let Some(ref password) = global.password {
        session.password = SecretString::from(password.clone());
    }

    Ok((name, session))
}
