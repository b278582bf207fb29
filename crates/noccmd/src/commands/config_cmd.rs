//! Config subcommand handlers.

use zenoss_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

/// Build the profile `config init` writes, entirely from global flags.
fn profile_from_flags(global: &GlobalOpts) -> Result<Profile, CliError> {
    let host = global.host.clone().ok_or_else(|| CliError::Validation {
        field: "host".into(),
        reason: "config init needs --host".into(),
    })?;

    let mut profile = Profile::new(host);
    if let Some(port) = global.port {
        profile.port = port;
    }
    if let Some(ref scheme) = global.scheme {
        profile.scheme.clone_from(scheme);
    }
    profile.username.clone_from(&global.username);
    profile.password.clone_from(&global.password);
    profile.limit = global.limit;
    profile.timeout = global.timeout;
    if global.no_verify_login {
        profile.verify_login = Some(false);
    }
    Ok(profile)
}

fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(REDACTED.into());
        }
    }
    cfg
}

fn render_config(format: &OutputFormat, cfg: &Config) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => output::render_json(cfg, false),
        OutputFormat::JsonCompact => output::render_json(cfg, true),
        OutputFormat::Yaml => output::render_yaml(cfg),
        OutputFormat::Table | OutputFormat::Plain => {
            toml::to_string_pretty(cfg).map_err(|e| CliError::Render(e.to_string()))
        }
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => {
            let mut cfg = config::load_config()?;
            let name = global.profile.clone().unwrap_or_else(|| "default".into());
            let profile = profile_from_flags(global)?;
            let stores_password = profile.password.is_some();

            cfg.profiles.insert(name.clone(), profile);
            let default_exists = cfg
                .default_profile
                .as_ref()
                .is_some_and(|d| cfg.profiles.contains_key(d));
            if !default_exists {
                cfg.default_profile = Some(name.clone());
            }
            let path = config::save_config(&cfg)?;

            if !global.quiet {
                eprintln!("Configuration written to {}", path.display());
                eprintln!("  Profile: {name}");
                if stores_password {
                    eprintln!("  Password saved in plaintext; consider password_env instead");
                }
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = render_config(&global.output, &redacted(&cfg))?;
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}
