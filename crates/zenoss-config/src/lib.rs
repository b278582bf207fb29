//! Shared configuration for Zenoss API tools.
//!
//! TOML profiles, credential resolution (env + plaintext), and translation
//! to `zenoss_api::SessionConfig`. The `noccmd` binary layers its
//! command-line overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use zenoss_api::{DEFAULT_LIMIT, DEFAULT_PORT, SessionConfig, TransportConfig};

/// Environment variable consulted for the password when a profile names none.
pub const PASSWORD_ENV: &str = "ZENOSS_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{profile}' not found")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named Zenoss instances.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    /// Records per page.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_true")]
    pub verify_login: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            timeout: default_timeout(),
            debug: false,
            verify_login: true,
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}
fn default_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}

/// A named Zenoss instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Host name or address.
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// "http" or "https".
    #[serde(default = "default_scheme")]
    pub scheme: String,

    pub username: Option<String>,

    /// Password in plaintext. Prefer `password_env`.
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Override records per page.
    pub limit: Option<usize>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override debug logging.
    pub debug: Option<bool>,

    /// Override login verification.
    pub verify_login: Option<bool>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_scheme() -> String {
    "http".into()
}

impl Profile {
    /// A profile for `host` with every other field defaulted.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            scheme: default_scheme(),
            username: None,
            password: None,
            password_env: None,
            limit: None,
            timeout: None,
            debug: None,
            verify_login: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "zenoss", "noccmd").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("noccmd");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// Environment keys use `ZENOSS_` and `__` as the nesting separator, e.g.
/// `ZENOSS_DEFAULTS__LIMIT=500`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ZENOSS_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile resolution ──────────────────────────────────────────────

impl Config {
    /// The profile to use: the explicit name, else `default_profile`,
    /// else `"default"`.
    pub fn active_profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.into(),
            })
    }
}

/// Resolve the password: `password_env`, then [`PASSWORD_ENV`], then
/// the plaintext field.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(val) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(val));
    }

    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Build a `SessionConfig` from a profile, falling back to `defaults`.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<SessionConfig, ConfigError> {
    let scheme = profile.scheme.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::Validation {
            field: "scheme".into(),
            reason: format!("expected 'http' or 'https', got '{}'", profile.scheme),
        });
    }

    let username = profile
        .username
        .clone()
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;
    let password = resolve_password(profile, profile_name)?;

    let limit = profile.limit.unwrap_or(defaults.limit);
    if limit == 0 {
        return Err(ConfigError::Validation {
            field: "limit".into(),
            reason: "must be at least 1".into(),
        });
    }

    let mut session =
        SessionConfig::with_scheme(&scheme, &profile.host, profile.port, username, password)
            .map_err(|e| ConfigError::Validation {
                field: "host".into(),
                reason: e.to_string(),
            })?;

    session.limit = limit;
    session.debug = profile.debug.unwrap_or(defaults.debug);
    session.verify_login = profile.verify_login.unwrap_or(defaults.verify_login);
    session.transport = TransportConfig::default().with_timeout(Duration::from_secs(
        profile.timeout.unwrap_or(defaults.timeout),
    ));

    Ok(session)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn profile() -> Profile {
        Profile {
            username: Some("admin".into()),
            password: Some("zenoss".into()),
            ..Profile::new("zenoss.example.com")
        }
    }

    #[test]
    fn resolve_uses_defaults() {
        let session = resolve_profile(&profile(), "default", &Defaults::default()).unwrap();

        assert_eq!(session.base_url.as_str(), "http://zenoss.example.com:8080/");
        assert_eq!(session.username, "admin");
        assert_eq!(session.limit, 200);
        assert!(session.verify_login);
        assert!(!session.debug);
        assert_eq!(session.transport.timeout, Duration::from_secs(30));
    }

    #[test]
    fn resolve_applies_profile_overrides() {
        let p = Profile {
            scheme: "HTTPS".into(),
            port: 443,
            limit: Some(50),
            timeout: Some(5),
            debug: Some(true),
            verify_login: Some(false),
            ..profile()
        };
        let session = resolve_profile(&p, "prod", &Defaults::default()).unwrap();

        assert_eq!(session.base_url.as_str(), "https://zenoss.example.com/");
        assert_eq!(session.limit, 50);
        assert!(session.debug);
        assert!(!session.verify_login);
        assert_eq!(session.transport.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_username_is_no_credentials() {
        let p = Profile {
            username: None,
            ..profile()
        };
        let err = resolve_profile(&p, "lab", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { profile } if profile == "lab"));
    }

    #[test]
    fn password_env_takes_precedence() {
        let p = Profile {
            password_env: Some("PATH".into()),
            ..profile()
        };
        let pw = resolve_password(&p, "default").unwrap();
        assert_eq!(pw.expose_secret(), std::env::var("PATH").unwrap());
    }

    #[test]
    fn bad_scheme_is_rejected() {
        let p = Profile {
            scheme: "ftp".into(),
            ..profile()
        };
        let err = resolve_profile(&p, "default", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { field, .. } if field == "scheme"));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let p = Profile {
            limit: Some(0),
            ..profile()
        };
        let err = resolve_profile(&p, "default", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { field, .. } if field == "limit"));
    }

    #[test]
    fn active_profile_falls_back_to_default() {
        let cfg = Config::default();
        assert_eq!(cfg.active_profile_name(None), "default");
        assert_eq!(cfg.active_profile_name(Some("lab")), "lab");
        assert!(matches!(
            cfg.profile("lab"),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }
}
