//! CLI error types with miette diagnostics.
//!
//! Maps `zenoss_api::Error` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use zenoss_api::Error as ApiError;
use zenoss_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to Zenoss at {url}")]
    #[diagnostic(
        code(noccmd::connection_failed),
        help(
            "Check that Zenoss is running and reachable.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: ApiError,
    },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(noccmd::timeout),
        help("Increase the timeout with --timeout or lower --limit.")
    )]
    Timeout { url: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed for profile '{profile}'")]
    #[diagnostic(
        code(noccmd::auth_failed),
        help(
            "Verify the username and password.\n\
             Set the password with --password or ZENOSS_PASSWORD."
        )
    )]
    AuthFailed {
        profile: String,
        #[source]
        source: ApiError,
    },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(noccmd::no_credentials),
        help("Pass --username and --password, or add them to the profile.")
    )]
    NoCredentials { profile: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(noccmd::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: noccmd config init --host <HOST> --username <USER>"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No Zenoss host configured")]
    #[diagnostic(
        code(noccmd::no_config),
        help(
            "Pass --host, or create a profile with: noccmd config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(noccmd::config))]
    Config(ConfigError),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(noccmd::validation))]
    Validation { field: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Zenoss reported an error: {message}")]
    #[diagnostic(code(noccmd::remote))]
    Remote { message: String },

    #[error(transparent)]
    #[diagnostic(code(noccmd::api))]
    Api(ApiError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(noccmd::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::ProfileNotFound { .. } | Self::NoConfig { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    /// Translate a session error, attaching the profile and URL in play.
    pub fn from_api(err: ApiError, profile: &str, url: &str) -> Self {
        if err.is_auth_failure() {
            return Self::AuthFailed {
                profile: profile.into(),
                source: err,
            };
        }
        if err.is_timeout() {
            return Self::Timeout { url: url.into() };
        }
        if err.is_connect() {
            return Self::ConnectionFailed {
                url: url.into(),
                source: err,
            };
        }
        match err {
            ApiError::RemoteOperation { message } => Self::Remote { message },
            ApiError::UnknownProductionState { value } => Self::Validation {
                field: "production-state".into(),
                reason: format!("'{value}' is not a known production state"),
            },
            other => Self::Api(other),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
