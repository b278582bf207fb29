//! Clap derive structures for the `noccmd` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// noccmd -- query Zenoss device inventory from the command line
#[derive(Debug, Parser)]
#[command(
    name = "noccmd",
    version,
    about = "Query Zenoss device inventory from the command line",
    long_about = "A NOC helper for the Zenoss JSON API.\n\n\
        Logs in with a cookie session and pages through DeviceRouter.getDevices\n\
        until the whole inventory under an organizer has been downloaded.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Zenoss profile to use
    #[arg(long, short = 'p', env = "ZENOSS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Zenoss host (overrides profile)
    #[arg(long, short = 'H', env = "ZENOSS_HOST", global = true)]
    pub host: Option<String>,

    /// Zenoss web port (overrides profile)
    #[arg(long, env = "ZENOSS_PORT", global = true)]
    pub port: Option<u16>,

    /// URL scheme, http or https (overrides profile)
    #[arg(long, env = "ZENOSS_SCHEME", global = true)]
    pub scheme: Option<String>,

    /// Login name
    #[arg(long, short = 'u', env = "ZENOSS_USERNAME", global = true)]
    pub username: Option<String>,

    /// Login password (ZENOSS_PASSWORD is read when this is absent)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Records per request
    #[arg(long, env = "ZENOSS_LIMIT", global = true)]
    pub limit: Option<usize>,

    /// Request timeout in seconds
    #[arg(long, env = "ZENOSS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Log full request payloads
    #[arg(long, global = true)]
    pub debug: bool,

    /// Don't check the login response; failures surface on the first call
    #[arg(long, global = true)]
    pub no_verify_login: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ZENOSS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download device descriptions
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// List the JSON API routers and their endpoints
    Routers,

    /// List the known production states and their codes
    #[command(name = "production-states", alias = "states")]
    ProductionStates,

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    /// Organizer to list, relative to /zport/dmd
    #[arg(long, default_value = "/Devices")]
    pub organizer: String,

    /// Filter by device name
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by IP address
    #[arg(long)]
    pub ip_address: Option<String>,

    /// Filter by device class
    #[arg(long)]
    pub device_class: Option<String>,

    /// Filter by production state, by name or code (repeatable)
    #[arg(long = "production-state", value_name = "STATE")]
    pub production_states: Vec<String>,

    /// Extra filter as KEY=VALUE (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Hide the download progress bar
    #[arg(long)]
    pub no_progress: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a profile from --host/--port/--username to the config file
    Init,
    /// Print the loaded configuration (passwords redacted)
    Show,
    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
