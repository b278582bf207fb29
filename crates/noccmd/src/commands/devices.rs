//! Device download handler.

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tabled::Tabled;
use zenoss_api::production_state::{self, PRODUCTION_STATE_FILTER};
use zenoss_api::{DeviceFilters, Progress, ProgressSink, ZenossClient};

use crate::cli::{DevicesArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "UID")]
    uid: String,
}

impl From<&Value> for DeviceRow {
    fn from(d: &Value) -> Self {
        Self {
            name: text_field(d, "name"),
            ip: text_field(d, "ipAddressString"),
            state: state_label(d.get("productionState")),
            class: d
                .pointer("/deviceClass/path")
                .or_else(|| d.get("deviceClass"))
                .map_or_else(|| "-".into(), display_value),
            uid: text_field(d, "uid"),
        }
    }
}

fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => "-".into(),
        other => other.to_string(),
    }
}

fn text_field(d: &Value, key: &str) -> String {
    d.get(key).map_or_else(|| "-".into(), display_value)
}

fn state_label(v: Option<&Value>) -> String {
    match v {
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(production_state::name_of)
            .map_or_else(|| n.to_string(), str::to_owned),
        Some(other) => display_value(other),
        None => "-".into(),
    }
}

/// The identifier printed by `--output plain`.
fn device_id(d: &Value) -> String {
    d.get("uid")
        .or_else(|| d.get("name"))
        .map(display_value)
        .unwrap_or_default()
}

// ── Filters ─────────────────────────────────────────────────────────

/// Numbers become JSON integers so codes and names can be mixed freely.
fn filter_value(raw: &str) -> Value {
    raw.parse::<i64>()
        .map_or_else(|_| Value::String(raw.to_owned()), Value::from)
}

fn build_filters(args: &DevicesArgs) -> Result<DeviceFilters, CliError> {
    let mut filters = DeviceFilters::new();

    for raw in &args.filters {
        let (key, value) = raw.split_once('=').ok_or_else(|| CliError::Validation {
            field: "filter".into(),
            reason: format!("expected KEY=VALUE, got '{raw}'"),
        })?;
        if key.is_empty() {
            return Err(CliError::Validation {
                field: "filter".into(),
                reason: format!("empty key in '{raw}'"),
            });
        }
        filters.insert(key.to_owned(), filter_value(value));
    }

    // Dedicated flags win over a --filter for the same key.
    if let Some(ref name) = args.name {
        filters.insert("name".into(), Value::String(name.clone()));
    }
    if let Some(ref ip) = args.ip_address {
        filters.insert("ipAddress".into(), Value::String(ip.clone()));
    }
    if let Some(ref class) = args.device_class {
        filters.insert("deviceClass".into(), Value::String(class.clone()));
    }
    if !args.production_states.is_empty() {
        let states = args
            .production_states
            .iter()
            .map(|s| filter_value(s))
            .collect();
        filters.insert(PRODUCTION_STATE_FILTER.into(), Value::Array(states));
    }

    Ok(filters)
}

// ── Progress ────────────────────────────────────────────────────────

/// Drives an optional progress bar and remembers the last snapshot for
/// the closing summary.
struct DownloadProgress {
    bar: Option<ProgressBar>,
    last: Option<Progress>,
}

impl DownloadProgress {
    fn new(visible: bool) -> Self {
        let bar = visible.then(|| {
            let bar = ProgressBar::new(0);
            let style = ProgressStyle::with_template(
                "{spinner} {msg} [{bar:40}] {pos}/{len} ({percent}%)",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
            bar.set_style(style);
            bar.set_message("devices");
            bar
        });
        Self { bar, last: None }
    }

    fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

impl ProgressSink for DownloadProgress {
    fn page_received(&mut self, progress: &Progress) {
        if let Some(ref bar) = self.bar {
            bar.set_length(u64::try_from(progress.total_count).unwrap_or(u64::MAX));
            bar.set_position(u64::try_from(progress.collected).unwrap_or(u64::MAX));
        }
        self.last = Some(*progress);
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let filters = build_filters(&args)?;
    let (profile, session) = config::build_session_config(global)?;
    let url = session.base_url.to_string();

    let mut client = ZenossClient::connect(&session)
        .await
        .map_err(|e| CliError::from_api(e, &profile, &url))?;

    let mut progress = DownloadProgress::new(!(global.quiet || args.no_progress));
    let result = client
        .get_devices_with_progress(Some(&args.organizer), filters, &mut progress)
        .await;
    progress.finish();
    let collection = result.map_err(|e| CliError::from_api(e, &profile, &url))?;

    let out = output::render_list(
        &global.output,
        &collection.devices,
        |d| DeviceRow::from(d),
        device_id,
    )?;
    output::print_output(&out, global.quiet);

    if !global.quiet {
        let requests = progress.last.map_or(0, |p| p.requests);
        eprintln!(
            "Received {} of {} device description(s) using {requests} request(s)",
            collection.devices.len(),
            collection.total_count,
        );
    }
    Ok(())
}
