//! Offline reference listings: routers and production states.

use serde::Serialize;
use tabled::Tabled;
use zenoss_api::{PRODUCTION_STATES, Router};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct RouterEntry {
    router: &'static str,
    endpoint: String,
}

#[derive(Tabled)]
struct RouterRow {
    #[tabled(rename = "Router")]
    router: &'static str,
    #[tabled(rename = "Endpoint")]
    endpoint: String,
}

#[derive(Serialize)]
struct StateEntry {
    name: &'static str,
    code: i64,
}

#[derive(Tabled)]
struct StateRow {
    #[tabled(rename = "State")]
    name: &'static str,
    #[tabled(rename = "Code")]
    code: i64,
}

fn router_entries() -> Vec<RouterEntry> {
    Router::all()
        .map(|r| RouterEntry {
            router: r.action(),
            endpoint: r.endpoint(),
        })
        .collect()
}

pub fn routers(global: &GlobalOpts) -> Result<(), CliError> {
    let entries = router_entries();
    let out = output::render_list(
        &global.output,
        &entries,
        |e| RouterRow {
            router: e.router,
            endpoint: e.endpoint.clone(),
        },
        |e| e.router.to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn production_states(global: &GlobalOpts) -> Result<(), CliError> {
    let entries: Vec<StateEntry> = PRODUCTION_STATES
        .iter()
        .map(|&(name, code)| StateEntry { name, code })
        .collect();
    let out = output::render_list(
        &global.output,
        &entries,
        |e| StateRow {
            name: e.name,
            code: e.code,
        },
        |e| format!("{}\t{}", e.name, e.code),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
