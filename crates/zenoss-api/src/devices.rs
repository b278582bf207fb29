// Device inventory download
//
// `DeviceRouter.getDevices` answers in pages of at most `limit` records.
// The collector keeps asking for the next page until the accumulated count
// reaches the total the server reports, stopping at the first failure.

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::client::ZenossClient;
use crate::error::Error;
use crate::production_state::{self, PRODUCTION_STATE_FILTER};
use crate::progress::{NoProgress, Progress, ProgressSink};
use crate::router::Router;
use crate::rpc::DevicePage;

/// Organizer used when the caller doesn't name one.
pub const DEFAULT_ORGANIZER: &str = "/Devices";

const GET_DEVICES: &str = "getDevices";
const DMD_PREFIX: &str = "/zport/dmd";

/// Filter name → value(s), e.g. `name`, `ipAddress`, `deviceClass`,
/// `productionState`.
pub type DeviceFilters = Map<String, Value>;

/// Every device record under an organizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceCollection {
    /// Total reported by the last successful page.
    pub total_count: usize,
    /// Records in server page order, untouched.
    pub devices: Vec<Value>,
    /// Opaque token from the last successful page.
    pub hash: Option<Value>,
}

/// Replace a `productionState` filter's names with their numeric codes.
///
/// Other filters are left alone.
pub fn normalize_filters(mut filters: DeviceFilters) -> Result<DeviceFilters, Error> {
    if let Some(states) = filters.get(PRODUCTION_STATE_FILTER) {
        let codes = production_state::normalize(states)?;
        filters.insert(PRODUCTION_STATE_FILTER.to_owned(), json!(codes));
    }
    Ok(filters)
}

impl ZenossClient {
    /// Download every device under `organizer` (default `/Devices`)
    /// matching `filters`.
    pub async fn get_devices(
        &mut self,
        organizer: Option<&str>,
        filters: DeviceFilters,
    ) -> Result<DeviceCollection, Error> {
        self.get_devices_with_progress(organizer, filters, &mut NoProgress)
            .await
    }

    /// Same as [`get_devices`](Self::get_devices), reporting to `progress`
    /// after every successful page.
    ///
    /// Filter validation happens before the first request. Any failed call
    /// or `success: false` page aborts the download; nothing collected so
    /// far is returned.
    pub async fn get_devices_with_progress<P: ProgressSink + ?Sized>(
        &mut self,
        organizer: Option<&str>,
        filters: DeviceFilters,
        progress: &mut P,
    ) -> Result<DeviceCollection, Error> {
        let organizer = organizer.unwrap_or(DEFAULT_ORGANIZER);
        let params = normalize_filters(filters)?;
        let uid = format!("{DMD_PREFIX}{organizer}");
        let limit = self.limit();

        debug!(organizer, limit, filters = ?params, "calling DeviceRouter.getDevices");

        let mut devices: Vec<Value> = Vec::new();
        let mut hash = None;
        let mut requests = 0usize;
        // Greater than zero so the first page is always requested.
        let mut total_count = 1usize;

        while devices.len() < total_count {
            let start = devices.len();
            let data = [json!({
                "uid": uid,
                "start": start,
                "limit": limit,
                "params": params,
            })];

            let page: DevicePage = match self
                .call_router(Router::DeviceRouter, GET_DEVICES, &data)
                .await
            {
                Ok(page) => page,
                Err(err) => {
                    warn!(
                        received = devices.len(),
                        requests,
                        error = %err,
                        "device download failed"
                    );
                    return Err(err);
                }
            };

            if !page.success {
                let message = page.msg.unwrap_or_else(|| "unknown error".into());
                warn!(
                    received = devices.len(),
                    requests,
                    request = requests + 1,
                    %message,
                    "getDevices reported failure"
                );
                return Err(Error::RemoteOperation { message });
            }

            if page.devices.is_empty() && page.total_count > devices.len() {
                warn!(
                    received = devices.len(),
                    requests,
                    total_count = page.total_count,
                    "getDevices returned an empty page before the total"
                );
                return Err(Error::StalledPagination {
                    collected: devices.len(),
                    total_count: page.total_count,
                });
            }

            requests += 1;
            total_count = page.total_count;
            hash = page.hash;
            devices.extend(page.devices);

            let snapshot = Progress {
                collected: devices.len(),
                total_count,
                requests,
            };
            debug!(
                start,
                received = devices.len(),
                total_count,
                percent = snapshot.percent(),
                "device page received"
            );
            progress.page_received(&snapshot);
        }

        if devices.len() > total_count {
            warn!(
                received = devices.len(),
                total_count,
                "server returned more devices than it reported"
            );
        }

        debug!(received = devices.len(), requests, "getDevices finished");

        Ok(DeviceCollection {
            total_count,
            devices,
            hash,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn filters(value: Value) -> DeviceFilters {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn normalize_rewrites_production_state_only() {
        let out = normalize_filters(filters(json!({
            "name": "web",
            "productionState": ["Production", 300],
        })))
        .unwrap();

        assert_eq!(out["name"], json!("web"));
        assert_eq!(out["productionState"], json!([1000, 300]));
    }

    #[test]
    fn normalize_without_production_state_is_identity() {
        let input = filters(json!({ "deviceClass": "/Server/Linux" }));
        assert_eq!(normalize_filters(input.clone()).unwrap(), input);
    }

    #[test]
    fn normalize_rejects_unknown_state() {
        let err = normalize_filters(filters(json!({ "productionState": ["live"] }))).unwrap_err();
        assert!(matches!(err, Error::UnknownProductionState { value } if value == "live"));
    }
}
