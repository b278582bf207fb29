// zenoss-api: Async Rust client for the Zenoss JSON-RPC management API

pub mod auth;
pub mod client;
pub mod devices;
pub mod error;
pub mod production_state;
pub mod progress;
pub mod router;
pub mod rpc;
pub mod transport;

pub use client::{DEFAULT_LIMIT, DEFAULT_PORT, SessionConfig, ZenossClient};
pub use devices::{DEFAULT_ORGANIZER, DeviceCollection, DeviceFilters, normalize_filters};
pub use error::{Error, RequestFailure};
pub use production_state::PRODUCTION_STATES;
pub use progress::{NoProgress, Progress, ProgressSink};
pub use router::Router;
pub use transport::TransportConfig;
