use thiserror::Error;

/// Top-level error type for the `zenoss-api` crate.
///
/// Covers every failure mode of a session: login, the RPC transport,
/// caller input validation, and server-reported failures.
/// `noccmd` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login was rejected (wrong credentials, login form bounced back).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Caller input ────────────────────────────────────────────────
    /// Router name is not one of the fixed Zenoss routers.
    #[error("Router '{name}' isn't available")]
    InvalidRouter { name: String },

    /// A `productionState` filter value has no entry in the state table.
    #[error("Production state '{value}' is unknown")]
    UnknownProductionState { value: String },

    // ── Transport ───────────────────────────────────────────────────
    /// Any transport, HTTP status, or decode failure of an RPC call.
    #[error("Session request failed: {0}")]
    SessionRequest(#[from] RequestFailure),

    /// URL construction failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    // ── Remote ──────────────────────────────────────────────────────
    /// The router answered with `success: false`.
    #[error("Remote operation failed: {message}")]
    RemoteOperation { message: String },

    /// A page came back empty before the reported total was reached.
    #[error("Pagination stalled: received {collected} of {total_count} record(s)")]
    StalledPagination { collected: usize, total_count: usize },
}

/// The specific failure behind an [`Error::SessionRequest`].
///
/// Keeps the original cause reachable through `source()`.
#[derive(Debug, Error)]
pub enum RequestFailure {
    /// Connection refused, reset, DNS failure, timeout, etc.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body was not the expected JSON shape.
    #[error("{source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl Error {
    /// Returns `true` if the login was rejected, either up front or as an
    /// unauthorized status on a later call.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::SessionRequest(RequestFailure::Status { status, .. }) => {
                *status == reqwest::StatusCode::UNAUTHORIZED
                    || *status == reqwest::StatusCode::FORBIDDEN
            }
            _ => false,
        }
    }

    /// Returns `true` if the per-request I/O timeout fired.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::SessionRequest(RequestFailure::Transport(e)) if e.is_timeout())
    }

    /// Returns `true` if the server could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::SessionRequest(RequestFailure::Transport(e)) if e.is_connect())
    }
}
