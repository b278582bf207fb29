// Zenoss JSON API session client
//
// Owns one cookie-authenticated HTTP session against one Zenoss instance.
// Wraps router calls into the single-envelope RPC batch, sends them, and
// funnels every transport or decode failure through `RequestFailure`.

use reqwest::header::CONTENT_TYPE;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::error::{Error, RequestFailure};
use crate::router::Router;
use crate::rpc::{RpcRequest, RpcResponse};
use crate::transport::TransportConfig;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Default number of records requested per page.
pub const DEFAULT_LIMIT: usize = 200;

/// Default Zenoss web port.
pub const DEFAULT_PORT: u16 = 8080;

/// Everything needed to open a session.
///
/// Built by `zenoss-config` or by hand; the client never reads files.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Server root, e.g. `http://zenoss.example.com:8080`.
    pub base_url: Url,
    pub username: String,
    pub password: SecretString,
    /// Maximum records per page for paginated calls.
    pub limit: usize,
    /// Log full request payloads at debug level.
    pub debug: bool,
    /// Fail construction when the login form bounces back.
    pub verify_login: bool,
    pub transport: TransportConfig,
}

impl SessionConfig {
    /// Config for `http://{host}:{port}` with default limit and transport.
    pub fn new(
        host: &str,
        port: u16,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<Self, Error> {
        Self::with_scheme("http", host, port, username, password)
    }

    /// Same as [`new`](Self::new) with an explicit `http`/`https` scheme.
    pub fn with_scheme(
        scheme: &str,
        host: &str,
        port: u16,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("{scheme}://{host}:{port}"))?;
        Ok(Self {
            base_url,
            username: username.into(),
            password,
            limit: DEFAULT_LIMIT,
            debug: false,
            verify_login: true,
            transport: TransportConfig::default(),
        })
    }
}

/// Authenticated client for the Zenoss JSON API.
///
/// The transaction counter and cookie jar are private to one instance.
/// Calls take `&mut self`, so a session cannot be driven from two places
/// at once; open one client per logical session instead.
pub struct ZenossClient {
    http: reqwest::Client,
    base_url: Url,
    limit: usize,
    debug: bool,
    next_tid: u64,
}

impl ZenossClient {
    /// Build the HTTP client from `config` and log in.
    ///
    /// With `verify_login` set, a rejected login fails here with
    /// [`Error::Authentication`]. Without it, a rejected login only shows up
    /// as a [`Error::SessionRequest`] on the first router call.
    pub async fn connect(config: &SessionConfig) -> Result<Self, Error> {
        info!(
            url = %config.base_url,
            limit = config.limit,
            "initializing Zenoss JSON API client"
        );

        let http = config.transport.build_client()?;
        let client =
            Self::with_client(http, config.base_url.clone(), config.limit).with_debug(config.debug);

        client
            .login(&config.username, &config.password, config.verify_login)
            .await?;

        Ok(client)
    }

    /// Wrap a pre-built `reqwest::Client` without logging in.
    ///
    /// Use this when the client's cookie jar already holds a session.
    pub fn with_client(http: reqwest::Client, base_url: Url, limit: usize) -> Self {
        Self {
            http,
            base_url,
            limit: limit.max(1),
            debug: false,
            next_tid: 1,
        }
    }

    /// Toggle request payload logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The server root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Maximum records per page.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The transaction id the next call will use.
    pub fn next_tid(&self) -> u64 {
        self.next_tid
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Resolve an absolute server path against the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Router calls ─────────────────────────────────────────────────

    /// Call `method` on the router named `router`.
    ///
    /// Unknown router names fail with [`Error::InvalidRouter`] before any
    /// request is built. Returns the decoded `result` payload.
    pub async fn call<R: DeserializeOwned>(
        &mut self,
        router: &str,
        method: &str,
        data: &[Value],
    ) -> Result<R, Error> {
        let router = Router::lookup(router)?;
        self.call_router(router, method, data).await
    }

    /// Call `method` on a known router.
    ///
    /// Consumes the next transaction id whether or not the call succeeds.
    pub async fn call_router<R: DeserializeOwned>(
        &mut self,
        router: Router,
        method: &str,
        data: &[Value],
    ) -> Result<R, Error> {
        let url = self.url(&router.endpoint())?;
        let tid = self.next_tid;
        self.next_tid += 1;

        let envelope = [RpcRequest::new(router.action(), method, data, tid)];
        debug!(%router, method, tid, "POST {url}");
        if self.debug {
            debug!(
                tid,
                payload = %serde_json::to_string(&envelope).unwrap_or_default(),
                "rpc request"
            );
        }

        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(&envelope)
            .send()
            .await
            .map_err(RequestFailure::Transport)?;

        Self::parse_response(resp).await
    }

    async fn parse_response<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, Error> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RequestFailure::Status { status, body }.into());
        }

        let body = resp.text().await.map_err(RequestFailure::Transport)?;
        let decoded: RpcResponse<R> =
            serde_json::from_str(&body).map_err(|source| RequestFailure::Decode {
                source,
                body: body.clone(),
            })?;

        Ok(decoded.result)
    }
}
