#![allow(
    dead_code,
    missing_docs,
    clippy::expect_used,
    clippy::missing_panics_doc
)]
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{error, info};

use ccflow_core::{Credentials, FlowClient, FlowConfig};

pub const TOKEN_PATH: &str = "/webtrees/oauth/token";
pub const API_PATH: &str = "/webtrees/api/version";
pub const USER_AGENT: &str = "MyScript/1.0";

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A response served by the mock server.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: StatusCode,
    pub body: String,
}

impl CannedResponse {
    pub fn json(status: u16, body: &Value) -> Self {
        Self::raw(status, &body.to_string())
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status code"),
            body: body.to_string(),
        }
    }
}

/// A request received by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn form(&self) -> Vec<(String, String)> {
        serde_urlencoded::from_str(&self.body).expect("form-encoded body")
    }
}

#[derive(Debug, Clone)]
struct MockState {
    token: CannedResponse,
    api: CannedResponse,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Serves the token endpoint and the API endpoint on an ephemeral local port.
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(token: CannedResponse, api: CannedResponse) -> anyhow::Result<Self> {
        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .context("bind mock server")?;
        let addr = listener.local_addr().context("mock server address")?;

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            token,
            api,
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(record).with_state(state);

        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                error!(?err, "mock server stopped");
            }
        });
        info!(%addr, "mock server started");

        Ok(Self {
            addr,
            requests,
            handle,
        })
    }

    pub fn token_url(&self) -> String {
        format!("http://{}{TOKEN_PATH}", self.addr)
    }

    pub fn api_url(&self) -> String {
        format!("http://{}{API_PATH}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }

    pub fn client(&self) -> FlowClient {
        client_for(&self.token_url(), &self.api_url())
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn client_for(token_url: &str, api_url: &str) -> FlowClient {
    let credentials = Credentials::new("my-client", "my-secret", token_url, api_url)
        .expect("valid credentials");
    let config = FlowConfig::builder(credentials)
        .with_user_agent(USER_AGENT)
        .build()
        .expect("valid config");
    // loopback requests must not be routed through a configured HTTP_PROXY
    FlowClient::with_builder(config, reqwest::Client::builder().no_proxy())
        .expect("valid client")
}

/// Returns a local URL on which nothing listens.
pub fn unreachable_url(path: &str) -> String {
    let listener = std::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).expect("bind");
    let addr = listener.local_addr().expect("local address");
    drop(listener);
    format!("http://{addr}{path}")
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            method,
            path: path.clone(),
            headers,
            body,
        });

    let canned = match path.as_str() {
        TOKEN_PATH => state.token,
        API_PATH => state.api,
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    (
        canned.status,
        [(header::CONTENT_TYPE, "application/json")],
        canned.body,
    )
        .into_response()
}
