//! HTTP client for the calculator backend.
//!
//! [`ApiClient`] builds the two JSON requests and interprets the replies. The
//! actual I/O goes through a [`Transport`], so the client runs against the
//! reqwest-backed [`HttpTransport`] in the app and against scripted replies
//! in tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ServerConfig;
use crate::data::calculation::{CalculationRequest, CalculationResult, ResponseError};
use crate::data::distribution::ParameterSet;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("server responded with HTTP status {0}")]
    Status(u16),
    /// The request never produced a response (connection, TLS, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("response body is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
    #[error(transparent)]
    Response(#[from] ResponseError),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<HttpReply, ClientError>> + Send + 'a>>;

/// Sends a JSON body to an endpoint path and returns whatever came back.
///
/// Non-success statuses are not errors at this level.
pub trait Transport: Send + Sync {
    fn post_json<'a>(&'a self, path: &'a str, body: String) -> TransportFuture<'a>;
}

// ─────────────────────────────────────────────────────────────────────────────
// HttpTransport
// ─────────────────────────────────────────────────────────────────────────────

/// [`Transport`] over HTTP using reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
    server: ServerConfig,
}

impl HttpTransport {
    pub fn new(server: &ServerConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        let timeout = server
            .timeout_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .filter(|d| !d.is_zero());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            server: server.clone(),
        })
    }
}

impl Transport for HttpTransport {
    fn post_json<'a>(&'a self, path: &'a str, body: String) -> TransportFuture<'a> {
        Box::pin(async move {
            let url = self.server.url(path);
            log::debug!("POST {url} {body}");
            let response = self
                .client
                .post(&url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?.to_vec();
            log::debug!("POST {url} -> {status} ({} bytes)", body.len());
            Ok(HttpReply { status, body })
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ApiClient
// ─────────────────────────────────────────────────────────────────────────────

/// Typed access to the `save_parameters` and `calculate` endpoints.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    save_parameters_path: String,
    calculate_path: String,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, server: &ServerConfig) -> Self {
        Self {
            transport,
            save_parameters_path: server.save_parameters_path.clone(),
            calculate_path: server.calculate_path.clone(),
        }
    }

    /// Client talking HTTP to `server`.
    pub fn connect(server: &ServerConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(server)?;
        Ok(Self::new(Arc::new(transport), server))
    }

    /// Store the parameter set. Any 2xx status counts as success; the body is
    /// not inspected.
    pub async fn save_parameters(&self, parameters: &ParameterSet) -> Result<(), ClientError> {
        let body = serde_json::to_string(parameters).map_err(ClientError::Encode)?;
        let reply = self
            .transport
            .post_json(&self.save_parameters_path, body)
            .await?;
        if reply.is_success() {
            Ok(())
        } else {
            Err(ClientError::Status(reply.status))
        }
    }

    /// Run a calculation.
    ///
    /// The reply body is decoded whatever the status: the backend reports
    /// application errors as `{"status": "error", ...}` with a 4xx/5xx status.
    pub async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, ClientError> {
        let body = serde_json::to_string(request).map_err(ClientError::Encode)?;
        let reply = self.transport.post_json(&self.calculate_path, body).await?;
        let value: serde_json::Value =
            serde_json::from_slice(&reply.body).map_err(ClientError::Decode)?;
        Ok(CalculationResult::interpret(request.calc_type(), &value)?)
    }
}
