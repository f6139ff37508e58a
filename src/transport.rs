//! Transport capability.
//!
//! The pipeline never performs I/O itself: it hands a fully assembled
//! [`TransportRequest`] to an injected [`Transport`] and classifies whatever
//! comes back. Production uses [`HttpTransport`] over `reqwest`; tests supply
//! doubles that return synthetic responses or failures.

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::HeaderMap;

use crate::config::HttpConfig;
use crate::error::{Error, TransportErrorKind};

/// A fully assembled transport-level request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: reqwest::Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Transport-level response data.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Body as lossy UTF-8, for logging and error snippets.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Pluggable wire transport.
///
/// Invoked exactly once per assembled request. The transport owns its own
/// concurrency and timeouts; the pipeline treats it as opaque.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, Error>;
}

/// Production transport backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport from HTTP configuration (timeouts, default
    /// headers, proxy, user agent).
    pub fn from_config(config: &HttpConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("invalid proxy `{proxy}`: {e}")))?;
            builder = builder.proxy(proxy);
        }
        if !config.headers.is_empty() {
            let mut defaults = HeaderMap::new();
            for (name, value) in &config.headers {
                let name: reqwest::header::HeaderName = name
                    .parse()
                    .map_err(|e| Error::Config(format!("invalid header name `{name}`: {e}")))?;
                let value = value
                    .parse()
                    .map_err(|e| Error::Config(format!("invalid header value: {e}")))?;
                defaults.insert(name, value);
            }
            builder = builder.default_headers(defaults);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, Error> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await.map_err(classify_send_error)?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport {
                kind: TransportErrorKind::Body,
                message: e.to_string(),
            })?
            .to_vec();

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

/// Maps a native send failure onto the taxonomy: recognizable kinds keep
/// their code, everything else is a generic no-response.
fn classify_send_error(error: reqwest::Error) -> Error {
    let kind = if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else if error.is_builder() || error.is_request() {
        TransportErrorKind::Request
    } else {
        return Error::NoResponse;
    };
    Error::Transport {
        kind,
        message: error.to_string(),
    }
}
