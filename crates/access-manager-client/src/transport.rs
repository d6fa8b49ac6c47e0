//! HTTP transport used by the client.
//!
//! A transport performs one exchange per call and reports the raw status and
//! body. It knows nothing about the AccessManager's status conventions or
//! error documents; that is the job of [`crate::interpreter`].
//!
//! Every request carries `Accept: application/json`. GET and DELETE carry no
//! body, POST carries an empty one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use url::Url;

use crate::config::{AccessManagerClientConfig, ConfigError};

const JSON_MEDIA_TYPE: &str = "application/json";

/// HTTP methods used by the AccessManager API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status and body text of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The exchange could not be completed. Never produced from a response the
/// service actually sent.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection, TLS, timeout, or body read failure in reqwest.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// Failure reported by a custom transport.
    #[error("transport unavailable: {0}")]
    Unavailable(String),
    /// The transport was closed by its owner.
    #[error("transport has been closed")]
    Closed,
}

/// Sends requests to the AccessManager.
///
/// Implementations must be safe to share between tasks. `close` releases any
/// resources; it is called at most once, and only by the client that owns the
/// transport.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, method: HttpMethod, url: &Url) -> Result<TransportResponse, TransportError>;

    fn close(&self) {}
}

/// [`HttpTransport`] backed by a `reqwest::Client`.
#[derive(Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    closed: AtomicBool,
}

impl ReqwestTransport {
    /// Build a transport applying the configured timeout and static headers.
    /// A timeout of `0` leaves requests without a deadline.
    pub fn new(config: &AccessManagerClientConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
            let mut header_value = HeaderValue::from_str(value.as_str())
                .map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
            header_value.set_sensitive(true);
            headers.append(header_name, header_value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::TransportBuild(e.to_string()))?;

        Ok(Self::from_client(http))
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self {
            http,
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, method: HttpMethod, url: &Url) -> Result<TransportResponse, TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }

        let request = match method {
            HttpMethod::Get => self.http.get(url.clone()),
            HttpMethod::Post => self.http.post(url.clone()).body(""),
            HttpMethod::Delete => self.http.delete(url.clone()),
        };

        tracing::debug!(%method, %url, "sending AccessManager request");
        let resp = request
            .header(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE))
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(%method, %url, status = status.as_u16(), "received AccessManager response");

        Ok(TransportResponse { status, body })
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::debug!("closed AccessManager HTTP transport");
        }
    }
}
