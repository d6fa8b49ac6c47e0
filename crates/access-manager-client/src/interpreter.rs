//! # Response Interpretation
//!
//! Turns a raw transport response into either a decoded value or a typed
//! [`AccessManagerError`].
//!
//! ## Success Status Contract
//!
//! | Call | Method | Success | Result |
//! |------|--------|---------|--------|
//! | [`ResponseInterpreter::get_json`] | GET | 200 | body decoded as JSON |
//! | [`ResponseInterpreter::get_contains`] | GET | 200 / 404 | `true` / `false` |
//! | [`ResponseInterpreter::post`] | POST | 201 | `()` |
//! | [`ResponseInterpreter::delete`] | DELETE | 201 | `()` |
//!
//! DELETE expecting 201 is the AccessManager's own convention.
//!
//! ## Error Classification
//!
//! Any other status goes through [`StatusCodeErrorMap::classify`]. When the
//! body is a structured error document and the status has an entry in the
//! map, that entry builds the error; a structured body with an unmapped status
//! becomes [`AccessManagerError::Service`]; anything else becomes
//! [`AccessManagerError::UnexpectedStatus`].

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AccessManagerError, ElementKind};
use crate::error_response::ErrorResponse;
use crate::transport::{HttpMethod, HttpTransport, TransportResponse};

/// Error code the service reports for a missing required argument.
const ARGUMENT_NULL_CODE: &str = "ArgumentNullException";
/// Attribute naming the resource in a generic not-found error.
const RESOURCE_ID_ATTRIBUTE: &str = "ResourceId";

const POST_SUCCESS_STATUS: StatusCode = StatusCode::CREATED;
const DELETE_SUCCESS_STATUS: StatusCode = StatusCode::CREATED;

/// Builds a typed error from a structured error document.
pub type ErrorConstructor = fn(ErrorResponse) -> AccessManagerError;

/// Immutable mapping from HTTP status to the constructor of the matching error.
#[derive(Debug, Clone)]
pub struct StatusCodeErrorMap {
    constructors: HashMap<StatusCode, ErrorConstructor>,
}

impl Default for StatusCodeErrorMap {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusCodeErrorMap {
    pub fn new() -> Self {
        let constructors = [
            (StatusCode::INTERNAL_SERVER_ERROR, internal_error as ErrorConstructor),
            (StatusCode::BAD_REQUEST, bad_request_error as ErrorConstructor),
            (StatusCode::NOT_FOUND, not_found_error as ErrorConstructor),
        ]
        .into_iter()
        .collect();
        Self { constructors }
    }

    pub fn get(&self, status: StatusCode) -> Option<ErrorConstructor> {
        self.constructors.get(&status).copied()
    }

    /// Convert a non-success response into the matching error.
    pub fn classify(
        &self,
        method: HttpMethod,
        url: &Url,
        status: StatusCode,
        body: &str,
    ) -> AccessManagerError {
        match ErrorResponse::parse_body(body) {
            Some(error_response) => match self.get(status) {
                Some(construct) => construct(error_response),
                None => AccessManagerError::Service {
                    method,
                    url: url.to_string(),
                    status: status.as_u16(),
                    code: error_response.code,
                    message: error_response.message,
                },
            },
            None => AccessManagerError::UnexpectedStatus {
                method,
                url: url.to_string(),
                status: status.as_u16(),
                body: (!body.trim().is_empty()).then(|| body.to_string()),
            },
        }
    }
}

fn internal_error(error: ErrorResponse) -> AccessManagerError {
    AccessManagerError::Internal {
        message: error.message,
    }
}

fn bad_request_error(error: ErrorResponse) -> AccessManagerError {
    if error.code == ARGUMENT_NULL_CODE {
        AccessManagerError::ArgumentNull {
            message: error.message,
        }
    } else {
        AccessManagerError::InvalidArgument {
            message: error.message,
        }
    }
}

fn not_found_error(error: ErrorResponse) -> AccessManagerError {
    match ElementKind::from_not_found_code(&error.code) {
        Some(element_kind) => AccessManagerError::ElementNotFound {
            element_value: error
                .attribute(element_kind.as_str())
                .unwrap_or_default()
                .to_string(),
            element_kind,
            message: error.message,
        },
        None => AccessManagerError::NotFound {
            resource_id: error
                .attribute(RESOURCE_ID_ATTRIBUTE)
                .unwrap_or_default()
                .to_string(),
            message: error.message,
        },
    }
}

/// Sends requests through a transport and applies the success status contract.
#[derive(Clone)]
pub struct ResponseInterpreter {
    transport: Arc<dyn HttpTransport>,
    error_map: StatusCodeErrorMap,
}

impl std::fmt::Debug for ResponseInterpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseInterpreter")
            .field("error_map", &self.error_map)
            .finish_non_exhaustive()
    }
}

impl ResponseInterpreter {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            error_map: StatusCodeErrorMap::new(),
        }
    }

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// GET expecting 200, decoding the body as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, AccessManagerError> {
        let method = HttpMethod::Get;
        let resp = self.send(method, url).await?;
        if resp.status != StatusCode::OK {
            return Err(self.non_success(method, url, &resp));
        }

        serde_json::from_str(&resp.body).map_err(|source| AccessManagerError::Deserialization {
            method,
            url: url.to_string(),
            source,
        })
    }

    /// GET expecting 200 (exists) or 404 (absent).
    pub async fn get_contains(&self, url: &Url) -> Result<bool, AccessManagerError> {
        let method = HttpMethod::Get;
        let resp = self.send(method, url).await?;
        match resp.status {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(self.non_success(method, url, &resp)),
        }
    }

    /// POST with an empty body, expecting 201.
    pub async fn post(&self, url: &Url) -> Result<(), AccessManagerError> {
        self.expect_status(HttpMethod::Post, url, POST_SUCCESS_STATUS).await
    }

    /// DELETE expecting 201.
    pub async fn delete(&self, url: &Url) -> Result<(), AccessManagerError> {
        self.expect_status(HttpMethod::Delete, url, DELETE_SUCCESS_STATUS).await
    }

    async fn expect_status(
        &self,
        method: HttpMethod,
        url: &Url,
        expected: StatusCode,
    ) -> Result<(), AccessManagerError> {
        let resp = self.send(method, url).await?;
        if resp.status != expected {
            return Err(self.non_success(method, url, &resp));
        }
        Ok(())
    }

    async fn send(&self, method: HttpMethod, url: &Url) -> Result<TransportResponse, AccessManagerError> {
        self.transport
            .send(method, url)
            .await
            .map_err(|source| AccessManagerError::Transport {
                method,
                url: url.to_string(),
                source,
            })
    }

    fn non_success(&self, method: HttpMethod, url: &Url, resp: &TransportResponse) -> AccessManagerError {
        tracing::warn!(
            %method,
            %url,
            status = resp.status.as_u16(),
            "AccessManager returned non-success status"
        );
        self.error_map.classify(method, url, resp.status, &resp.body)
    }
}
