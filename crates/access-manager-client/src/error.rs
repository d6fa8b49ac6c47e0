//! AccessManager client error types.

use crate::config::ConfigError;
use crate::stringifier::StringifierError;
use crate::transport::{HttpMethod, TransportError};

/// Kind of element named by an element-not-found error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    User,
    Group,
    EntityType,
    Entity,
}

impl ElementKind {
    /// Name used both for display and as the attribute key holding the
    /// offending value in the service's error document.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Group => "Group",
            Self::EntityType => "EntityType",
            Self::Entity => "Entity",
        }
    }

    /// Error code the service uses when an element of this kind is missing.
    pub fn not_found_code(self) -> &'static str {
        match self {
            Self::User => "UserNotFoundException",
            Self::Group => "GroupNotFoundException",
            Self::EntityType => "EntityTypeNotFoundException",
            Self::Entity => "EntityNotFoundException",
        }
    }

    pub fn from_not_found_code(code: &str) -> Option<Self> {
        [Self::User, Self::Group, Self::EntityType, Self::Entity]
            .into_iter()
            .find(|kind| kind.not_found_code() == code)
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from AccessManager calls.
#[derive(Debug, thiserror::Error)]
pub enum AccessManagerError {
    /// The request could not be sent or the response could not be read.
    #[error("failed to call URL '{url}' with '{method}' method: {source}")]
    Transport {
        method: HttpMethod,
        url: String,
        source: TransportError,
    },
    /// A success response body did not match the expected shape.
    #[error("failed to call URL '{url}' with '{method}' method, error deserializing response body: {source}")]
    Deserialization {
        method: HttpMethod,
        url: String,
        source: serde_json::Error,
    },
    /// 400 with an `ArgumentNullException` code.
    #[error("{message}")]
    ArgumentNull { message: String },
    /// 400 with any other code.
    #[error("{message}")]
    InvalidArgument { message: String },
    /// 404 naming a user, group, entity type or entity which does not exist.
    #[error("{message}")]
    ElementNotFound {
        message: String,
        element_kind: ElementKind,
        element_value: String,
    },
    /// 404 for any other resource. `resource_id` is empty if the service did
    /// not name one.
    #[error("{message}")]
    NotFound { message: String, resource_id: String },
    /// 500 with a structured error body.
    #[error("{message}")]
    Internal { message: String },
    /// Any other non-success status with a structured error body.
    #[error("failed to call URL '{url}' with '{method}' method, received non-success HTTP response status {status}, error code '{code}', and error message '{message}'")]
    Service {
        method: HttpMethod,
        url: String,
        status: u16,
        code: String,
        message: String,
    },
    /// Non-success status whose body is empty or not a structured error.
    #[error("failed to call URL '{url}' with '{method}' method, received non-success HTTP response status {status}{}", body_suffix(.body))]
    UnexpectedStatus {
        method: HttpMethod,
        url: String,
        status: u16,
        body: Option<String>,
    },
    /// An identifier that cannot occupy a URL path segment (empty, `.` or `..`).
    /// No request is sent.
    #[error("identifier '{identifier}' cannot be used as a URL path segment")]
    UnroutableIdentifier { identifier: String },
    /// A string returned by the service was rejected by a stringifier.
    #[error(transparent)]
    Stringifier(#[from] StringifierError),
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" and response body '{body}'"),
        None => String::new(),
    }
}

impl AccessManagerError {
    /// HTTP status reported by the service, if this error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ArgumentNull { .. } | Self::InvalidArgument { .. } => Some(400),
            Self::ElementNotFound { .. } | Self::NotFound { .. } => Some(404),
            Self::Internal { .. } => Some(500),
            Self::Service { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport { .. }
            | Self::Deserialization { .. }
            | Self::UnroutableIdentifier { .. }
            | Self::Stringifier(_)
            | Self::Config(_) => None,
        }
    }
}
