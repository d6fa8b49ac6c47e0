//! AccessManager client configuration.
//!
//! Points the client at a hosted AccessManager and configures the HTTP
//! transport the client builds for itself. Override via environment variables
//! or explicit construction.

use url::Url;
use zeroize::Zeroizing;

/// Fixed API-version prefix appended to every base URL.
pub const API_PATH_PREFIX: &str = "api/v1/";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to an AccessManager instance.
///
/// Custom `Debug` implementation redacts header values, which commonly carry
/// credentials.
#[derive(Clone)]
pub struct AccessManagerClientConfig {
    /// Base URL of the hosted AccessManager, without the `api/v1/` prefix.
    pub base_url: Url,
    /// Request timeout in seconds, applied by the built-in transport. `0`
    /// disables the timeout.
    pub timeout_secs: u64,
    /// Static headers sent with every request, in addition to `Accept`.
    pub headers: Vec<(String, Zeroizing<String>)>,
}

impl std::fmt::Debug for AccessManagerClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("AccessManagerClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("headers", &header_names)
            .field("header_values", &"[REDACTED]")
            .finish()
    }
}

impl AccessManagerClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            headers: Vec::new(),
        }
    }

    /// Parse `base_url` and build a configuration with defaults.
    pub fn from_url_str(base_url: &str) -> Result<Self, ConfigError> {
        Url::parse(base_url)
            .map(Self::new)
            .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), Zeroizing::new(value.into())));
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `ACCESS_MANAGER_URL` (required)
    /// - `ACCESS_MANAGER_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("ACCESS_MANAGER_URL").map_err(|_| ConfigError::MissingBaseUrl)?;
        let base_url = Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidUrl("ACCESS_MANAGER_URL".to_string(), e.to_string()))?;

        Ok(Self {
            base_url,
            timeout_secs: std::env::var("ACCESS_MANAGER_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            headers: Vec::new(),
        })
    }

    /// The base URL with the API-version prefix appended.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        api_base_url(&self.base_url)
    }
}

/// Append [`API_PATH_PREFIX`] to `base_url`, adding a trailing slash first if
/// the base path lacks one.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUrl`] if the base cannot carry a path
/// (e.g. `mailto:` URLs), or if it has a query or fragment, which joining
/// the prefix would discard.
pub fn api_base_url(base_url: &Url) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl(base_url.to_string(), reason);

    if base_url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    if base_url.query().is_some() || base_url.fragment().is_some() {
        return Err(invalid("base URL must not carry a query or fragment".to_string()));
    }
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(API_PATH_PREFIX).map_err(|e| invalid(e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ACCESS_MANAGER_URL environment variable is required")]
    MissingBaseUrl,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid request header '{0}'")]
    InvalidHeader(String),
    #[error("failed to build HTTP transport: {0}")]
    TransportBuild(String),
}
