//! Client configuration types and environment resolution.
//!
//! All process-environment reads live here, in two functions called once at
//! construction; nothing else in the crate touches the environment.

use std::time::Duration;

/// Default production endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.spyglass.ai";

/// Environment variable holding the API key fallback.
pub const API_KEY_ENV: &str = "SPYGLASS_API_KEY";

/// Environment variable holding the base URL fallback.
pub const BASE_URL_ENV: &str = "SPYGLASS_BASE_URL";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout duration.
    pub timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
        }
    }
}

/// Resolve the API key: explicit value, then [`API_KEY_ENV`], then empty.
///
/// A missing key yields an empty credential rather than an error; the
/// server rejects the unauthenticated request and the caller sees the
/// structured 401.
pub(crate) fn resolve_api_key(explicit: Option<String>) -> String {
    explicit
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .unwrap_or_default()
}

/// Resolve the base URL: explicit value, then [`BASE_URL_ENV`], then
/// [`DEFAULT_BASE_URL`]. Trailing slashes are trimmed so that paths (which
/// always start with `/`) concatenate cleanly.
pub(crate) fn resolve_base_url(explicit: Option<String>) -> String {
    explicit
        .or_else(|| std::env::var(BASE_URL_ENV).ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}
