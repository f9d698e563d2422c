//! PassKit client facade.
//!
//! Provides the primary interface for interacting with the PassKit API.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::{PassesClient, TemplatesClient};
use crate::credentials::Credentials;
use crate::error::Error;
use crate::transport::{HttpTransport, RetryConfig};

/// Default base URL for the PassKit API.
pub const DEFAULT_BASE_URL: &str = "https://api.passkit.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the API base URL.
pub const ENV_BASE_URL: &str = "PASSKIT_BASE_URL";

/// Main client for interacting with the PassKit API.
///
/// Aggregates the resource clients and handles authentication. Construct it
/// once and reuse it; the underlying HTTP connection pool is shared by all
/// resource clients.
///
/// # Example
///
/// ```rust
/// use passkit::{Credentials, PasskitClient};
///
/// let creds = Credentials::new("[API_USER]", "[API_SECRET]");
/// let client = PasskitClient::new(creds, None, None, None).unwrap();
///
/// assert_eq!(client.user(), "[API_USER]");
/// ```
pub struct PasskitClient {
    transport: Arc<HttpTransport>,
    templates: TemplatesClient,
    passes: PassesClient,
}

impl PasskitClient {
    /// Create a new PassKit client.
    ///
    /// # Arguments
    ///
    /// * `credentials` - The credential pair used for basic authentication
    /// * `base_url` - Base URL for API requests (default: <https://api.passkit.com>)
    /// * `timeout` - Request timeout (default: 30 seconds)
    /// * `retry_config` - Configuration for retry behavior (optional)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created. Credential
    /// values are never validated locally; a bad pair surfaces as an
    /// authentication error on the first request.
    pub fn new(
        credentials: Credentials,
        base_url: Option<&str>,
        timeout: Option<Duration>,
        retry_config: Option<RetryConfig>,
    ) -> Result<Self, Error> {
        let base_url = base_url.unwrap_or(DEFAULT_BASE_URL);
        let timeout = timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let transport = Arc::new(HttpTransport::new(
            base_url,
            credentials,
            timeout,
            retry_config,
        )?);

        Ok(Self {
            templates: TemplatesClient::new(Arc::clone(&transport)),
            passes: PassesClient::new(Arc::clone(&transport)),
            transport,
        })
    }

    /// Create a client from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `PASSKIT_API_USER` - The API user identifier (required)
    /// * `PASSKIT_API_SECRET` - The API secret (required)
    /// * `PASSKIT_BASE_URL` - Base URL for API (optional, default: <https://api.passkit.com>)
    ///
    /// # Errors
    ///
    /// Returns an error if a required environment variable is missing.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_env_with_config(None, None)
    }

    /// Create a client from environment variables with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Request timeout (default: 30 seconds)
    /// * `retry_config` - Configuration for retry behavior (optional)
    ///
    /// # Errors
    ///
    /// Returns an error if a required environment variable is missing.
    pub fn from_env_with_config(
        timeout: Option<Duration>,
        retry_config: Option<RetryConfig>,
    ) -> Result<Self, Error> {
        let credentials = Credentials::from_env()?;
        let base_url = env::var(ENV_BASE_URL).ok();

        Self::new(credentials, base_url.as_deref(), timeout, retry_config)
    }

    /// Get the API user identifier.
    #[must_use]
    pub fn user(&self) -> &str {
        self.transport.user()
    }

    /// Get the underlying HTTP transport (for advanced use cases).
    #[must_use]
    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }

    /// Get the templates client.
    #[must_use]
    pub fn templates(&self) -> &TemplatesClient {
        &self.templates
    }

    /// Get the passes client.
    #[must_use]
    pub fn passes(&self) -> &PassesClient {
        &self.passes
    }
}
