//! HTTP transport for the PassKit client.
//!
//! Handles HTTPS communication with basic authentication, automatic retry
//! with exponential backoff, and error response parsing.

use std::time::Duration;

use rand::thread_rng;
use rand::Rng;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::credentials::Credentials;
use crate::error::{ApiError, Error};

/// Configuration for automatic retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base backoff factor for exponential backoff
    pub backoff_factor: f64,
    /// Status codes that trigger retry
    pub retry_on: Vec<u16>,
    /// Whether to respect Retry-After header
    pub respect_retry_after: bool,
    /// Maximum backoff time in seconds
    pub max_backoff: f64,
    /// Jitter factor (0.1 = ±10%)
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 2.0,
            retry_on: vec![429, 500, 502, 503],
            respect_retry_after: true,
            max_backoff: 60.0,
            jitter: 0.1,
        }
    }
}

/// HTTP transport layer with basic authentication and retry logic.
///
/// Handles:
/// - Basic auth with the credential pair on every request
/// - Exponential backoff with jitter for retries
/// - Retry-After header respect for rate limiting
/// - Error response parsing into typed errors
pub struct HttpTransport {
    base_url: String,
    credentials: Credentials,
    client: Client,
    retry_config: RetryConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for API requests (e.g., "<https://api.passkit.com>")
    /// * `credentials` - The credential pair used for basic authentication
    /// * `timeout` - Request timeout
    /// * `retry_config` - Configuration for retry behavior
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        timeout: Duration,
        retry_config: Option<RetryConfig>,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            client,
            retry_config: retry_config.unwrap_or_default(),
        })
    }

    /// Make an authenticated request with automatic retry.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method (GET, POST, PUT, DELETE)
    /// * `path` - API path (e.g., "/v1/passes")
    /// * `body` - JSON request body (for POST/PUT)
    ///
    /// # Returns
    ///
    /// Parsed JSON response
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on API errors, `Error::Http` on transport
    /// failures.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> Result<T, Error> {
        self.execute_with_retry(|| async {
            let url = format!("{}{}", self.base_url, path);
            let mut request = match method.to_uppercase().as_str() {
                "POST" => self.client.post(&url),
                "PUT" => self.client.put(&url),
                "DELETE" => self.client.delete(&url),
                "PATCH" => self.client.patch(&url),
                _ => self.client.get(&url),
            };

            request =
                request.basic_auth(self.credentials.user(), Some(self.credentials.secret()));

            if let Some(b) = body {
                request = request.header("Content-Type", "application/json").json(b);
            }

            debug!(method, path, "sending request");

            let response = request
                .send()
                .await
                .map_err(|e| Error::Http(e.to_string()))?;

            Ok(response)
        })
        .await
    }

    /// Execute a request with automatic retry on retryable errors.
    async fn execute_with_retry<F, Fut, T>(&self, request_fn: F) -> Result<T, Error>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<Response, Error>>,
        T: DeserializeOwned,
    {
        let mut last_error: Option<Error> = None;

        for attempt in 0..=self.retry_config.max_retries {
            match request_fn().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let json: T = response
                            .json()
                            .await
                            .map_err(|e| Error::Http(format!("Failed to parse response: {e}")))?;
                        return Ok(json);
                    }

                    // Parse error response
                    let error = self.parse_error_response(response).await;

                    // Check if we should retry
                    if !self.should_retry(status.as_u16(), attempt) {
                        return Err(error);
                    }

                    // Get retry-after header if present
                    let retry_after =
                        if let Error::Api(ApiError::RateLimited { retry_after, .. }) = &error {
                            Some(*retry_after)
                        } else {
                            None
                        };

                    last_error = Some(error);

                    // Calculate backoff time
                    let wait_time = self.get_backoff_time(attempt, retry_after);
                    warn!(
                        status = status.as_u16(),
                        attempt,
                        wait_secs = wait_time,
                        "retrying request"
                    );
                    tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt >= self.retry_config.max_retries {
                        return Err(e);
                    }

                    last_error = Some(e);
                    let wait_time = self.get_backoff_time(attempt, None);
                    warn!(attempt, wait_secs = wait_time, "retrying after network error");
                    tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
                }
            }
        }

        // Should not reach here, but just in case
        Err(last_error.unwrap_or_else(|| {
            Error::Api(ApiError::Server {
                code: "MAX_RETRIES_EXCEEDED".to_string(),
                message: "Request failed after maximum retries".to_string(),
                request_id: None,
            })
        }))
    }

    /// Determine if a request should be retried.
    fn should_retry(&self, status_code: u16, attempt: u32) -> bool {
        if attempt >= self.retry_config.max_retries {
            return false;
        }

        self.retry_config.retry_on.contains(&status_code)
    }

    /// Calculate backoff time for retry.
    ///
    /// Uses exponential backoff with jitter, respecting Retry-After header
    /// if present.
    fn get_backoff_time(&self, attempt: u32, retry_after: Option<u32>) -> f64 {
        // If Retry-After header is present and we should respect it
        if let Some(ra) = retry_after {
            if self.retry_config.respect_retry_after {
                return f64::from(ra);
            }
        }

        // Exponential backoff: backoff_factor ^ attempt
        let base_wait = self.retry_config.backoff_factor.powi(attempt as i32);

        // Apply jitter (±jitter%); the range is empty when base_wait or the
        // jitter factor is zero, and sampling an empty range panics
        let jitter_range = base_wait * self.retry_config.jitter;
        let wait_time = if jitter_range > 0.0 {
            let mut rng = thread_rng();
            base_wait + rng.gen_range(-jitter_range..jitter_range)
        } else {
            base_wait
        };

        // A jitter factor above 1.0 can push the wait below zero
        wait_time.clamp(0.0, self.retry_config.max_backoff)
    }

    /// Parse an error response into a typed error.
    async fn parse_error_response(&self, response: Response) -> Error {
        let status = response.status();
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        let data: Value = response
            .json()
            .await
            .unwrap_or_else(|_| serde_json::json!({}));

        let empty_obj = serde_json::json!({});
        let error = data.get("error").unwrap_or(&empty_obj);
        let code = error
            .get("code")
            .and_then(|v| v.as_str())
            .unwrap_or("UNKNOWN_ERROR")
            .to_string();
        let message = error
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or(&format!("HTTP {}", status.as_u16()))
            .to_string();
        let request_id = data
            .get("meta")
            .and_then(|m| m.get("requestId"))
            .and_then(|v| v.as_str())
            .map(String::from);

        debug!(status = status.as_u16(), code, "parsed error response");

        let api_error = match status {
            StatusCode::UNAUTHORIZED => ApiError::Authentication {
                code,
                message,
                request_id,
            },
            StatusCode::FORBIDDEN => ApiError::Authorization {
                code,
                message,
                request_id,
            },
            StatusCode::NOT_FOUND => ApiError::NotFound {
                code,
                message,
                request_id,
            },
            StatusCode::CONFLICT => ApiError::Conflict {
                code,
                message,
                request_id,
            },
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
                code,
                message,
                retry_after: retry_after.unwrap_or(60),
                request_id,
            },
            s if s.is_server_error() => ApiError::Server {
                code,
                message,
                request_id,
            },
            _ => ApiError::Validation {
                code,
                message,
                request_id,
            },
        };

        Error::Api(api_error)
    }

    /// Get the API user identifier.
    #[must_use]
    pub fn user(&self) -> &str {
        self.credentials.user()
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
