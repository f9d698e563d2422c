//! Explicit test-run configuration.

use std::env;

use crate::credentials::Credentials;

/// Environment variable gating tests that hit a live deployment.
pub const ENV_LIVE_TESTS: &str = "PASSKIT_LIVE_TESTS";

/// Environment variable gating the extended (slower) test suite.
pub const ENV_FULL_SUITE: &str = "PASSKIT_FULL_SUITE";

/// Configuration for a test run, constructed once and passed explicitly to
/// test setup instead of living in process-wide globals.
///
/// Both flags default to off: a plain test run is fully mocked and runs the
/// fast suite only.
#[derive(Debug)]
pub struct TestRunConfig {
    /// Credential pair to use, when the environment provides one.
    pub credentials: Option<Credentials>,
    /// Run tests against a live deployment instead of mocks.
    pub live_server: bool,
    /// Run the extended suite in addition to the fast one.
    pub full_suite: bool,
}

impl TestRunConfig {
    /// Build the configuration from the environment.
    ///
    /// Reads `PASSKIT_LIVE_TESTS` and `PASSKIT_FULL_SUITE` (enabled when set
    /// to `1`) and picks up credentials from `PASSKIT_API_USER` /
    /// `PASSKIT_API_SECRET` when both are present.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            credentials: Credentials::from_env().ok(),
            live_server: flag_enabled(ENV_LIVE_TESTS),
            full_suite: flag_enabled(ENV_FULL_SUITE),
        }
    }

    /// Build a fully mocked configuration with explicit credentials.
    ///
    /// This is the default shape for CI runs: no live server, fast suite.
    #[must_use]
    pub fn mocked(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
            live_server: false,
            full_suite: false,
        }
    }
}

fn flag_enabled(name: &str) -> bool {
    env::var(name).map_or(false, |v| v == "1")
}
