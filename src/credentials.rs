//! API credential pair.

use std::env;
use std::fmt;

use crate::error::Error;

/// Environment variable holding the API user identifier.
pub const ENV_API_USER: &str = "PASSKIT_API_USER";

/// Environment variable holding the API secret.
pub const ENV_API_SECRET: &str = "PASSKIT_API_SECRET";

/// The identifier/secret pair used to authenticate against the PassKit API.
///
/// Immutable once constructed. The secret is redacted from `Debug` output
/// so credentials can appear in logs without leaking.
#[derive(Clone)]
pub struct Credentials {
    user: String,
    secret: String,
}

impl Credentials {
    /// Create a credential pair from explicit values.
    ///
    /// No validation is performed; the values are opaque to the client and
    /// only interpreted by the remote service.
    pub fn new(user: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            secret: secret.into(),
        }
    }

    /// Load the credential pair from the environment.
    ///
    /// Reads `PASSKIT_API_USER` and `PASSKIT_API_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if either variable is not set.
    pub fn from_env() -> Result<Self, Error> {
        let user = env::var(ENV_API_USER).map_err(|_| {
            Error::Configuration(format!("{ENV_API_USER} environment variable not set"))
        })?;
        let secret = env::var(ENV_API_SECRET).map_err(|_| {
            Error::Configuration(format!("{ENV_API_SECRET} environment variable not set"))
        })?;

        Ok(Self { user, secret })
    }

    /// Get the API user identifier.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Get the API secret.
    ///
    /// Only the transport needs this; it is not re-exported from the crate
    /// root.
    #[must_use]
    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("secret", &"<redacted>")
            .finish()
    }
}
