//! Rust client for the PassKit wallet-pass provisioning API.
//!
//! Wraps the JSON-over-HTTPS API behind a typed facade: construct a
//! [`PasskitClient`] once with a credential pair and use its resource
//! clients for the rest of the run.
//!
//! # Quick Start
//!
//! ```rust
//! use passkit::{Credentials, PasskitClient};
//!
//! let creds = Credentials::new("[API_USER]", "[API_SECRET]");
//! let client = PasskitClient::new(creds, None, None, None).unwrap();
//!
//! // Resource clients share one transport:
//! let _templates = client.templates();
//! let _passes = client.passes();
//! ```
//!
//! # Testing
//!
//! The [`testing`] module provides an in-process [`testing::MockPasskitClient`]
//! for code that consumes this crate, and a [`testing::TestRunConfig`] that
//! replaces harness globals with an explicit per-run configuration. Wire-level
//! behavior is tested against an HTTP mock server; see the crate's
//! integration tests.

pub mod client;
pub mod clients;
pub mod credentials;
pub mod error;
pub mod testing;
pub mod transport;
pub mod types;

// Re-exports
pub use client::{PasskitClient, DEFAULT_BASE_URL};
pub use clients::{PassesClient, TemplatesClient};
pub use credentials::Credentials;
pub use error::{ApiError, Error};
pub use transport::{HttpTransport, RetryConfig};
pub use types::{Pass, TemplateField, TemplateFields};
