//! Testing utilities for the PassKit client.
//!
//! Provides an in-process mock client for unit-testing code that consumes
//! this crate, plus the explicit test-run configuration that replaces
//! process-wide harness globals.

mod config;
mod mock;

pub use config::TestRunConfig;
pub use mock::{MockCall, MockPasskitClient, MockResponse};
