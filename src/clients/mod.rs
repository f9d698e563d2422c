//! Resource clients for the PassKit API.
//!
//! Each resource gets its own client that shares the HTTP transport.

mod passes;
mod templates;

pub use passes::PassesClient;
pub use templates::TemplatesClient;
