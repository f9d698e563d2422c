//! Data models for PassKit API responses.

mod passes;
mod templates;

pub use passes::Pass;
pub use templates::{TemplateField, TemplateFields};
