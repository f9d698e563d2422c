//! Pass-related data models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An issued wallet pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pass {
    /// Unique pass identifier
    pub pass_id: String,
    /// Name of the template the pass was issued from
    pub template_name: String,
    /// Serial number embedded in the pass bundle
    pub serial_number: String,
    /// Distribution URL for the pass
    pub url: String,
    /// Status: "issued" or "invalidated"
    pub status: String,
    /// Current field values
    #[serde(default)]
    pub fields: HashMap<String, Value>,
    /// When the pass was issued
    pub created_at: DateTime<Utc>,
    /// When the pass was invalidated, if it has been
    pub invalidated_at: Option<DateTime<Utc>>,
}

impl Pass {
    /// Check whether the pass is still valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.status == "issued"
    }
}
