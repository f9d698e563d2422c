//! Template-related data models.

use serde::{Deserialize, Serialize};

/// The field schema of a pass template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFields {
    /// Template name
    pub template_name: String,
    /// Fields the template accepts when issuing or updating a pass
    #[serde(default)]
    pub fields: Vec<TemplateField>,
}

/// A single field in a template's schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateField {
    /// Field name, used as the key when issuing or updating passes
    pub name: String,
    /// Human-readable label shown on the pass
    pub label: Option<String>,
    /// Whether the field must be supplied at issue time
    #[serde(default)]
    pub required: bool,
    /// Value used when the field is omitted at issue time
    pub default_value: Option<String>,
}
