//! Templates resource client.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Error;
use crate::transport::HttpTransport;
use crate::types::TemplateFields;

/// Client for template-related operations.
pub struct TemplatesClient {
    transport: Arc<HttpTransport>,
}

impl TemplatesClient {
    /// Create a new templates client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// List the template names owned by the authenticated account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self) -> Result<Vec<String>, Error> {
        let response: Value = self
            .transport
            .request::<Value>("GET", "/v1/templates", None::<&()>)
            .await?;

        let data = response
            .get("data")
            .ok_or_else(|| Error::Http("Missing data in response".to_string()))?;

        let templates = data
            .get("templates")
            .ok_or_else(|| Error::Http("Missing templates in response".to_string()))?;

        serde_json::from_value(templates.clone()).map_err(Error::from)
    }

    /// Get the field schema of a template.
    ///
    /// # Arguments
    ///
    /// * `template` - The template name
    ///
    /// # Returns
    ///
    /// The template's field names, labels, and defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is not found.
    pub async fn field_names(&self, template: &str) -> Result<TemplateFields, Error> {
        let response: Value = self
            .transport
            .request::<Value>(
                "GET",
                &format!("/v1/templates/{template}/fieldnames"),
                None::<&()>,
            )
            .await?;

        let data = response
            .get("data")
            .ok_or_else(|| Error::Http("Missing data in response".to_string()))?;

        serde_json::from_value(data.clone()).map_err(Error::from)
    }
}
