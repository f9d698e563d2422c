//! Passes resource client.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Error;
use crate::transport::HttpTransport;
use crate::types::Pass;

/// Client for pass-related operations.
pub struct PassesClient {
    transport: Arc<HttpTransport>,
}

impl PassesClient {
    /// Create a new passes client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Issue a new pass from a template.
    ///
    /// # Arguments
    ///
    /// * `template` - The template name to issue from
    /// * `fields` - Field values for the new pass; fields the template marks
    ///   required must be present
    ///
    /// # Returns
    ///
    /// The issued pass with its pass_id, serial number, and distribution URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is not found or a required field is
    /// missing.
    pub async fn issue(
        &self,
        template: &str,
        fields: HashMap<String, Value>,
    ) -> Result<Pass, Error> {
        let body = serde_json::json!({
            "template": template,
            "fields": fields,
        });

        let response: Value = self
            .transport
            .request("POST", "/v1/passes", Some(&body))
            .await?;

        let data = response
            .get("data")
            .ok_or_else(|| Error::Http("Missing data in response".to_string()))?;

        serde_json::from_value(data.clone()).map_err(Error::from)
    }

    /// Fetch an issued pass.
    ///
    /// # Arguments
    ///
    /// * `pass_id` - The unique pass identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the pass is not found.
    pub async fn get(&self, pass_id: &str) -> Result<Pass, Error> {
        let response: Value = self
            .transport
            .request::<Value>("GET", &format!("/v1/passes/{pass_id}"), None::<&()>)
            .await?;

        let data = response
            .get("data")
            .ok_or_else(|| Error::Http("Missing data in response".to_string()))?;

        serde_json::from_value(data.clone()).map_err(Error::from)
    }

    /// Push new field values to an issued pass.
    ///
    /// Only the supplied fields change; omitted fields keep their current
    /// values.
    ///
    /// # Arguments
    ///
    /// * `pass_id` - The unique pass identifier
    /// * `fields` - Field values to update
    ///
    /// # Returns
    ///
    /// The pass with its updated field values.
    ///
    /// # Errors
    ///
    /// Returns an error if the pass is not found or has been invalidated.
    pub async fn update(
        &self,
        pass_id: &str,
        fields: HashMap<String, Value>,
    ) -> Result<Pass, Error> {
        let body = serde_json::json!({ "fields": fields });

        let response: Value = self
            .transport
            .request("PUT", &format!("/v1/passes/{pass_id}"), Some(&body))
            .await?;

        let data = response
            .get("data")
            .ok_or_else(|| Error::Http("Missing data in response".to_string()))?;

        serde_json::from_value(data.clone()).map_err(Error::from)
    }

    /// Permanently invalidate an issued pass.
    ///
    /// Invalidation cannot be undone; further updates to the pass fail with
    /// a conflict error.
    ///
    /// # Arguments
    ///
    /// * `pass_id` - The unique pass identifier
    ///
    /// # Returns
    ///
    /// The pass with status "invalidated".
    ///
    /// # Errors
    ///
    /// Returns an error if the pass is not found.
    pub async fn invalidate(&self, pass_id: &str) -> Result<Pass, Error> {
        let response: Value = self
            .transport
            .request::<Value>(
                "POST",
                &format!("/v1/passes/{pass_id}/invalidate"),
                None::<&()>,
            )
            .await?;

        let data = response
            .get("data")
            .ok_or_else(|| Error::Http("Missing data in response".to_string()))?;

        serde_json::from_value(data.clone()).map_err(Error::from)
    }
}
