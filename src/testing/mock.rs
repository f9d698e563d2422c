//! Mock PassKit client for testing.
//!
//! Provides a `MockPasskitClient` that mimics the real client interface
//! without making any network calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{ApiError, Error};
use crate::types::{Pass, TemplateFields};

/// Record of a method call.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// Method name (e.g., "passes.issue", "templates.list")
    pub method: String,
    /// Arguments passed to the method
    pub args: Vec<String>,
    /// Timestamp of the call
    pub timestamp: DateTime<Utc>,
}

impl MockCall {
    /// Create a new mock call record.
    pub fn new(method: &str, args: Vec<String>) -> Self {
        Self {
            method: method.to_string(),
            args,
            timestamp: Utc::now(),
        }
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub struct MockResponse<T: Clone> {
    /// The data to return
    pub data: Option<T>,
    /// Error code to return (will create an `ApiError::Validation`)
    pub error_code: Option<String>,
    /// Error message to return
    pub error_message: Option<String>,
}

impl<T: Clone> Default for MockResponse<T> {
    fn default() -> Self {
        Self {
            data: None,
            error_code: None,
            error_message: None,
        }
    }
}

impl<T: Clone> MockResponse<T> {
    /// Create a new mock response with data.
    pub fn with_data(data: T) -> Self {
        Self {
            data: Some(data),
            error_code: None,
            error_message: None,
        }
    }

    /// Create a new mock response with an error.
    pub fn with_error(code: &str, message: &str) -> Self {
        Self {
            data: None,
            error_code: Some(code.to_string()),
            error_message: Some(message.to_string()),
        }
    }

    /// Get the result, returning either the configured data or error.
    fn get_result(&self, default: T) -> Result<T, Error> {
        if let (Some(code), Some(message)) = (&self.error_code, &self.error_message) {
            return Err(Error::Api(ApiError::Validation {
                code: code.clone(),
                message: message.clone(),
                request_id: None,
            }));
        }
        Ok(self.data.clone().unwrap_or(default))
    }
}

/// Internal state for the mock client.
struct MockClientState {
    user: String,
    calls: Vec<MockCall>,
}

impl MockClientState {
    fn new(user: String) -> Self {
        Self {
            user,
            calls: Vec::new(),
        }
    }

    fn record_call(&mut self, method: &str, args: Vec<String>) {
        self.calls.push(MockCall::new(method, args));
    }
}

/// Mock templates client for testing.
pub struct MockTemplatesClient {
    mock: Arc<Mutex<MockClientState>>,
    list_response: Arc<Mutex<MockResponse<Vec<String>>>>,
    field_names_response: Arc<Mutex<MockResponse<TemplateFields>>>,
}

impl MockTemplatesClient {
    fn new(mock: Arc<Mutex<MockClientState>>) -> Self {
        Self {
            mock,
            list_response: Arc::new(Mutex::new(MockResponse::default())),
            field_names_response: Arc::new(Mutex::new(MockResponse::default())),
        }
    }

    /// Configure the response for list() calls.
    pub fn configure_list(&self, response: MockResponse<Vec<String>>) {
        *self.list_response.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for field_names() calls.
    pub fn configure_field_names(&self, response: MockResponse<TemplateFields>) {
        *self
            .field_names_response
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Mock list method.
    pub fn list(&self) -> Result<Vec<String>, Error> {
        self.mock
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .record_call("templates.list", vec![]);

        self.list_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(vec![])
    }

    /// Mock field_names method.
    pub fn field_names(&self, template: &str) -> Result<TemplateFields, Error> {
        self.mock
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .record_call("templates.field_names", vec![template.to_string()]);

        let default = TemplateFields {
            template_name: template.to_string(),
            fields: vec![],
        };

        self.field_names_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(default)
    }
}

/// Mock passes client for testing.
pub struct MockPassesClient {
    mock: Arc<Mutex<MockClientState>>,
    issue_response: Arc<Mutex<MockResponse<Pass>>>,
    get_response: Arc<Mutex<MockResponse<Pass>>>,
    update_response: Arc<Mutex<MockResponse<Pass>>>,
    invalidate_response: Arc<Mutex<MockResponse<Pass>>>,
}

impl MockPassesClient {
    fn new(mock: Arc<Mutex<MockClientState>>) -> Self {
        Self {
            mock,
            issue_response: Arc::new(Mutex::new(MockResponse::default())),
            get_response: Arc::new(Mutex::new(MockResponse::default())),
            update_response: Arc::new(Mutex::new(MockResponse::default())),
            invalidate_response: Arc::new(Mutex::new(MockResponse::default())),
        }
    }

    /// Configure the response for issue() calls.
    pub fn configure_issue(&self, response: MockResponse<Pass>) {
        *self.issue_response.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for get() calls.
    pub fn configure_get(&self, response: MockResponse<Pass>) {
        *self.get_response.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for update() calls.
    pub fn configure_update(&self, response: MockResponse<Pass>) {
        *self.update_response.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for invalidate() calls.
    pub fn configure_invalidate(&self, response: MockResponse<Pass>) {
        *self
            .invalidate_response
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Mock issue method.
    pub fn issue(&self, template: &str, fields: HashMap<String, Value>) -> Result<Pass, Error> {
        self.mock
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .record_call(
                "passes.issue",
                vec![template.to_string(), format!("{fields:?}")],
            );

        let default = Pass {
            pass_id: "mock-pass-id".to_string(),
            template_name: template.to_string(),
            serial_number: "mock-serial".to_string(),
            url: "https://pass.example.com/p/mock-pass-id".to_string(),
            status: "issued".to_string(),
            fields,
            created_at: Utc::now(),
            invalidated_at: None,
        };

        self.issue_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(default)
    }

    /// Mock get method.
    pub fn get(&self, pass_id: &str) -> Result<Pass, Error> {
        self.mock
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .record_call("passes.get", vec![pass_id.to_string()]);

        let default = Pass {
            pass_id: pass_id.to_string(),
            template_name: "mock-template".to_string(),
            serial_number: "mock-serial".to_string(),
            url: format!("https://pass.example.com/p/{pass_id}"),
            status: "issued".to_string(),
            fields: HashMap::new(),
            created_at: Utc::now(),
            invalidated_at: None,
        };

        self.get_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(default)
    }

    /// Mock update method.
    pub fn update(&self, pass_id: &str, fields: HashMap<String, Value>) -> Result<Pass, Error> {
        self.mock
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .record_call(
                "passes.update",
                vec![pass_id.to_string(), format!("{fields:?}")],
            );

        let default = Pass {
            pass_id: pass_id.to_string(),
            template_name: "mock-template".to_string(),
            serial_number: "mock-serial".to_string(),
            url: format!("https://pass.example.com/p/{pass_id}"),
            status: "issued".to_string(),
            fields,
            created_at: Utc::now(),
            invalidated_at: None,
        };

        self.update_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(default)
    }

    /// Mock invalidate method.
    pub fn invalidate(&self, pass_id: &str) -> Result<Pass, Error> {
        self.mock
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .record_call("passes.invalidate", vec![pass_id.to_string()]);

        let default = Pass {
            pass_id: pass_id.to_string(),
            template_name: "mock-template".to_string(),
            serial_number: "mock-serial".to_string(),
            url: format!("https://pass.example.com/p/{pass_id}"),
            status: "invalidated".to_string(),
            fields: HashMap::new(),
            created_at: Utc::now(),
            invalidated_at: Some(Utc::now()),
        };

        self.invalidate_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(default)
    }
}

/// Mock PassKit client for testing.
///
/// Provides the same surface as `PasskitClient` but returns configurable
/// mock responses instead of making real API calls.
///
/// # Example
///
/// ```rust
/// use passkit::testing::{MockPasskitClient, MockResponse};
///
/// let mock = MockPasskitClient::new("test-user");
///
/// mock.templates().configure_list(MockResponse::with_data(vec![
///     "coffee-card".to_string(),
/// ]));
///
/// let templates = mock.templates().list().unwrap();
/// assert_eq!(templates, vec!["coffee-card".to_string()]);
///
/// assert!(mock.was_called("templates.list"));
/// assert_eq!(mock.call_count("templates.list"), 1);
/// ```
pub struct MockPasskitClient {
    state: Arc<Mutex<MockClientState>>,
    templates: MockTemplatesClient,
    passes: MockPassesClient,
}

impl MockPasskitClient {
    /// Create a new mock client.
    ///
    /// # Arguments
    ///
    /// * `user` - API user identifier to report from `user()`
    pub fn new(user: &str) -> Self {
        let state = Arc::new(Mutex::new(MockClientState::new(user.to_string())));

        Self {
            templates: MockTemplatesClient::new(Arc::clone(&state)),
            passes: MockPassesClient::new(Arc::clone(&state)),
            state,
        }
    }

    /// Get the API user identifier.
    #[must_use]
    pub fn user(&self) -> String {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .user
            .clone()
    }

    /// Get the templates client.
    #[must_use]
    pub fn templates(&self) -> &MockTemplatesClient {
        &self.templates
    }

    /// Get the passes client.
    #[must_use]
    pub fn passes(&self) -> &MockPassesClient {
        &self.passes
    }

    /// Check if a method was called.
    ///
    /// # Arguments
    ///
    /// * `method` - Method name (e.g., "passes.issue", "templates.list")
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .iter()
            .any(|call| call.method == method)
    }

    /// Get the number of times a method was called.
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .iter()
            .filter(|call| call.method == method)
            .count()
    }

    /// Get recorded calls, optionally filtered by method.
    #[must_use]
    pub fn get_calls(&self, method: Option<&str>) -> Vec<MockCall> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match method {
            Some(m) => state
                .calls
                .iter()
                .filter(|call| call.method == m)
                .cloned()
                .collect(),
            None => state.calls.clone(),
        }
    }

    /// Reset all recorded calls.
    pub fn reset(&self) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clear();
    }
}
