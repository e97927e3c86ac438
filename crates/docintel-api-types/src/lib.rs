//! Request and response shapes exchanged with the document-analysis service.
//!
//! The service is loose about shapes: every field is optional on the wire and
//! result bodies are left as raw JSON so the client can decode them
//! tolerantly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Catalog endpoint; unauthenticated.
pub const CONFIG_PATH: &str = "api/config/";
/// Multipart submission endpoint.
pub const ANALYZE_PATH: &str = "api/analyze/";
/// Status endpoint prefix; the task id and a trailing slash follow.
pub const TASK_STATUS_PATH: &str = "api/task-status/";

/// Multipart field carrying the document bytes.
pub const FIELD_DOCUMENT: &str = "document";
/// Multipart field carrying the free-form context text.
pub const FIELD_CONTEXT: &str = "ragText";
pub const FIELD_DOCUMENT_TYPE: &str = "doc_type_id";
pub const FIELD_MODEL: &str = "model_id";

/// One selectable option in the service catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Body of `GET api/config/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    #[serde(default)]
    pub document_types: Vec<CatalogEntry>,
    #[serde(default)]
    pub ai_models: Vec<CatalogEntry>,
}

/// Successful body of `POST api/analyze/` (HTTP 202).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeAccepted {
    #[serde(default)]
    pub task_id: Option<String>,
}

/// Error body returned by the service on non-success responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<Value>,
}

impl ApiErrorBody {
    /// The error text when the service sent a non-empty string.
    pub fn message(&self) -> Option<&str> {
        match &self.error {
            Some(Value::String(text)) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Body of `GET api/task-status/{task_id}/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl TaskStatusResponse {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            result: None,
            error: None,
        }
    }

    pub fn with_result(mut self, result: Value) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_error(mut self, error: Value) -> Self {
        self.error = Some(error);
        self
    }
}
