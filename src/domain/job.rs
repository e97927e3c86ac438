//! Job lifecycle model observed by the client.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

use super::result::ResultPayload;

pub const DOCUMENT_REQUIRED_MESSAGE: &str = "Please select a document to analyze.";
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to start analysis.";
pub const POLLING_FAILED_MESSAGE: &str = "Polling failed: Could not check task status.";

/// Opaque identifier of a job executing on the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a failure was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required input missing; caught before any network call.
    Validation,
    /// Transport failure or non-success response while submitting.
    Submission,
    /// Transport or decode failure while querying job status.
    Polling,
    /// The service reported the job as failed.
    JobFailure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Submission => "submission",
            ErrorKind::Polling => "polling",
            ErrorKind::JobFailure => "job_failure",
        }
    }
}

/// User-facing failure description. The message is shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn document_required() -> Self {
        Self::new(ErrorKind::Validation, DOCUMENT_REQUIRED_MESSAGE)
    }

    pub fn submission(message: Option<&str>) -> Self {
        Self::new(
            ErrorKind::Submission,
            message.unwrap_or(SUBMISSION_FAILED_MESSAGE),
        )
    }

    pub fn polling() -> Self {
        Self::new(ErrorKind::Polling, POLLING_FAILED_MESSAGE)
    }

    pub fn polling_exhausted(attempts: u32) -> Self {
        Self::new(
            ErrorKind::Polling,
            format!("Polling failed: Analysis did not complete after {attempts} status checks."),
        )
    }

    pub fn job_failure(detail: &str) -> Self {
        Self::new(ErrorKind::JobFailure, format!("Analysis failed: {detail}"))
    }
}

/// Lifecycle of the single job tracked by a controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Submitting,
    Polling(JobHandle),
    Succeeded(Arc<ResultPayload>),
    Failed(ErrorInfo),
}

impl JobState {
    /// Stable label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            JobState::Idle => "idle",
            JobState::Submitting => "submitting",
            JobState::Polling(_) => "polling",
            JobState::Succeeded(_) => "succeeded",
            JobState::Failed(_) => "failed",
        }
    }

    /// A job is in flight while it is being submitted or polled.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, JobState::Submitting | JobState::Polling(_))
    }

    pub fn handle(&self) -> Option<&JobHandle> {
        match self {
            JobState::Polling(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&Arc<ResultPayload>> {
        match self {
            JobState::Succeeded(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            JobState::Failed(info) => Some(info),
            _ => None,
        }
    }
}

/// Catalog choices sent along with a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionConfig {
    pub document_type_id: String,
    pub model_id: String,
}

impl SelectionConfig {
    pub fn new(document_type_id: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            document_type_id: document_type_id.into(),
            model_id: model_id.into(),
        }
    }
}

/// Document bytes plus the metadata the upload needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl DocumentUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}
