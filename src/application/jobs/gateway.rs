use async_trait::async_trait;
use docintel_api_types::TaskStatusResponse;
use thiserror::Error;

use crate::domain::job::{DocumentUpload, JobHandle, SelectionConfig};

/// Everything the submission endpoint needs for one analysis.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub document: DocumentUpload,
    pub context: String,
    pub selection: SelectionConfig,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// The service answered with a non-success status.
    #[error("submission rejected with status {status}")]
    Rejected {
        status: u16,
        /// Server-provided `error` text, when it sent one.
        message: Option<String>,
    },
    #[error("submission transport failure: {0}")]
    Transport(String),
}

impl SubmissionError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            SubmissionError::Rejected { message, .. } => message.as_deref(),
            SubmissionError::Transport(_) => None,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("status query transport failure: {0}")]
    Transport(String),
    #[error("status query rejected with status {status}")]
    Rejected { status: u16 },
    #[error("status response could not be decoded: {0}")]
    Decode(String),
}

/// Remote side of a job: the submission and status endpoints.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    async fn submit(&self, request: SubmissionRequest) -> Result<JobHandle, SubmissionError>;

    async fn status(&self, handle: &JobHandle) -> Result<TaskStatusResponse, StatusError>;
}
