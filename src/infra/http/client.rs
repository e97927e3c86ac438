use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use docintel_api_types::{
    ANALYZE_PATH, AnalyzeAccepted, ApiErrorBody, CONFIG_PATH, ConfigResponse, FIELD_CONTEXT,
    FIELD_DOCUMENT, FIELD_DOCUMENT_TYPE, FIELD_MODEL, TASK_STATUS_PATH, TaskStatusResponse,
};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::jobs::{AnalysisGateway, StatusError, SubmissionError, SubmissionRequest};
use crate::domain::job::JobHandle;
use crate::infra::credentials::CredentialProvider;
use crate::infra::error::InfraError;

/// Connection to the analysis service: base URL, HTTP client and the
/// optional credential source for authenticated endpoints.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credentials: Option<Arc<dyn CredentialProvider>>,
    ) -> Result<Self, InfraError> {
        let mut base = Url::parse(base_url)
            .map_err(|err| InfraError::configuration(format!("invalid base URL: {err}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()
            .map_err(|err| InfraError::http(err.to_string()))?;
        Ok(Self {
            client,
            base,
            credentials,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("docintel/", env!("CARGO_PKG_VERSION"))
    }

    pub fn url(&self, path: &str) -> Result<Url, InfraError> {
        self.base
            .join(path)
            .map_err(|err| InfraError::configuration(format!("invalid URL `{path}`: {err}")))
    }

    /// `api/task-status/{task_id}/`, with the id escaped as one path segment.
    pub fn task_status_url(&self, task_id: &str) -> Result<Url, InfraError> {
        let mut url = self.url(TASK_STATUS_PATH)?;
        url.path_segments_mut()
            .map_err(|_| InfraError::configuration("base URL cannot carry a path"))?
            .pop_if_empty()
            .push(task_id)
            .push("");
        Ok(url)
    }

    pub fn auth_header(&self) -> Result<HeaderValue, InfraError> {
        let provider = self
            .credentials
            .as_ref()
            .ok_or_else(|| InfraError::credentials("this command requires a bearer token"))?;
        let token = provider.bearer_token()?;
        HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|err| InfraError::credentials(format!("token is not a valid header: {err}")))
    }

    /// `GET api/config/`. The catalog does not require credentials.
    pub async fn fetch_catalog(&self) -> Result<ConfigResponse, InfraError> {
        let url = self.url(CONFIG_PATH)?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| InfraError::http(err.to_string()))?;
        Self::handle(resp).await
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, InfraError> {
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| InfraError::http(err.to_string()))?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            return Err(InfraError::http(format!("status {status} body {text}")));
        }
        serde_json::from_slice(&bytes)
            .map_err(|err| InfraError::http(format!("failed to parse body: {err}")))
    }
}

/// [`AnalysisGateway`] backed by the service's HTTP endpoints.
#[derive(Clone)]
pub struct HttpAnalysisGateway {
    api: ApiClient,
}

impl HttpAnalysisGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn submission_transport(err: impl std::fmt::Display) -> SubmissionError {
    SubmissionError::Transport(err.to_string())
}

fn status_transport(err: impl std::fmt::Display) -> StatusError {
    StatusError::Transport(err.to_string())
}

#[async_trait]
impl AnalysisGateway for HttpAnalysisGateway {
    async fn submit(&self, request: SubmissionRequest) -> Result<JobHandle, SubmissionError> {
        let url = self.api.url(ANALYZE_PATH).map_err(submission_transport)?;
        let auth = self.api.auth_header().map_err(submission_transport)?;

        let SubmissionRequest {
            document,
            context,
            selection,
        } = request;
        let part = Part::bytes(document.bytes.to_vec())
            .file_name(document.file_name)
            .mime_str(&document.content_type)
            .map_err(submission_transport)?;
        let form = Form::new()
            .part(FIELD_DOCUMENT, part)
            .text(FIELD_CONTEXT, context)
            .text(FIELD_DOCUMENT_TYPE, selection.document_type_id)
            .text(FIELD_MODEL, selection.model_id);

        let resp = self
            .api
            .client
            .post(url)
            .header(AUTHORIZATION, auth)
            .multipart(form)
            .send()
            .await
            .map_err(submission_transport)?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(submission_transport)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message().map(str::to_string));
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let accepted: AnalyzeAccepted = serde_json::from_slice(&bytes)
            .map_err(|err| submission_transport(format!("failed to parse body: {err}")))?;
        debug!(
            target = "infra::http::client",
            status = status.as_u16(),
            task_id = accepted.task_id.as_deref().unwrap_or(""),
            "analysis accepted"
        );
        accepted
            .task_id
            .filter(|task_id| !task_id.is_empty())
            .map(JobHandle::new)
            .ok_or_else(|| submission_transport("response carried no task_id"))
    }

    async fn status(&self, handle: &JobHandle) -> Result<TaskStatusResponse, StatusError> {
        let url = self
            .api
            .task_status_url(handle.as_str())
            .map_err(status_transport)?;
        let auth = self.api.auth_header().map_err(status_transport)?;

        let resp = self
            .api
            .client
            .get(url)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(status_transport)?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(status_transport)?;

        if !status.is_success() {
            return Err(StatusError::Rejected {
                status: status.as_u16(),
            });
        }
        serde_json::from_slice(&bytes).map_err(|err| StatusError::Decode(err.to_string()))
    }
}
