use std::sync::Arc;

use docintel_api_types::TaskStatusResponse;
use serde_json::Value;

use crate::domain::job::ErrorInfo;
use crate::domain::relaxed::is_present;
use crate::domain::result::ResultPayload;

use super::gateway::StatusError;

pub const STATUS_SUCCESS: &str = "SUCCESS";
pub const STATUS_FAILURE: &str = "FAILURE";

const UNKNOWN_FAILURE_DETAIL: &str = "unknown error";

/// What one poll tick decided.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Not terminal yet; keep polling.
    Pending(Option<String>),
    Succeeded(Arc<ResultPayload>),
    Failed(ErrorInfo),
}

impl PollOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollOutcome::Pending(_))
    }
}

/// Map a status query result onto the job lifecycle. Any query failure ends
/// the job; nothing is retried.
pub fn classify(response: Result<TaskStatusResponse, StatusError>) -> PollOutcome {
    let response = match response {
        Ok(response) => response,
        Err(_) => return PollOutcome::Failed(ErrorInfo::polling()),
    };

    let status = response.status.unwrap_or_default();
    if status.eq_ignore_ascii_case(STATUS_SUCCESS) {
        let raw = response.result.unwrap_or(Value::Null);
        PollOutcome::Succeeded(Arc::new(ResultPayload::from_value(raw)))
    } else if status.eq_ignore_ascii_case(STATUS_FAILURE) {
        PollOutcome::Failed(ErrorInfo::job_failure(&failure_detail(response.error.as_ref())))
    } else {
        PollOutcome::Pending((!status.is_empty()).then_some(status))
    }
}

/// `exc_message` when the task recorded one, else the whole error as compact
/// JSON.
fn failure_detail(error: Option<&Value>) -> String {
    let Some(error) = error else {
        return UNKNOWN_FAILURE_DETAIL.to_string();
    };

    match error.get("exc_message") {
        Some(Value::String(message)) if !message.is_empty() => message.clone(),
        Some(message) if is_present(message) => message.to_string(),
        _ => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::ErrorKind;
    use crate::domain::result::ReportVariant;
    use serde_json::json;

    #[test]
    fn success_captures_result_payload() {
        let outcome = classify(Ok(TaskStatusResponse::with_status("SUCCESS")
            .with_result(json!({"analysis": {"summary": "S"}}))));
        let PollOutcome::Succeeded(payload) = outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(payload.variant(), Some(ReportVariant::Resume));
    }

    #[test]
    fn status_comparison_ignores_case() {
        let outcome = classify(Ok(TaskStatusResponse::with_status("success")
            .with_result(json!({"proposal": {"title": "T"}}))));
        assert!(matches!(outcome, PollOutcome::Succeeded(_)));

        let outcome = classify(Ok(TaskStatusResponse::with_status("Failure")
            .with_error(json!({"exc_message": "boom"}))));
        assert!(matches!(outcome, PollOutcome::Failed(_)));
    }

    #[test]
    fn failure_prefers_exc_message() {
        let outcome = classify(Ok(TaskStatusResponse::with_status("FAILURE").with_error(
            json!({"exc_type": "ValueError", "exc_message": "Model timeout"}),
        )));
        assert_eq!(
            outcome,
            PollOutcome::Failed(ErrorInfo::new(
                ErrorKind::JobFailure,
                "Analysis failed: Model timeout"
            ))
        );
    }

    #[test]
    fn failure_without_message_serializes_error() {
        let outcome = classify(Ok(
            TaskStatusResponse::with_status("FAILURE").with_error(json!({"code": 7}))
        ));
        assert_eq!(
            outcome,
            PollOutcome::Failed(ErrorInfo::job_failure(r#"{"code":7}"#))
        );

        let outcome = classify(Ok(
            TaskStatusResponse::with_status("FAILURE").with_error(json!("worker lost"))
        ));
        assert_eq!(
            outcome,
            PollOutcome::Failed(ErrorInfo::job_failure(r#""worker lost""#))
        );
    }

    #[test]
    fn failure_without_error_reports_unknown() {
        let outcome = classify(Ok(TaskStatusResponse::with_status("FAILURE")));
        assert_eq!(
            outcome,
            PollOutcome::Failed(ErrorInfo::job_failure("unknown error"))
        );
    }

    #[test]
    fn other_statuses_keep_polling() {
        for status in ["PENDING", "STARTED", "RETRY", "PROGRESS"] {
            let outcome = classify(Ok(TaskStatusResponse::with_status(status)));
            assert_eq!(outcome, PollOutcome::Pending(Some(status.to_string())));
            assert!(!outcome.is_terminal());
        }
        assert_eq!(
            classify(Ok(TaskStatusResponse::default())),
            PollOutcome::Pending(None)
        );
    }

    #[test]
    fn query_errors_become_polling_failures() {
        for err in [
            StatusError::Transport("connection reset".into()),
            StatusError::Rejected { status: 500 },
            StatusError::Decode("expected value".into()),
        ] {
            let outcome = classify(Err(err));
            assert_eq!(outcome, PollOutcome::Failed(ErrorInfo::polling()));
        }
    }
}
