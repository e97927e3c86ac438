//! Lifecycle controller for a single analysis job.
//!
//! The controller owns the job state and the background poll task. Every
//! submission and every `cancel()` bumps an epoch counter; work started under
//! an older epoch may finish, but its transitions are discarded.

use std::sync::{Arc, Mutex};

use metrics::counter;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

use crate::config::PollingSettings;
use crate::domain::job::{DocumentUpload, ErrorInfo, JobHandle, JobState, SelectionConfig};
use crate::infra::lock::mutex_lock;

use super::gateway::{AnalysisGateway, SubmissionRequest};
use super::outcome::{PollOutcome, classify};

const LOCK_TARGET: &str = "application::jobs::controller";

/// Callback invoked with the new state after every transition.
///
/// Observers run while the controller's state lock is held, in registration
/// order. They must not call back into the controller.
pub type StatusObserver = Arc<dyn Fn(&JobState) + Send + Sync>;

/// Drives one job at a time from submission to a terminal state.
pub struct JobController {
    shared: Arc<Shared>,
}

struct Shared {
    gateway: Arc<dyn AnalysisGateway>,
    polling: PollingSettings,
    inner: Mutex<Inner>,
    state_tx: watch::Sender<JobState>,
}

struct Inner {
    state: JobState,
    epoch: u64,
    poller: Option<JoinHandle<()>>,
    observers: Vec<StatusObserver>,
}

impl JobController {
    pub fn new(gateway: Arc<dyn AnalysisGateway>, polling: PollingSettings) -> Self {
        let (state_tx, _) = watch::channel(JobState::Idle);
        Self {
            shared: Arc::new(Shared {
                gateway,
                polling,
                inner: Mutex::new(Inner {
                    state: JobState::Idle,
                    epoch: 0,
                    poller: None,
                    observers: Vec::new(),
                }),
                state_tx,
            }),
        }
    }

    /// Start a new analysis, superseding any job already in flight.
    ///
    /// Returns the job handle once the service has accepted the document.
    /// Failures are recorded in the controller state as well as returned.
    pub async fn submit(
        &self,
        document: Option<DocumentUpload>,
        context: impl Into<String>,
        selection: SelectionConfig,
    ) -> Result<JobHandle, ErrorInfo> {
        let (epoch, document) = {
            let mut inner = mutex_lock(&self.shared.inner, LOCK_TARGET, "submit");
            let epoch = inner.supersede();

            let Some(document) = document else {
                let info = ErrorInfo::document_required();
                self.shared
                    .transition(&mut inner, JobState::Failed(info.clone()));
                return Err(info);
            };

            self.shared.transition(&mut inner, JobState::Submitting);
            (epoch, document)
        };

        info!(
            target = "application::jobs::submit",
            file_name = document.file_name,
            bytes = document.bytes.len(),
            document_type = selection.document_type_id,
            model = selection.model_id,
            "submitting document"
        );
        counter!("docintel_jobs_submitted_total").increment(1);

        let request = SubmissionRequest {
            document,
            context: context.into(),
            selection,
        };
        let accepted = self.shared.gateway.submit(request).await;

        let mut inner = mutex_lock(&self.shared.inner, LOCK_TARGET, "submit_complete");
        if inner.epoch != epoch {
            debug!(
                target = "application::jobs::submit",
                epoch, "submission superseded before the service answered"
            );
            return Err(ErrorInfo::submission(None));
        }

        match accepted {
            Ok(handle) => {
                info!(
                    target = "application::jobs::submit",
                    task_id = %handle,
                    "submission accepted"
                );
                self.shared
                    .transition(&mut inner, JobState::Polling(handle.clone()));
                let task = tokio::spawn(poll_loop(
                    Arc::clone(&self.shared),
                    epoch,
                    handle.clone(),
                ));
                inner.poller = Some(task);
                Ok(handle)
            }
            Err(err) => {
                warn!(
                    target = "application::jobs::submit",
                    error = %err,
                    "submission failed"
                );
                let info = ErrorInfo::submission(err.server_message());
                self.shared
                    .transition(&mut inner, JobState::Failed(info.clone()));
                Err(info)
            }
        }
    }

    /// Stop tracking the current job. Nothing is sent to the service.
    pub fn cancel(&self) {
        let mut inner = mutex_lock(&self.shared.inner, LOCK_TARGET, "cancel");
        inner.supersede();
        if inner.state != JobState::Idle {
            self.shared.transition(&mut inner, JobState::Idle);
        }
    }

    /// Register an observer for every subsequent transition.
    pub fn on_status_change<F>(&self, observer: F)
    where
        F: Fn(&JobState) + Send + Sync + 'static,
    {
        let mut inner = mutex_lock(&self.shared.inner, LOCK_TARGET, "on_status_change");
        inner.observers.push(Arc::new(observer));
    }

    /// Watch channel carrying the latest state.
    pub fn subscribe(&self) -> watch::Receiver<JobState> {
        self.shared.state_tx.subscribe()
    }

    pub fn state(&self) -> JobState {
        mutex_lock(&self.shared.inner, LOCK_TARGET, "state")
            .state
            .clone()
    }

    /// Resolve once the job is neither submitting nor polling.
    pub async fn wait_until_settled(&self) -> JobState {
        let mut rx = self.subscribe();
        let settled = rx
            .wait_for(|state| !state.is_in_flight())
            .await
            .map(|state| state.clone());
        match settled {
            Ok(state) => state,
            Err(_) => self.state(),
        }
    }
}

impl Drop for JobController {
    fn drop(&mut self) {
        let mut inner = mutex_lock(&self.shared.inner, LOCK_TARGET, "drop");
        inner.supersede();
    }
}

impl Inner {
    /// Invalidate the running cycle and stop its poll task.
    fn supersede(&mut self) -> u64 {
        self.epoch += 1;
        if let Some(poller) = self.poller.take() {
            poller.abort();
        }
        self.epoch
    }
}

impl Shared {
    fn transition(&self, inner: &mut Inner, next: JobState) {
        debug!(
            target = "application::jobs::transition",
            from = inner.state.label(),
            to = next.label(),
            epoch = inner.epoch,
            "job state changed"
        );

        match &next {
            JobState::Succeeded(_) => counter!("docintel_jobs_succeeded_total").increment(1),
            JobState::Failed(info) => {
                counter!("docintel_jobs_failed_total", "kind" => info.kind.as_str()).increment(1)
            }
            _ => {}
        }

        inner.state = next;
        for observer in &inner.observers {
            observer(&inner.state);
        }
        self.state_tx.send_replace(inner.state.clone());
    }

    /// Apply a terminal state produced by the poll task of `epoch`.
    fn finish(&self, epoch: u64, next: JobState) {
        let mut inner = mutex_lock(&self.inner, LOCK_TARGET, "finish");
        if inner.epoch != epoch {
            return;
        }
        inner.poller = None;
        self.transition(&mut inner, next);
    }

    fn is_current(&self, epoch: u64) -> bool {
        mutex_lock(&self.inner, LOCK_TARGET, "is_current").epoch == epoch
    }
}

async fn poll_loop(shared: Arc<Shared>, epoch: u64, handle: JobHandle) {
    let period = shared.polling.interval;
    let max_attempts = shared.polling.max_attempts;
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut attempts: u32 = 0;
    loop {
        ticker.tick().await;
        if !shared.is_current(epoch) {
            return;
        }

        attempts = attempts.saturating_add(1);
        let response = shared.gateway.status(&handle).await;
        counter!("docintel_job_polls_total").increment(1);

        let outcome = match classify(response) {
            PollOutcome::Pending(status) => {
                debug!(
                    target = "application::jobs::poll",
                    task_id = %handle,
                    attempt = attempts,
                    status = status.as_deref().unwrap_or(""),
                    "job still running"
                );
                match max_attempts {
                    Some(limit) if attempts >= limit.get() => {
                        PollOutcome::Failed(ErrorInfo::polling_exhausted(attempts))
                    }
                    _ => continue,
                }
            }
            terminal => terminal,
        };

        let next = match outcome {
            PollOutcome::Succeeded(payload) => {
                info!(
                    target = "application::jobs::poll",
                    task_id = %handle,
                    attempt = attempts,
                    "job succeeded"
                );
                JobState::Succeeded(payload)
            }
            PollOutcome::Failed(info) => {
                warn!(
                    target = "application::jobs::poll",
                    task_id = %handle,
                    attempt = attempts,
                    kind = info.kind.as_str(),
                    error = %info,
                    "job failed"
                );
                JobState::Failed(info)
            }
            PollOutcome::Pending(_) => continue,
        };

        shared.finish(epoch, next);
        return;
    }
}
