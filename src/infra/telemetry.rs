use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
///
/// Log lines go to stderr; stdout is reserved for command output.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "docintel_jobs_submitted_total",
            Unit::Count,
            "Total number of documents submitted for analysis."
        );
        describe_counter!(
            "docintel_job_polls_total",
            Unit::Count,
            "Total number of job status queries issued."
        );
        describe_counter!(
            "docintel_jobs_succeeded_total",
            Unit::Count,
            "Total number of jobs that finished with a result."
        );
        describe_counter!(
            "docintel_jobs_failed_total",
            Unit::Count,
            "Total number of jobs that ended in a failure, labelled by kind."
        );
        describe_histogram!(
            "docintel_export_pages",
            Unit::Count,
            "Number of pages in each exported PDF."
        );
    });
}
