use std::sync::Arc;

use docintel::{
    application::{
        catalog::{explicit_selection, resolve_selection},
        error::AppError,
        jobs::JobController,
    },
    config::{AnalyzeArgs, Settings},
    domain::job::{JobState, SelectionConfig},
    infra::{http::HttpAnalysisGateway, uploads::read_document},
};
use tracing::info;

use super::{api_client, export::write_pdf, io::read_opt_value, print::print_result};

/// Submit a document, follow the job until it settles, then print the result
/// and optionally export it.
pub async fn handle(settings: &Settings, args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        file,
        context,
        context_file,
        document_type,
        model,
        format,
        pdf,
        out_dir: _,
    } = args;

    let context = read_opt_value(context, context_file)
        .await?
        .unwrap_or_default();
    let document = match file.as_deref() {
        Some(path) => Some(read_document(path).await?),
        None => None,
    };

    // Without a document the controller rejects the submission on its own;
    // neither a token nor the catalog is needed for that.
    let authenticated = document.is_some();
    let api = api_client(settings, authenticated)?;
    let selection = if document.is_none() {
        SelectionConfig::default()
    } else if let Some(selection) = explicit_selection(document_type.as_deref(), model.as_deref())
    {
        selection
    } else {
        let catalog = api.fetch_catalog().await?;
        resolve_selection(&catalog, document_type.as_deref(), model.as_deref())?
    };

    let controller = JobController::new(
        Arc::new(HttpAnalysisGateway::new(api)),
        settings.polling.clone(),
    );
    controller.on_status_change(|state: &JobState| {
        info!(
            target = "docintel::analyze",
            state = state.label(),
            task_id = state.handle().map(|handle| handle.as_str()).unwrap_or(""),
            "job state changed"
        );
    });

    controller.submit(document, context, selection).await?;

    match controller.wait_until_settled().await {
        JobState::Succeeded(payload) => {
            print_result(&payload, format)?;
            if pdf {
                write_pdf(settings, &payload)?;
            }
            Ok(())
        }
        JobState::Failed(info) => Err(AppError::Job(info)),
        other => Err(AppError::unexpected(format!(
            "job settled in state `{}`",
            other.label()
        ))),
    }
}
