use docintel::{application::error::AppError, config::Settings};
use tracing::info;

use super::{api_client, print::print_json};

/// Print the document types and AI models the service offers.
pub async fn handle(settings: &Settings) -> Result<(), AppError> {
    let api = api_client(settings, false)?;
    let catalog = api.fetch_catalog().await?;
    info!(
        target = "docintel::options",
        document_types = catalog.document_types.len(),
        ai_models = catalog.ai_models.len(),
        "catalog fetched"
    );
    print_json(&catalog)
}
