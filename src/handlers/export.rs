use docintel::{
    application::{error::AppError, export::PdfExporter},
    config::{ExportArgs, Settings},
    domain::result::ResultPayload,
};

use super::io::read_result;

/// Write the PDF for a saved result into the configured export directory.
pub async fn handle(settings: &Settings, args: ExportArgs) -> Result<(), AppError> {
    let payload = read_result(&args.file).await?;
    let path = write_pdf(settings, &payload)?;
    println!("{}", path.display());
    Ok(())
}

pub(super) fn write_pdf(
    settings: &Settings,
    payload: &ResultPayload,
) -> Result<std::path::PathBuf, AppError> {
    let artifact = PdfExporter::new().export(payload)?;
    let path = artifact.write_to(&settings.export.directory)?;
    Ok(path)
}
