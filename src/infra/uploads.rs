use std::path::Path;

use bytes::Bytes;
use tokio::fs;

use crate::domain::job::DocumentUpload;

use super::error::InfraError;

const FALLBACK_FILE_NAME: &str = "document.bin";

/// Read a document and guess its content type from the file extension.
pub async fn read_document(path: &Path) -> Result<DocumentUpload, InfraError> {
    let data = fs::read(path).await.map_err(|err| {
        InfraError::Io(std::io::Error::new(
            err.kind(),
            format!("failed to read document `{}`: {err}", path.display()),
        ))
    })?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string();
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(DocumentUpload::new(file_name, content_type, Bytes::from(data)))
}
