//! Paginated PDF export of analysis results.

mod fonts;
mod layout;
mod pdf;

use std::fs;
use std::path::{Path, PathBuf};

use metrics::histogram;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;

use crate::application::render::{Document, project};
use crate::domain::result::ResultPayload;

pub use fonts::Face;
pub use layout::{
    BOTTOM_LIMIT_MM, BULLET_INDENT_MM, BULLET_PREFIX, BlockRole, Layout, MARGIN_MM, PlacedBlock,
    PlacedLine, TOP_MM, TextRun, layout, line_height_mm,
};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("result does not match a known report shape")]
    UnrecognizedResult,
    #[error("failed to write `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A rendered PDF ready to be written.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl ExportArtifact {
    /// Write the artifact into `dir`, creating the directory if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(self.file_name);
        fs::write(&path, &self.bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!(
            target = "docintel::export",
            path = %path.display(),
            pages = self.page_count,
            bytes = self.bytes.len(),
            "export written"
        );
        Ok(path)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExporter;

impl PdfExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, payload: &ResultPayload) -> Result<ExportArtifact, ExportError> {
        self.export_at(payload, OffsetDateTime::now_utc())
    }

    /// Export with a fixed creation timestamp.
    pub fn export_at(
        &self,
        payload: &ResultPayload,
        created: OffsetDateTime,
    ) -> Result<ExportArtifact, ExportError> {
        let document = project(payload).ok_or(ExportError::UnrecognizedResult)?;
        Ok(self.export_document(&document, created))
    }

    /// Export an already projected document.
    pub fn export_document(&self, document: &Document, created: OffsetDateTime) -> ExportArtifact {
        let layout = layout(document);
        let bytes = pdf::encode(&layout, document.title.as_deref(), created);
        histogram!("docintel_export_pages").record(layout.page_count as f64);

        ExportArtifact {
            file_name: document.variant.export_file_name(),
            bytes,
            page_count: layout.page_count,
        }
    }
}
