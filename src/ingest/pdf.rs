//! PDF page-text extraction.

use super::PageRecord;
use crate::error::{PensumError, Result};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Extract per-page text records from a PDF file.
///
/// Pages with no extractable text are skipped; page numbers are preserved
/// so chunk metadata still points at the right place in the source.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn extract_pages(path: impl AsRef<Path>, subject: &str) -> Result<Vec<PageRecord>> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(PensumError::Ingest(format!(
            "PDF file not found: {}",
            path.display()
        )));
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string();

    let pages = pdf_extract::extract_text_by_pages(path)
        .map_err(|e| PensumError::Ingest(format!("Failed to extract text: {}", e)))?;

    let mut records = Vec::new();
    for (i, text) in pages.into_iter().enumerate() {
        let page_no = (i + 1) as u32;
        if text.trim().is_empty() {
            debug!("Page {} has no extractable text, skipping", page_no);
            continue;
        }
        records.push(PageRecord::new(&stem, subject, page_no, text));
    }

    info!("Extracted {} non-empty pages from {}", records.len(), path.display());
    Ok(records)
}
