//! Document ingestion for Pensum.
//!
//! Extracts per-page text records from source documents. Pages are the
//! ingestion unit; chunking happens downstream.

mod pdf;

pub use pdf::extract_pages;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::path::Path;
use tracing::warn;

/// Text extracted from a single page of a source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Record ID, derived from the source file stem and page number.
    pub id: String,
    /// Subject label.
    pub subject: String,
    /// 1-based page number.
    pub page: u32,
    /// Extracted page text.
    pub text: String,
}

impl PageRecord {
    /// Create a new page record with a derived ID.
    pub fn new(source_stem: &str, subject: &str, page: u32, text: String) -> Self {
        Self {
            id: format!("{}_p{}", source_stem, page),
            subject: subject.to_string(),
            page,
            text,
        }
    }
}

/// Load page records from a line-delimited JSON file.
///
/// Malformed lines are skipped with a warning rather than failing the run.
pub fn load_page_records(path: impl AsRef<Path>) -> Result<Vec<PageRecord>> {
    let file = std::fs::File::open(path.as_ref())?;
    let reader = std::io::BufReader::new(file);

    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<PageRecord>(&line) {
            Ok(rec) => records.push(rec),
            Err(e) => warn!("Skipping malformed record on line {}: {}", line_no + 1, e),
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_page_record_id() {
        let rec = PageRecord::new("chapter1", "Economics", 3, "Inflation".to_string());
        assert_eq!(rec.id, "chapter1_p3");
        assert_eq!(rec.page, 3);
    }

    #[test]
    fn test_load_page_records_skips_malformed_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"id":"c1_p1","subject":"Economics","page":1,"text":"Money and banking"}}"#
        )
        .unwrap();
        writeln!(file, "not json at all").unwrap();
        writeln!(
            file,
            r#"{{"id":"c1_p2","subject":"Economics","page":2,"text":"Inflation"}}"#
        )
        .unwrap();

        let records = load_page_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, "c1_p2");
    }
}
