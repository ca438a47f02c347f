//! Line-delimited JSON store for lesson records.

use super::LessonRecord;
use crate::error::Result;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// JSONL-backed lesson store, one record per line keyed by `video_id`.
pub struct LessonStore {
    path: PathBuf,
}

impl LessonStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load all lesson records.
    ///
    /// A missing file is an empty store; malformed lines are skipped with
    /// a warning.
    pub fn load(&self) -> Result<Vec<LessonRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = std::fs::File::open(&self.path)?;
        let reader = std::io::BufReader::new(file);

        let mut records = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<LessonRecord>(&line) {
                Ok(rec) => records.push(rec),
                Err(e) => warn!("Skipping malformed lesson on line {}: {}", line_no + 1, e),
            }
        }

        Ok(records)
    }

    /// Get a lesson record by video ID.
    pub fn get(&self, video_id: &str) -> Result<Option<LessonRecord>> {
        Ok(self.load()?.into_iter().find(|r| r.video_id == video_id))
    }

    /// Insert or replace a record, keyed by video ID.
    pub fn upsert(&self, record: &LessonRecord) -> Result<()> {
        let mut records = self.load()?;
        records.retain(|r| r.video_id != record.video_id);
        records.push(record.clone());
        self.save_all(&records)
    }

    /// Write the full record set back to disk.
    pub fn save_all(&self, records: &[LessonRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = std::fs::File::create(&self.path)?;
        for record in records {
            let line = serde_json::to_string(record)?;
            writeln!(file, "{}", line)?;
        }

        info!("Wrote {} lesson records to {:?}", records.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::Highlight;

    fn record(video_id: &str) -> LessonRecord {
        LessonRecord {
            video_id: video_id.to_string(),
            text: "lecture text".to_string(),
            keyterms: vec!["inflation".to_string()],
            highlights: vec![Highlight {
                start: 10.0,
                duration: 5.0,
                text: "inflation here".to_string(),
            }],
            mcqs: None,
            essay: None,
        }
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = LessonStore::new(dir.path().join("lessons.jsonl"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_replaces_by_video_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = LessonStore::new(dir.path().join("lessons.jsonl"));

        store.upsert(&record("vid1")).unwrap();
        store.upsert(&record("vid2")).unwrap();

        let mut updated = record("vid1");
        updated.keyterms = vec!["deflation".to_string()];
        store.upsert(&updated).unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 2);
        let vid1 = store.get("vid1").unwrap().unwrap();
        assert_eq!(vid1.keyterms, vec!["deflation".to_string()]);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lessons.jsonl");

        let store = LessonStore::new(&path);
        store.upsert(&record("vid1")).unwrap();

        // Corrupt the store with a bad line.
        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("{broken json\n");
        std::fs::write(&path, content).unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].video_id, "vid1");
    }
}
