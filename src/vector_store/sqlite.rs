//! SQLite-based vector store implementation.
//!
//! Uses SQLite with cosine similarity computed in Rust for simplicity.
//! Chunk metadata and embedding live in the same row, and `rebuild` swaps
//! the whole chunk set inside one transaction, so a crash mid-rebuild never
//! leaves vectors and metadata out of step.

use super::{cosine_similarity, Document, SearchResult, TopicSummary, VectorStore};
use crate::error::{PensumError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, instrument};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS chunks (
    id TEXT PRIMARY KEY,
    subject TEXT NOT NULL,
    topic TEXT NOT NULL,
    subtopic TEXT,
    difficulty TEXT NOT NULL,
    page INTEGER NOT NULL,
    text TEXT NOT NULL,
    embedding BLOB NOT NULL,
    indexed_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_chunks_topic ON chunks(topic);
CREATE INDEX IF NOT EXISTS idx_chunks_page ON chunks(page);
"#;

/// SQLite-based vector store.
pub struct SqliteVectorStore {
    conn: Mutex<Connection>,
}

impl SqliteVectorStore {
    /// Create a new SQLite vector store.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized SQLite vector store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite vector store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Serialize embedding to bytes.
    fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
        embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    /// Deserialize embedding from bytes.
    fn bytes_to_embedding(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| {
                let arr: [u8; 4] = chunk.try_into().unwrap_or_default();
                f32::from_le_bytes(arr)
            })
            .collect()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| PensumError::VectorStore(format!("Failed to acquire lock: {}", e)))
    }

    fn insert_all(tx: &rusqlite::Transaction<'_>, docs: &[Document]) -> Result<()> {
        for doc in docs {
            let embedding_bytes = Self::embedding_to_bytes(&doc.embedding);
            tx.execute(
                r#"
                INSERT OR REPLACE INTO chunks
                (id, subject, topic, subtopic, difficulty, page, text, embedding, indexed_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    doc.id,
                    doc.subject,
                    doc.topic,
                    doc.subtopic,
                    doc.difficulty,
                    doc.page,
                    doc.text,
                    embedding_bytes,
                    doc.indexed_at.to_rfc3339(),
                ],
            )?;
        }
        Ok(())
    }

    fn row_to_document(row: &rusqlite::Row<'_>) -> rusqlite::Result<Document> {
        let embedding_bytes: Vec<u8> = row.get(7)?;
        let indexed_at_str: String = row.get(8)?;

        Ok(Document {
            id: row.get(0)?,
            subject: row.get(1)?,
            topic: row.get(2)?,
            subtopic: row.get(3)?,
            difficulty: row.get(4)?,
            page: row.get(5)?,
            text: row.get(6)?,
            embedding: Self::bytes_to_embedding(&embedding_bytes),
            indexed_at: DateTime::parse_from_rfc3339(&indexed_at_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
    #[instrument(skip(self, docs), fields(count = docs.len()))]
    async fn rebuild(&self, docs: &[Document]) -> Result<usize> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute("DELETE FROM chunks", [])?;
        Self::insert_all(&tx, docs)?;
        tx.commit()?;

        info!("Rebuilt index with {} chunks", docs.len());
        Ok(docs.len())
    }

    #[instrument(skip(self, docs))]
    async fn upsert_batch(&self, docs: &[Document]) -> Result<usize> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;

        Self::insert_all(&tx, docs)?;
        tx.commit()?;

        info!("Batch upserted {} chunks", docs.len());
        Ok(docs.len())
    }

    #[instrument(skip(self, query_embedding))]
    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        self.search_with_threshold(query_embedding, limit, f32::MIN).await
    }

    #[instrument(skip(self, query_embedding))]
    async fn search_with_threshold(
        &self,
        query_embedding: &[f32],
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<SearchResult>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, subject, topic, subtopic, difficulty, page, text, embedding, indexed_at
            FROM chunks
            "#,
        )?;

        let docs = stmt.query_map([], Self::row_to_document)?;

        let mut results: Vec<SearchResult> = docs
            .filter_map(|doc_result| doc_result.ok())
            .map(|doc| {
                let score = cosine_similarity(query_embedding, &doc.embedding);
                SearchResult { document: doc, score }
            })
            .filter(|r| r.score >= min_score)
            .collect();

        // Sort by score descending
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);

        debug!("Found {} matching chunks", results.len());
        Ok(results)
    }

    #[instrument(skip(self))]
    async fn list_topics(&self) -> Result<Vec<TopicSummary>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT topic, COUNT(*) as chunk_count, MIN(page), MAX(page)
            FROM chunks
            GROUP BY topic
            ORDER BY MIN(page)
            "#,
        )?;

        let topics = stmt.query_map([], |row| {
            Ok(TopicSummary {
                topic: row.get(0)?,
                chunk_count: row.get(1)?,
                first_page: row.get(2)?,
                last_page: row.get(3)?,
            })
        })?;

        Ok(topics.filter_map(|t| t.ok()).collect())
    }

    async fn chunk_count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_document;
    use super::*;

    #[tokio::test]
    async fn test_rebuild_replaces_everything() {
        let store = SqliteVectorStore::in_memory().unwrap();

        let first = vec![
            test_document("a_chunk_0", "Money", 1, vec![1.0, 0.0, 0.0]),
            test_document("a_chunk_1", "Money", 1, vec![0.0, 1.0, 0.0]),
        ];
        store.rebuild(&first).await.unwrap();
        assert_eq!(store.chunk_count().await.unwrap(), 2);

        let second = vec![test_document("b_chunk_0", "Trade", 4, vec![0.0, 0.0, 1.0])];
        store.rebuild(&second).await.unwrap();

        // The old chunk set must be gone entirely.
        assert_eq!(store.chunk_count().await.unwrap(), 1);
        let results = store.search(&[0.0, 0.0, 1.0], 10).await.unwrap();
        assert_eq!(results[0].document.id, "b_chunk_0");
    }

    #[tokio::test]
    async fn test_search_orders_by_score() {
        let store = SqliteVectorStore::in_memory().unwrap();
        store
            .upsert_batch(&[
                test_document("c0", "Money", 1, vec![1.0, 0.0, 0.0]),
                test_document("c1", "Money", 2, vec![0.7, 0.7, 0.0]),
                test_document("c2", "Money", 3, vec![0.0, 1.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document.id, "c0");
        assert_eq!(results[1].document.id, "c1");
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn test_threshold_filters_results() {
        let store = SqliteVectorStore::in_memory().unwrap();
        store
            .upsert_batch(&[
                test_document("c0", "Money", 1, vec![1.0, 0.0, 0.0]),
                test_document("c1", "Money", 2, vec![0.0, 1.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store
            .search_with_threshold(&[1.0, 0.0, 0.0], 10, 0.5)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.id, "c0");
    }

    #[tokio::test]
    async fn test_list_topics_groups_chunks() {
        let store = SqliteVectorStore::in_memory().unwrap();
        store
            .upsert_batch(&[
                test_document("c0", "Money", 1, vec![1.0, 0.0]),
                test_document("c1", "Money", 2, vec![0.0, 1.0]),
                test_document("c2", "Trade", 5, vec![1.0, 0.0]),
            ])
            .await
            .unwrap();

        let topics = store.list_topics().await.unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].topic, "Money");
        assert_eq!(topics[0].chunk_count, 2);
        assert_eq!(topics[0].last_page, 2);
    }

    #[tokio::test]
    async fn test_on_disk_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.db");

        {
            let store = SqliteVectorStore::new(&path).unwrap();
            store
                .rebuild(&[test_document("c0", "Money", 1, vec![1.0, 0.0])])
                .await
                .unwrap();
        }

        let store = SqliteVectorStore::new(&path).unwrap();
        assert_eq!(store.chunk_count().await.unwrap(), 1);
        let results = store.search(&[1.0, 0.0], 5).await.unwrap();
        assert!((results[0].score - 1.0).abs() < 0.001);
    }
}
