//! Vector store abstraction for Pensum.
//!
//! Provides a trait-based interface for different vector database backends.
//! A stored chunk carries its metadata and its embedding in the same record,
//! so the vector count and the metadata count cannot drift apart — there is
//! no separate metadata file to fall out of sync.

mod memory;
mod sqlite;

pub use memory::MemoryVectorStore;
pub use sqlite::SqliteVectorStore;

use crate::chunking::Chunk;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chunk stored in the vector database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Chunk ID, derived from source page and window position.
    pub id: String,
    /// Subject label.
    pub subject: String,
    /// Topic label.
    pub topic: String,
    /// Finer-grained topic, if known.
    pub subtopic: Option<String>,
    /// Difficulty label.
    pub difficulty: String,
    /// 1-based source page number.
    pub page: u32,
    /// Chunk text.
    pub text: String,
    /// Normalized embedding vector.
    pub embedding: Vec<f32>,
    /// When this chunk was indexed.
    pub indexed_at: DateTime<Utc>,
}

impl Document {
    /// Pair a chunk with its embedding.
    pub fn from_chunk(chunk: Chunk, embedding: Vec<f32>) -> Self {
        Self {
            id: chunk.id,
            subject: chunk.subject,
            topic: chunk.topic,
            subtopic: chunk.subtopic,
            difficulty: chunk.difficulty,
            page: chunk.page,
            text: chunk.text,
            embedding,
            indexed_at: Utc::now(),
        }
    }
}

/// A search result with score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched document.
    pub document: Document,
    /// Similarity score (higher is better).
    pub score: f32,
}

/// Summary information about an indexed topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSummary {
    /// Topic label.
    pub topic: String,
    /// Number of indexed chunks under this topic.
    pub chunk_count: u32,
    /// First source page covered.
    pub first_page: u32,
    /// Last source page covered.
    pub last_page: u32,
}

/// Trait for vector store implementations.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Replace the entire chunk set atomically.
    ///
    /// The index is rebuilt wholesale on every run; embeddings and metadata
    /// land together or not at all.
    async fn rebuild(&self, docs: &[Document]) -> Result<usize>;

    /// Bulk insert documents without clearing existing ones.
    async fn upsert_batch(&self, docs: &[Document]) -> Result<usize>;

    /// Search for similar documents.
    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>>;

    /// Search with a minimum similarity threshold.
    async fn search_with_threshold(
        &self,
        query_embedding: &[f32],
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<SearchResult>>;

    /// List all indexed topics.
    async fn list_topics(&self) -> Result<Vec<TopicSummary>>;

    /// Get total chunk count.
    async fn chunk_count(&self) -> Result<usize>;
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
pub(crate) fn test_document(id: &str, topic: &str, page: u32, embedding: Vec<f32>) -> Document {
    Document {
        id: id.to_string(),
        subject: "Economics".to_string(),
        topic: topic.to_string(),
        subtopic: None,
        difficulty: "medium".to_string(),
        page,
        text: format!("text for {}", id),
        embedding,
        indexed_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_length_mismatch() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_document_from_chunk() {
        let chunk = Chunk {
            id: "chapter1_p2_chunk_0".to_string(),
            subject: "Economics".to_string(),
            topic: "Inflation".to_string(),
            subtopic: None,
            difficulty: "medium".to_string(),
            page: 2,
            text: "Prices rise".to_string(),
        };

        let doc = Document::from_chunk(chunk, vec![1.0, 0.0]);
        assert_eq!(doc.id, "chapter1_p2_chunk_0");
        assert_eq!(doc.page, 2);
        assert_eq!(doc.embedding, vec![1.0, 0.0]);
    }
}
