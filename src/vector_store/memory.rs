//! In-memory vector store implementation.
//!
//! Useful for testing and small datasets.

use super::{cosine_similarity, Document, SearchResult, TopicSummary, VectorStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory vector store.
pub struct MemoryVectorStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl MemoryVectorStore {
    /// Create a new in-memory vector store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn rebuild(&self, docs: &[Document]) -> Result<usize> {
        let mut store = self.documents.write().unwrap();
        store.clear();
        for doc in docs {
            store.insert(doc.id.clone(), doc.clone());
        }
        Ok(docs.len())
    }

    async fn upsert_batch(&self, docs: &[Document]) -> Result<usize> {
        let mut store = self.documents.write().unwrap();
        for doc in docs {
            store.insert(doc.id.clone(), doc.clone());
        }
        Ok(docs.len())
    }

    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        self.search_with_threshold(query_embedding, limit, f32::MIN).await
    }

    async fn search_with_threshold(
        &self,
        query_embedding: &[f32],
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<SearchResult>> {
        let docs = self.documents.read().unwrap();

        let mut results: Vec<SearchResult> = docs
            .values()
            .map(|doc| {
                let score = cosine_similarity(query_embedding, &doc.embedding);
                SearchResult {
                    document: doc.clone(),
                    score,
                }
            })
            .filter(|r| r.score >= min_score)
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);

        Ok(results)
    }

    async fn list_topics(&self) -> Result<Vec<TopicSummary>> {
        let docs = self.documents.read().unwrap();

        let mut topic_map: HashMap<String, TopicSummary> = HashMap::new();

        for doc in docs.values() {
            let entry = topic_map.entry(doc.topic.clone()).or_insert_with(|| TopicSummary {
                topic: doc.topic.clone(),
                chunk_count: 0,
                first_page: doc.page,
                last_page: doc.page,
            });

            entry.chunk_count += 1;
            entry.first_page = entry.first_page.min(doc.page);
            entry.last_page = entry.last_page.max(doc.page);
        }

        let mut topics: Vec<TopicSummary> = topic_map.into_values().collect();
        topics.sort_by_key(|t| t.first_page);

        Ok(topics)
    }

    async fn chunk_count(&self) -> Result<usize> {
        let docs = self.documents.read().unwrap();
        Ok(docs.len())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_document;
    use super::*;

    #[tokio::test]
    async fn test_memory_vector_store() {
        let store = MemoryVectorStore::new();

        store
            .upsert_batch(&[
                test_document("c0", "Money", 1, vec![1.0, 0.0, 0.0]),
                test_document("c1", "Money", 2, vec![0.0, 1.0, 0.0]),
            ])
            .await
            .unwrap();

        assert_eq!(store.chunk_count().await.unwrap(), 2);

        let results = store.search(&[1.0, 0.0, 0.0], 10).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].score > results[1].score);

        let topics = store.list_topics().await.unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].chunk_count, 2);
    }

    #[tokio::test]
    async fn test_rebuild_clears_previous_chunks() {
        let store = MemoryVectorStore::new();
        store
            .rebuild(&[test_document("c0", "Money", 1, vec![1.0, 0.0])])
            .await
            .unwrap();
        store
            .rebuild(&[test_document("c1", "Trade", 2, vec![0.0, 1.0])])
            .await
            .unwrap();

        assert_eq!(store.chunk_count().await.unwrap(), 1);
        let results = store.search(&[0.0, 1.0], 10).await.unwrap();
        assert_eq!(results[0].document.id, "c1");
    }

    #[tokio::test]
    async fn test_empty_store_returns_no_results() {
        let store = MemoryVectorStore::new();
        let results = store.search(&[1.0, 0.0], 5).await.unwrap();
        assert!(results.is_empty());
    }
}
