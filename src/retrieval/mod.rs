//! Nearest-neighbor retrieval over the chunk index.
//!
//! Embeds a query and maps store search hits back to chunk metadata.

use crate::embedding::Embedder;
use crate::error::Result;
use crate::vector_store::{SearchResult, VectorStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// A retrieved chunk with its metadata, formatted for display or grading.
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    /// Chunk ID.
    pub id: String,
    /// Subject label.
    pub subject: String,
    /// Topic label.
    pub topic: String,
    /// 1-based source page number.
    pub page: u32,
    /// Chunk text.
    pub text: String,
    /// Similarity score.
    pub score: f32,
}

impl From<SearchResult> for RetrievedChunk {
    fn from(result: SearchResult) -> Self {
        Self {
            id: result.document.id,
            subject: result.document.subject,
            topic: result.document.topic,
            page: result.document.page,
            text: result.document.text,
            score: result.score,
        }
    }
}

/// Retrieves reference chunks for a query.
pub struct Retriever {
    vector_store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
    min_score: f32,
}

impl Retriever {
    /// Create a new retriever.
    pub fn new(vector_store: Arc<dyn VectorStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            vector_store,
            embedder,
            top_k: 5,
            min_score: 0.0,
        }
    }

    /// Set the number of chunks to retrieve.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the minimum similarity score threshold.
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    /// Retrieve the nearest chunks for a query.
    ///
    /// An empty query, an empty index, or a store failure all produce an
    /// empty result set; retrieval never aborts the caller.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedChunk>> {
        if query.trim().is_empty() {
            debug!("Empty query, returning no results");
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;

        let results = match self
            .vector_store
            .search_with_threshold(&query_embedding, self.top_k, self.min_score)
            .await
        {
            Ok(results) => results,
            Err(e) => {
                warn!("Index search failed, returning no results: {}", e);
                return Ok(Vec::new());
            }
        };

        Ok(results.into_iter().map(RetrievedChunk::from).collect())
    }
}

/// Format retrieved chunks for display to the user.
pub fn format_chunks_for_display(chunks: &[RetrievedChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| {
            format!(
                "[p.{} | {}] (score: {:.2})\n{}",
                chunk.page, chunk.topic, chunk.score, chunk.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
