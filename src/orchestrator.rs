//! Pipeline orchestrator for Pensum.
//!
//! Coordinates the entire process from PDF ingestion to index rebuild, and
//! hands out the retriever and grader wired to the same store and embedder.

use crate::chunking::{ChunkingConfig, WindowChunker};
use crate::config::Settings;
use crate::embedding::{create_embedder, Embedder};
use crate::error::Result;
use crate::grading::Grader;
use crate::ingest::{extract_pages, load_page_records, PageRecord};
use crate::lesson::LessonStore;
use crate::retrieval::Retriever;
use crate::vector_store::{Document, MemoryVectorStore, SqliteVectorStore, VectorStore};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Result of an indexing run.
#[derive(Debug, Clone)]
pub struct IndexResult {
    /// Non-empty pages ingested from the source.
    pub pages_ingested: usize,
    /// Chunks embedded and written to the store.
    pub chunks_indexed: usize,
    /// True when the run was skipped because there was nothing to index.
    pub skipped: bool,
}

/// The main orchestrator for the Pensum pipeline.
pub struct Orchestrator {
    settings: Settings,
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
}

impl Orchestrator {
    /// Create a new orchestrator from settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let embedder = create_embedder(&settings.embedding);

        let vector_store: Arc<dyn VectorStore> =
            match settings.vector_store.provider.to_lowercase().as_str() {
                "memory" => Arc::new(MemoryVectorStore::new()),
                _ => Arc::new(SqliteVectorStore::new(&settings.sqlite_path())?),
            };

        Ok(Self {
            settings,
            embedder,
            vector_store,
        })
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            settings,
            embedder,
            vector_store,
        }
    }

    /// Get a reference to the vector store.
    pub fn vector_store(&self) -> Arc<dyn VectorStore> {
        self.vector_store.clone()
    }

    /// Get a reference to the embedder.
    pub fn embedder(&self) -> Arc<dyn Embedder> {
        self.embedder.clone()
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build a retriever configured from settings.
    pub fn retriever(&self) -> Retriever {
        Retriever::new(self.vector_store.clone(), self.embedder.clone())
            .with_top_k(self.settings.retrieval.top_k)
            .with_min_score(self.settings.retrieval.min_score)
    }

    /// Build a grader over the configured embedder.
    pub fn grader(&self) -> Grader {
        Grader::new(self.embedder.clone())
    }

    /// Open the lesson store at its configured path.
    pub fn lesson_store(&self) -> LessonStore {
        LessonStore::new(self.settings.lesson_store_path())
    }

    /// Index a PDF document: extract pages, chunk, embed, rebuild the store.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub async fn index_document(&self, path: impl AsRef<Path>) -> Result<IndexResult> {
        let pages = extract_pages(path, &self.settings.ingest.subject)?;
        self.index_pages(&pages).await
    }

    /// Index pre-extracted page records from a JSONL file.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub async fn index_page_file(&self, path: impl AsRef<Path>) -> Result<IndexResult> {
        let pages = load_page_records(path)?;
        self.index_pages(&pages).await
    }

    /// Index a set of page records.
    ///
    /// Replaces the whole index: the store is rebuilt wholesale on every
    /// run. An empty chunk set skips the rebuild with a warning instead of
    /// erroring, leaving any existing index untouched.
    pub async fn index_pages(&self, pages: &[PageRecord]) -> Result<IndexResult> {
        let chunker = WindowChunker::new(ChunkingConfig::from(&self.settings.chunking));
        let chunks = chunker.chunk_pages(pages);

        if chunks.is_empty() {
            warn!("No chunks to embed; skipping index rebuild");
            return Ok(IndexResult {
                pages_ingested: pages.len(),
                chunks_indexed: 0,
                skipped: true,
            });
        }

        info!("Embedding {} chunks", chunks.len());
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let docs: Vec<Document> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| Document::from_chunk(chunk, embedding))
            .collect();

        let indexed = self.vector_store.rebuild(&docs).await?;

        Ok(IndexResult {
            pages_ingested: pages.len(),
            chunks_indexed: indexed,
            skipped: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::NgramEmbedder;

    fn orchestrator() -> Orchestrator {
        let settings = Settings {
            vector_store: crate::config::VectorStoreSettings {
                provider: "memory".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        Orchestrator::with_components(
            settings,
            Arc::new(NgramEmbedder::default()),
            Arc::new(MemoryVectorStore::new()),
        )
    }

    fn pages(texts: &[&str]) -> Vec<PageRecord> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| PageRecord::new("chapter1", "Economics", (i + 1) as u32, t.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_store_count_matches_chunk_count() {
        let orch = orchestrator();
        let result = orch
            .index_pages(&pages(&[
                "Inflation is a rise in the general price level",
                "A tariff is a tax on imports",
            ]))
            .await
            .unwrap();

        assert!(!result.skipped);
        assert_eq!(result.pages_ingested, 2);
        assert_eq!(
            orch.vector_store().chunk_count().await.unwrap(),
            result.chunks_indexed
        );
    }

    #[tokio::test]
    async fn test_empty_input_skips_rebuild() {
        let orch = orchestrator();

        // Seed the store, then index nothing: the old index must survive.
        orch.index_pages(&pages(&["money supply and demand"]))
            .await
            .unwrap();
        let before = orch.vector_store().chunk_count().await.unwrap();

        let result = orch.index_pages(&[]).await.unwrap();
        assert!(result.skipped);
        assert_eq!(result.chunks_indexed, 0);
        assert_eq!(orch.vector_store().chunk_count().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_index_then_retrieve_roundtrip() {
        let orch = orchestrator();
        orch.index_pages(&pages(&[
            "Inflation is a sustained rise in the general price level",
            "Comparative advantage explains gains from trade",
        ]))
        .await
        .unwrap();

        let results = orch.retriever().retrieve("what is inflation?").await.unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].page, 1);
    }

    #[tokio::test]
    async fn test_grade_against_retrieved_references() {
        let orch = orchestrator();
        orch.index_pages(&pages(&[
            "Inflation is a sustained rise in the general price level",
        ]))
        .await
        .unwrap();

        let references: Vec<String> = orch
            .retriever()
            .retrieve("inflation")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.text)
            .collect();

        let report = orch
            .grader()
            .grade("Inflation is a sustained rise in the general price level", &references)
            .await
            .unwrap();
        assert!(report.score > 90.0);
    }
}
