//! Embedding generation for semantic search, retrieval, and grading.

mod ngram;
mod openai;

pub use ngram::NgramEmbedder;
pub use openai::OpenAIEmbedder;

use crate::config::{EmbeddingProvider, EmbeddingSettings};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for embedding generation.
///
/// Implementations must return L2-normalized vectors so that inner product
/// and cosine similarity coincide.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;
}

/// Create an embedder from settings.
pub fn create_embedder(settings: &EmbeddingSettings) -> Arc<dyn Embedder> {
    match settings.provider {
        EmbeddingProvider::Ngram => Arc::new(NgramEmbedder::new(settings.dimensions as usize)),
        EmbeddingProvider::OpenAI => Arc::new(OpenAIEmbedder::with_config(
            &settings.model,
            settings.dimensions as usize,
        )),
    }
}

/// Scale a vector to unit length in place. Zero vectors are left untouched.
pub fn l2_normalize(vec: &mut [f32]) {
    let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vec.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_normalize() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_zero_vector() {
        let mut v = vec![0.0, 0.0];
        l2_normalize(&mut v);
        assert_eq!(v, vec![0.0, 0.0]);
    }

    #[test]
    fn test_create_embedder_respects_provider() {
        let settings = EmbeddingSettings::default();
        let embedder = create_embedder(&settings);
        assert_eq!(embedder.dimensions(), 384);
    }
}
