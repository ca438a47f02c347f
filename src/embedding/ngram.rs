//! Deterministic local embedder based on character n-gram hashing.
//!
//! Not a learned model: n-grams of the lowercased text are feature-hashed
//! into a fixed number of buckets and the counts are L2-normalized. Good
//! enough for offline use and fully deterministic, which the grading and
//! retrieval tests rely on.

use super::{l2_normalize, Embedder};
use crate::error::Result;
use async_trait::async_trait;

/// Default embedding dimensions, matching the small sentence-embedding
/// models commonly used for this kind of index.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Character n-gram size.
const NGRAM: usize = 3;

/// Feature-hashing embedder over character trigrams.
pub struct NgramEmbedder {
    dimensions: usize,
}

impl NgramEmbedder {
    /// Create a new embedder with the given number of dimensions.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];

        let normalized = text.to_lowercase();
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        if tokens.is_empty() {
            return vec;
        }

        // Pad each token so short words still produce at least one n-gram.
        for token in tokens {
            let chars: Vec<char> = std::iter::once(' ')
                .chain(token.chars())
                .chain(std::iter::once(' '))
                .collect();
            for gram in chars.windows(NGRAM) {
                let bucket = (fnv1a(gram) % self.dimensions as u64) as usize;
                vec[bucket] += 1.0;
            }
        }

        l2_normalize(&mut vec);
        vec
    }
}

impl Default for NgramEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

#[async_trait]
impl Embedder for NgramEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_text(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// FNV-1a hash over a char slice.
fn fnv1a(chars: &[char]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for c in chars {
        for byte in (*c as u32).to_le_bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }
    }
    hash
}
