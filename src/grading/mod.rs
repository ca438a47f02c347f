//! Similarity-based grading of free-text answers.
//!
//! A student answer is scored against reference passages by averaged
//! cosine similarity, scaled to a 0-100 range.

use crate::embedding::Embedder;
use crate::error::Result;
use crate::vector_store::cosine_similarity;
use std::sync::Arc;
use tracing::{debug, warn};

/// The outcome of grading one answer.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeReport {
    /// Mean similarity scaled to 0-100, rounded to one decimal.
    pub score: f32,
    /// Cosine similarity of the answer against each reference, in order.
    pub similarities: Vec<f32>,
}

impl GradeReport {
    fn zero() -> Self {
        Self {
            score: 0.0,
            similarities: Vec::new(),
        }
    }
}

/// Grades answers against reference passages.
pub struct Grader {
    embedder: Arc<dyn Embedder>,
}

impl Grader {
    /// Create a new grader.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Grade a student answer against a set of reference passages.
    ///
    /// An empty answer, an empty reference set, or an embedding failure
    /// all degrade to a zero score with no similarities; grading never
    /// aborts the caller.
    pub async fn grade(&self, answer: &str, references: &[String]) -> Result<GradeReport> {
        if answer.trim().is_empty() {
            debug!("Empty answer, returning zero score");
            return Ok(GradeReport::zero());
        }
        if references.is_empty() {
            debug!("No reference passages, returning zero score");
            return Ok(GradeReport::zero());
        }

        // One batch: answer first, then every reference.
        let mut texts = Vec::with_capacity(references.len() + 1);
        texts.push(answer.to_string());
        texts.extend(references.iter().cloned());

        let embeddings = match self.embedder.embed_batch(&texts).await {
            Ok(embs) if embs.len() == texts.len() => embs,
            Ok(embs) => {
                warn!(
                    "Embedder returned {} vectors for {} texts, returning zero score",
                    embs.len(),
                    texts.len()
                );
                return Ok(GradeReport::zero());
            }
            Err(e) => {
                warn!("Embedding failed during grading, returning zero score: {}", e);
                return Ok(GradeReport::zero());
            }
        };

        let answer_embedding = &embeddings[0];
        let similarities: Vec<f32> = embeddings[1..]
            .iter()
            .map(|ref_embedding| cosine_similarity(answer_embedding, ref_embedding))
            .collect();

        let mean: f32 = similarities.iter().sum::<f32>() / similarities.len() as f32;
        let score = (mean * 1000.0).round() / 10.0;

        debug!("Graded answer: score {:.1} over {} references", score, similarities.len());
        Ok(GradeReport { score, similarities })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::NgramEmbedder;

    fn grader() -> Grader {
        Grader::new(Arc::new(NgramEmbedder::default()))
    }

    #[tokio::test]
    async fn test_empty_answer_scores_zero() {
        let report = grader()
            .grade("  ", &["Inflation is a rise in prices".to_string()])
            .await
            .unwrap();
        assert_eq!(report.score, 0.0);
        assert!(report.similarities.is_empty());
    }

    #[tokio::test]
    async fn test_no_references_scores_zero() {
        let report = grader().grade("Inflation is bad", &[]).await.unwrap();
        assert_eq!(report.score, 0.0);
        assert!(report.similarities.is_empty());
    }

    #[tokio::test]
    async fn test_identical_answer_scores_full_marks() {
        let text = "Inflation is a sustained rise in the general price level";
        let report = grader().grade(text, &[text.to_string()]).await.unwrap();

        assert_eq!(report.similarities.len(), 1);
        assert!((report.similarities[0] - 1.0).abs() < 1e-4);
        assert!((report.score - 100.0).abs() < 0.1);
    }

    #[tokio::test]
    async fn test_score_is_mean_over_references() {
        let answer = "Inflation is a rise in the general price level";
        let references = vec![
            answer.to_string(),
            "A tariff is a tax levied on imported goods".to_string(),
        ];
        let report = grader().grade(answer, &references).await.unwrap();

        assert_eq!(report.similarities.len(), 2);
        let mean = (report.similarities[0] + report.similarities[1]) / 2.0;
        assert!((report.score - mean * 100.0).abs() < 0.1);
        // Identical reference should dominate the unrelated one.
        assert!(report.similarities[0] > report.similarities[1]);
    }
}
