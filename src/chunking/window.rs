//! Token-window chunking implementation.

use super::{Chunk, ChunkingConfig};
use crate::ingest::PageRecord;
use tracing::debug;

/// Maximum line length considered as a heading candidate.
const MAX_HEADING_LEN: usize = 80;

/// Number of leading lines scanned for a heading.
const HEADING_SCAN_LINES: usize = 4;

/// Splits page text into fixed-size overlapping token windows.
pub struct WindowChunker {
    config: ChunkingConfig,
}

impl WindowChunker {
    /// Create a new chunker with the given configuration.
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    /// Split a single page into chunks.
    ///
    /// A page with fewer tokens than one window yields exactly one chunk
    /// containing all tokens; an empty page yields none.
    pub fn chunk_page(&self, page: &PageRecord) -> Vec<Chunk> {
        let topic = heuristic_topic(&page.text)
            .unwrap_or_else(|| self.config.default_topic.clone());

        let tokens: Vec<&str> = page.text.split_whitespace().collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        let step = self.config.window_size - self.config.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut order = 0;

        while start < tokens.len() {
            let end = (start + self.config.window_size).min(tokens.len());
            chunks.push(Chunk {
                id: format!("{}_chunk_{}", page.id, order),
                subject: page.subject.clone(),
                topic: topic.clone(),
                subtopic: None,
                difficulty: self.config.default_difficulty.clone(),
                page: page.page,
                text: tokens[start..end].join(" "),
            });
            order += 1;
            start += step;
        }

        debug!("Page {} split into {} chunks", page.page, chunks.len());
        chunks
    }

    /// Split a sequence of pages into chunks, in page order.
    pub fn chunk_pages(&self, pages: &[PageRecord]) -> Vec<Chunk> {
        pages.iter().flat_map(|p| self.chunk_page(p)).collect()
    }
}

/// Pick a topic by scanning the first few lines for something heading-like:
/// short, but more than one word.
fn heuristic_topic(text: &str) -> Option<String> {
    text.lines()
        .take(HEADING_SCAN_LINES)
        .map(str::trim)
        .find(|line| line.len() < MAX_HEADING_LEN && line.split_whitespace().count() > 1)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(text: &str) -> PageRecord {
        PageRecord::new("chapter1", "Economics", 1, text.to_string())
    }

    fn chunker() -> WindowChunker {
        WindowChunker::new(ChunkingConfig {
            window_size: 10,
            overlap: 3,
            ..Default::default()
        })
    }

    #[test]
    fn test_short_page_yields_single_chunk() {
        let p = page("inflation is a rise in prices");
        let chunks = chunker().chunk_page(&p);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "inflation is a rise in prices");
        assert_eq!(chunks[0].id, "chapter1_p1_chunk_0");
    }

    #[test]
    fn test_empty_page_yields_no_chunks() {
        let p = page("   \n  ");
        assert!(chunker().chunk_page(&p).is_empty());
    }

    #[test]
    fn test_windows_overlap() {
        let words: Vec<String> = (0..25).map(|i| format!("w{}", i)).collect();
        let p = page(&words.join(" "));
        let chunks = chunker().chunk_page(&p);

        // Step is 7 tokens, so windows start at 0, 7, 14, 21.
        assert_eq!(chunks.len(), 4);
        assert!(chunks[0].text.ends_with("w9"));
        assert!(chunks[1].text.starts_with("w7"));
        assert!(chunks[3].text.ends_with("w24"));
    }

    #[test]
    fn test_heading_heuristic() {
        let p = page("Supply and Demand\nThe market clears when quantity supplied equals quantity demanded across all participants in the exchange.");
        let chunks = chunker().chunk_page(&p);
        assert_eq!(chunks[0].topic, "Supply and Demand");
    }

    #[test]
    fn test_heading_fallback() {
        // Single-word lines are not heading candidates.
        let p = page("Introduction\nEconomics\nMarkets\nPrices");
        let chunks = chunker().chunk_page(&p);
        assert_eq!(chunks[0].topic, "General");
    }

    #[test]
    fn test_chunk_pages_preserves_order() {
        let pages = vec![
            PageRecord::new("c", "Economics", 1, "one two three".to_string()),
            PageRecord::new("c", "Economics", 2, "four five six".to_string()),
        ];
        let chunks = chunker().chunk_pages(&pages);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].page, 1);
        assert_eq!(chunks[1].page, 2);
    }
}
