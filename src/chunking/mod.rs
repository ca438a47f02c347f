//! Chunking for breaking page text into retrievable units.
//!
//! Pages are split into fixed-size overlapping token windows. A chunk is
//! the unit of retrieval and is immutable once produced.

mod window;

pub use window::WindowChunker;

use crate::config::ChunkingSettings;
use serde::{Deserialize, Serialize};

/// A chunk of source text with attached topic metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk ID, derived from the page record ID and window position.
    pub id: String,
    /// Subject label.
    pub subject: String,
    /// Topic picked by the heading heuristic, or the default label.
    pub topic: String,
    /// Finer-grained topic, if known.
    pub subtopic: Option<String>,
    /// Difficulty label.
    pub difficulty: String,
    /// 1-based source page number.
    pub page: u32,
    /// The chunk text.
    pub text: String,
}

/// Configuration for token-window chunking.
#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    /// Window size in whitespace tokens.
    pub window_size: usize,
    /// Overlap between consecutive windows in tokens.
    pub overlap: usize,
    /// Topic label when no heading is found.
    pub default_topic: String,
    /// Difficulty label attached to every chunk.
    pub default_difficulty: String,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            window_size: 300,
            overlap: 50,
            default_topic: "General".to_string(),
            default_difficulty: "medium".to_string(),
        }
    }
}

impl From<&ChunkingSettings> for ChunkingConfig {
    fn from(settings: &ChunkingSettings) -> Self {
        Self {
            window_size: settings.window_size.max(1),
            // Overlap must stay below the window size or the scan never advances.
            overlap: settings.overlap.min(settings.window_size.saturating_sub(1)),
            default_topic: settings.default_topic.clone(),
            default_difficulty: settings.default_difficulty.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChunkingSettings;

    #[test]
    fn test_overlap_clamped_below_window() {
        let settings = ChunkingSettings {
            window_size: 10,
            overlap: 50,
            ..Default::default()
        };
        let config = ChunkingConfig::from(&settings);
        assert_eq!(config.window_size, 10);
        assert_eq!(config.overlap, 9);
    }
}
