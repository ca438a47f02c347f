//! Configuration settings for Pensum.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub ingest: IngestSettings,
    pub chunking: ChunkingSettings,
    pub embedding: EmbeddingSettings,
    pub vector_store: VectorStoreSettings,
    pub retrieval: RetrievalSettings,
    pub grading: GradingSettings,
    pub lessons: LessonSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.pensum".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Document ingestion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Subject label attached to every chunk from a document.
    pub subject: String,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            subject: "Economics".to_string(),
        }
    }
}

/// Token-window chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Window size in whitespace tokens.
    pub window_size: usize,
    /// Overlap between consecutive windows in tokens.
    pub overlap: usize,
    /// Topic label used when the heading heuristic finds nothing.
    pub default_topic: String,
    /// Difficulty label attached to every chunk.
    pub default_difficulty: String,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            window_size: 300,
            overlap: 50,
            default_topic: "General".to_string(),
            default_difficulty: "medium".to_string(),
        }
    }
}

/// Embedding provider type.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Deterministic local character n-gram embedder (default, offline).
    #[default]
    Ngram,
    /// OpenAI embedding API.
    OpenAI,
}

impl std::str::FromStr for EmbeddingProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ngram" | "local" => Ok(EmbeddingProvider::Ngram),
            "openai" => Ok(EmbeddingProvider::OpenAI),
            _ => Err(format!("Unknown embedding provider: {}", s)),
        }
    }
}

impl std::fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingProvider::Ngram => write!(f, "ngram"),
            EmbeddingProvider::OpenAI => write!(f, "openai"),
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding provider (ngram, openai).
    pub provider: EmbeddingProvider,
    /// Embedding model to use (openai provider only).
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::Ngram,
            model: "text-embedding-3-small".to_string(),
            dimensions: 384,
        }
    }
}

/// Vector store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreSettings {
    /// Vector store provider (sqlite, memory).
    pub provider: String,
    /// Path to SQLite database (for sqlite provider).
    pub sqlite_path: String,
}

impl Default for VectorStoreSettings {
    fn default() -> Self {
        Self {
            provider: "sqlite".to_string(),
            sqlite_path: "~/.pensum/index.db".to_string(),
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Default number of chunks to retrieve.
    pub top_k: usize,
    /// Minimum similarity score for retrieved chunks.
    pub min_score: f32,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_score: 0.0,
        }
    }
}

/// Answer grading settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingSettings {
    /// Number of reference passages retrieved per grading question.
    pub reference_count: usize,
}

impl Default for GradingSettings {
    fn default() -> Self {
        Self { reference_count: 5 }
    }
}

/// Lesson record settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonSettings {
    /// Path to the JSONL lesson store.
    pub store_path: String,
    /// Maximum number of keyterms per lesson.
    pub max_keyterms: usize,
    /// Maximum number of timestamped highlights per lesson.
    pub max_highlights: usize,
}

impl Default for LessonSettings {
    fn default() -> Self {
        Self {
            store_path: "~/.pensum/lessons.jsonl".to_string(),
            max_keyterms: 8,
            max_highlights: 8,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::PensumError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pensum")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded SQLite database path.
    pub fn sqlite_path(&self) -> PathBuf {
        Self::expand_path(&self.vector_store.sqlite_path)
    }

    /// Get the expanded lesson store path.
    pub fn lesson_store_path(&self) -> PathBuf {
        Self::expand_path(&self.lessons.store_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.chunking.window_size, 300);
        assert_eq!(settings.chunking.overlap, 50);
        assert_eq!(settings.embedding.provider, EmbeddingProvider::Ngram);
        assert_eq!(settings.retrieval.top_k, 5);
    }

    #[test]
    fn test_roundtrip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.embedding.dimensions, settings.embedding.dimensions);
        assert_eq!(parsed.grading.reference_count, 5);
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!(
            "local".parse::<EmbeddingProvider>().unwrap(),
            EmbeddingProvider::Ngram
        );
        assert_eq!(
            "OpenAI".parse::<EmbeddingProvider>().unwrap(),
            EmbeddingProvider::OpenAI
        );
        assert!("word2vec".parse::<EmbeddingProvider>().is_err());
    }
}
