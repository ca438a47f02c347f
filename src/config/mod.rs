//! Configuration module for Pensum.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    ChunkingSettings, EmbeddingProvider, EmbeddingSettings, GeneralSettings, GradingSettings,
    IngestSettings, LessonSettings, RetrievalSettings, Settings, VectorStoreSettings,
};
