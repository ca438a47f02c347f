//! Error types for Pensum.

use thiserror::Error;

/// Library-level error type for Pensum operations.
#[derive(Error, Debug)]
pub enum PensumError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Ingestion error: {0}")]
    Ingest(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Grading error: {0}")]
    Grading(String),

    #[error("Lesson store error: {0}")]
    Lesson(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Pensum operations.
pub type Result<T> = std::result::Result<T, PensumError>;
