//! Pensum - Study Index and Answer Grading
//!
//! A local-first CLI tool for turning course material into a searchable
//! vector index, retrieving reference passages, and grading free-text
//! answers by semantic similarity.
//!
//! The name "Pensum" comes from the Norwegian word for "required reading."
//!
//! # Overview
//!
//! Pensum allows you to:
//! - Ingest a PDF chapter and split it into overlapping text chunks
//! - Embed chunks and persist them in a single searchable artifact
//! - Search the index semantically for reference passages
//! - Grade student answers against retrieved reference material
//! - Keep per-video lesson records with keyterms and highlights
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `ingest` - PDF page-text extraction
//! - `chunking` - Token-window chunking with topic heuristics
//! - `embedding` - Embedding generation
//! - `vector_store` - Vector database abstraction
//! - `retrieval` - Nearest-neighbor retrieval over the store
//! - `grading` - Similarity-based answer grading
//! - `lesson` - Lesson records built from video transcripts
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use pensum::config::Settings;
//! use pensum::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     // Index a PDF chapter
//!     let result = orchestrator.index_document("chapter1.pdf").await?;
//!     println!("Indexed {} chunks", result.chunks_indexed);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod grading;
pub mod ingest;
pub mod lesson;
pub mod openai;
pub mod orchestrator;
pub mod retrieval;
pub mod vector_store;

pub use error::{PensumError, Result};
