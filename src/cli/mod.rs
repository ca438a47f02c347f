//! CLI module for Pensum.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Pensum - Study Index and Answer Grading
///
/// A local-first CLI tool for turning course material into a searchable
/// index and grading free-text answers against it.
/// The name "Pensum" comes from the Norwegian word for "required reading."
#[derive(Parser, Debug)]
#[command(name = "pensum")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Pensum and create the configuration file
    Init,

    /// Check configuration and index health
    Doctor,

    /// Ingest a document and rebuild the search index
    Index {
        /// Path to a PDF file, or a JSONL file of page records with --pages
        input: String,

        /// Treat the input as a JSONL file of pre-extracted page records
        #[arg(long)]
        pages: bool,
    },

    /// Search the index for reference passages
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "5")]
        limit: usize,

        /// Minimum similarity score (0.0-1.0)
        #[arg(short, long, default_value = "0.0")]
        min_score: f32,
    },

    /// Grade a student answer against reference material
    Grade {
        /// The student answer to grade
        answer: String,

        /// Question used to retrieve reference passages from the index
        #[arg(short, long)]
        question: Option<String>,

        /// Number of reference passages to retrieve
        #[arg(short = 'k', long)]
        references: Option<usize>,
    },

    /// Manage lesson records built from video transcripts
    Lessons {
        #[command(subcommand)]
        action: LessonAction,
    },

    /// List indexed topics
    List,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum LessonAction {
    /// Build a lesson record from a transcript JSON file
    Build {
        /// Video ID for the lesson record
        video_id: String,

        /// Path to a JSON file of transcript segments
        transcript: String,
    },

    /// List stored lesson records
    List,

    /// Show one lesson record
    Show {
        /// Video ID of the lesson to show
        video_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Open the configuration file in $EDITOR
    Edit,
}
