//! Search command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(query: &str, limit: usize, min_score: f32, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;

    let retriever = orchestrator
        .retriever()
        .with_top_k(limit)
        .with_min_score(min_score);

    let spinner = Output::spinner("Searching...");
    let results = retriever.retrieve(query).await;
    spinner.finish_and_clear();

    match results {
        Ok(chunks) => {
            if chunks.is_empty() {
                Output::warning("No results found. Is the index built? Try 'pensum index <pdf>'.");
            } else {
                Output::success(&format!("Found {} results", chunks.len()));

                for chunk in &chunks {
                    Output::search_result(&chunk.topic, chunk.page, chunk.score, &chunk.text);
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(anyhow::anyhow!("{}", e));
        }
    }

    Ok(())
}
