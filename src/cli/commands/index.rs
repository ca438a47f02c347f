//! Index command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the index command.
pub async fn run_index(input: &str, pages: bool, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Ingesting and embedding...");

    let result = if pages {
        orchestrator.index_page_file(input).await
    } else {
        orchestrator.index_document(input).await
    };
    spinner.finish_and_clear();

    match result {
        Ok(r) if r.skipped => {
            Output::warning("No chunks to embed; index left unchanged.");
            Output::info("Check that the input document contains extractable text.");
        }
        Ok(r) => {
            Output::success(&format!(
                "Indexed {} chunks from {} pages",
                r.chunks_indexed, r.pages_ingested
            ));
            let count = orchestrator.vector_store().chunk_count().await?;
            Output::kv("Index size", &count.to_string());
        }
        Err(e) => {
            Output::error(&format!("Indexing failed: {}", e));
            return Err(anyhow::anyhow!("{}", e));
        }
    }

    Ok(())
}
