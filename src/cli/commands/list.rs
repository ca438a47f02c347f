//! List command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the list command.
pub async fn run_list(settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;

    match orchestrator.vector_store().list_topics().await {
        Ok(topics) => {
            if topics.is_empty() {
                Output::info("Nothing indexed yet. Use 'pensum index <pdf>' to add content.");
            } else {
                Output::header("Indexed Topics");
                for topic in &topics {
                    Output::topic_info(
                        &topic.topic,
                        topic.chunk_count,
                        topic.first_page,
                        topic.last_page,
                    );
                }

                let count = orchestrator.vector_store().chunk_count().await?;
                println!();
                Output::kv("Total chunks", &count.to_string());
            }
        }
        Err(e) => {
            Output::error(&format!("Failed to list topics: {}", e));
            return Err(anyhow::anyhow!("{}", e));
        }
    }

    Ok(())
}
