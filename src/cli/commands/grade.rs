//! Grade command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the grade command.
///
/// Reference passages come from the index: the question (or, failing that,
/// the answer itself) is used as the retrieval query.
pub async fn run_grade(
    answer: &str,
    question: Option<&str>,
    references: Option<usize>,
    settings: Settings,
) -> Result<()> {
    let reference_count = references.unwrap_or(settings.grading.reference_count);
    let orchestrator = Orchestrator::new(settings)?;

    let query = question.unwrap_or(answer);
    let retriever = orchestrator.retriever().with_top_k(reference_count);

    let spinner = Output::spinner("Retrieving reference material...");
    let retrieved = retriever.retrieve(query).await?;
    spinner.finish_and_clear();

    if retrieved.is_empty() {
        Output::warning("No reference material found. Rebuild the index with 'pensum index <pdf>'.");
        return Ok(());
    }

    let reference_texts: Vec<String> = retrieved.iter().map(|c| c.text.clone()).collect();

    let spinner = Output::spinner("Grading...");
    let report = orchestrator.grader().grade(answer, &reference_texts).await?;
    spinner.finish_and_clear();

    Output::header("Grade Report");
    Output::kv("Score (0-100)", &format!("{:.1}", report.score));
    Output::kv("References", &retrieved.len().to_string());
    println!();

    for (chunk, similarity) in retrieved.iter().zip(&report.similarities) {
        Output::list_item(&format!(
            "p.{} | {} (similarity: {:.3})",
            chunk.page, chunk.topic, similarity
        ));
    }

    Ok(())
}
