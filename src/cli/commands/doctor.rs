//! Doctor command - verify configuration and index health.

use crate::cli::Output;
use crate::config::{EmbeddingProvider, Settings};
use crate::lesson::LessonStore;
use crate::orchestrator::Orchestrator;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Pensum Doctor");
    println!();
    println!("Checking configuration and index health...\n");

    let mut checks = Vec::new();

    println!("{}", style("Configuration").bold());
    checks.push(check_config_file());
    checks.push(check_embedding(settings));
    for check in &checks {
        check.print();
    }
    println!();

    println!("{}", style("Index").bold());
    let index_checks = check_index(settings).await;
    for check in &index_checks {
        check.print();
    }
    checks.extend(index_checks);
    println!();

    println!("{}", style("Lessons").bold());
    let lesson_check = check_lessons(settings);
    lesson_check.print();
    checks.push(lesson_check);
    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!("{} error(s), {} warning(s) found.", errors, warnings));
    } else if warnings > 0 {
        Output::warning(&format!("{} warning(s) found; Pensum will still work.", warnings));
    } else {
        Output::success("Everything looks good!");
    }

    Ok(())
}

fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("config", &format!("found at {}", config_path.display()))
    } else {
        CheckResult::warning(
            "config",
            "no config file, using defaults",
            "Run 'pensum init' to create one",
        )
    }
}

fn check_embedding(settings: &Settings) -> CheckResult {
    match settings.embedding.provider {
        EmbeddingProvider::Ngram => CheckResult::ok(
            "embedding",
            &format!("ngram provider, {} dimensions (offline)", settings.embedding.dimensions),
        ),
        EmbeddingProvider::OpenAI => {
            if std::env::var("OPENAI_API_KEY").is_ok() {
                CheckResult::ok(
                    "embedding",
                    &format!("openai provider, model {}", settings.embedding.model),
                )
            } else {
                CheckResult::error(
                    "embedding",
                    "openai provider selected but OPENAI_API_KEY is not set",
                    "Export the key or switch provider to 'ngram'",
                )
            }
        }
    }
}

async fn check_index(settings: &Settings) -> Vec<CheckResult> {
    let mut checks = Vec::new();

    let sqlite_path = settings.sqlite_path();
    if !sqlite_path.exists() {
        checks.push(CheckResult::warning(
            "index",
            "no index built yet",
            "Run 'pensum index <pdf>' to build one",
        ));
        return checks;
    }

    match Orchestrator::new(settings.clone()) {
        Ok(orchestrator) => match orchestrator.vector_store().chunk_count().await {
            Ok(0) => checks.push(CheckResult::warning(
                "index",
                "index exists but holds no chunks",
                "Run 'pensum index <pdf>' to populate it",
            )),
            Ok(count) => checks.push(CheckResult::ok(
                "index",
                &format!("{} chunks at {}", count, sqlite_path.display()),
            )),
            Err(e) => checks.push(CheckResult::error(
                "index",
                &format!("failed to read index: {}", e),
                "Delete the index file and rebuild",
            )),
        },
        Err(e) => checks.push(CheckResult::error(
            "index",
            &format!("failed to open store: {}", e),
            "Check the vector_store settings",
        )),
    }

    checks
}

fn check_lessons(settings: &Settings) -> CheckResult {
    let store = LessonStore::new(settings.lesson_store_path());
    match store.load() {
        Ok(records) if records.is_empty() => CheckResult::warning(
            "lessons",
            "no lesson records stored",
            "Run 'pensum lessons build <id> <transcript>' to add one",
        ),
        Ok(records) => CheckResult::ok("lessons", &format!("{} record(s) stored", records.len())),
        Err(e) => CheckResult::error(
            "lessons",
            &format!("failed to read lesson store: {}", e),
            "Check the lessons.store_path setting",
        ),
    }
}
