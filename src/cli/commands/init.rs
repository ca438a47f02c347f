//! Init command - first-run setup.

use crate::cli::Output;
use crate::config::{EmbeddingProvider, Settings};
use console::style;
use std::io::{self, Write};

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Pensum Setup");
    println!();
    println!("Welcome to Pensum! Let's make sure everything is configured correctly.\n");

    // Step 1: API key (only needed for the OpenAI embedding provider)
    println!("{}", style("Step 1: Checking API configuration").bold().cyan());
    println!();

    if settings.embedding.provider == EmbeddingProvider::OpenAI
        && std::env::var("OPENAI_API_KEY").is_err()
    {
        Output::warning("OPENAI_API_KEY environment variable is not set.");
        println!();
        println!("  The openai embedding provider requires an API key.");
        println!("  Set it in your shell configuration (~/.bashrc, ~/.zshrc, etc.):");
        println!("  {}", style("export OPENAI_API_KEY='sk-...'").green());
        println!();
        println!(
            "  Or switch to the offline provider: {}",
            style("provider = \"ngram\"").green()
        );
        println!();

        if !prompt_continue("Continue without API key?")? {
            println!();
            Output::info("Setup cancelled. Set your API key and run 'pensum init' again.");
            return Ok(());
        }
    } else {
        Output::success(&format!(
            "Embedding provider '{}' is ready to use.",
            settings.embedding.provider
        ));
    }

    println!();

    // Step 2: Create directories
    println!("{}", style("Step 2: Setting up directories").bold().cyan());
    println!();

    let data_dir = settings.data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        Output::success(&format!("Created data directory: {}", data_dir.display()));
    } else {
        Output::info(&format!("Data directory exists: {}", data_dir.display()));
    }

    println!();

    // Step 3: Create config file
    println!("{}", style("Step 3: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else if prompt_continue("Create default configuration file?")? {
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
        println!();
        println!("  Edit your config with: {}", style("pensum config edit").green());
    } else {
        Output::info("Skipped config file creation. Using defaults.");
    }

    println!();

    // Summary
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Check system status", style("pensum doctor").cyan());
    println!("  {} Index your first chapter", style("pensum index <pdf>").cyan());
    println!("  {} Search the index", style("pensum search \"<query>\"").cyan());
    println!("  {} Grade an answer", style("pensum grade \"<answer>\" -q \"<question>\"").cyan());
    println!();
    println!("For more help: {}", style("pensum --help").cyan());

    Ok(())
}

/// Prompt user for yes/no confirmation.
fn prompt_continue(message: &str) -> io::Result<bool> {
    print!("{} {} ", style("?").cyan(), message);
    print!("{} ", style("[y/N]").dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y" || input.trim().to_lowercase() == "yes")
}
