//! CLI output formatting utilities.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print a topic summary line.
    pub fn topic_info(topic: &str, chunks: u32, first_page: u32, last_page: u32) {
        let pages = if first_page == last_page {
            format!("p.{}", first_page)
        } else {
            format!("pp.{}-{}", first_page, last_page)
        };
        println!(
            "  {} {} ({} chunks, {})",
            style("*").cyan(),
            style(topic).bold(),
            chunks,
            style(pages).dim()
        );
    }

    /// Print a search result.
    pub fn search_result(topic: &str, page: u32, score: f32, content: &str) {
        println!(
            "\n{} {} @ p.{} (score: {:.2})",
            style(">>").green(),
            style(topic).bold(),
            style(page).cyan(),
            score
        );
        println!("   {}", content_preview(content, 200));
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate content with ellipsis.
fn content_preview(content: &str, max_len: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_len {
        content
    } else {
        let truncated: String = content.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_preview_truncates() {
        let long = "x".repeat(300);
        let preview = content_preview(&long, 200);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 203);
    }

    #[test]
    fn test_content_preview_flattens_newlines() {
        assert_eq!(content_preview("a\nb", 10), "a b");
    }
}
