//! Frequency-based keyterm extraction.
//!
//! Unigrams and bigrams are counted after stopword filtering and the most
//! frequent terms win. Ties keep first-seen order so output is stable.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Common English stopwords; enough to keep glue words out of keyterms.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have",
    "he", "her", "his", "i", "if", "in", "into", "is", "it", "its", "not", "of", "on",
    "or", "our", "she", "so", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "to", "was", "we", "were", "what", "when", "which", "who", "will",
    "with", "you", "your",
];

fn word_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z0-9']+").expect("valid regex"))
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Extract up to `max_terms` keyterms from a text.
///
/// Bigrams outrank unigrams at equal frequency, mirroring how multi-word
/// terms carry more signal in course material.
pub fn extract_keyterms(text: &str, max_terms: usize) -> Vec<String> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = word_pattern()
        .find_iter(&lower)
        .map(|m| m.as_str())
        .collect();

    // first-seen position breaks frequency ties
    let mut counts: HashMap<String, (usize, usize, bool)> = HashMap::new();
    let mut order = 0usize;

    for window in words.windows(2) {
        if is_stopword(window[0]) || is_stopword(window[1]) {
            continue;
        }
        let bigram = format!("{} {}", window[0], window[1]);
        let entry = counts.entry(bigram).or_insert_with(|| {
            order += 1;
            (0, order, true)
        });
        entry.0 += 1;
    }

    for word in &words {
        if is_stopword(word) || word.len() < 3 {
            continue;
        }
        let entry = counts.entry(word.to_string()).or_insert_with(|| {
            order += 1;
            (0, order, false)
        });
        entry.0 += 1;
    }

    let mut terms: Vec<(String, usize, usize, bool)> = counts
        .into_iter()
        .map(|(term, (count, seen, is_bigram))| (term, count, seen, is_bigram))
        .collect();

    terms.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.3.cmp(&a.3))
            .then_with(|| a.2.cmp(&b.2))
    });

    terms
        .into_iter()
        .take(max_terms)
        .map(|(term, _, _, _)| term)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequent_terms_come_first() {
        let text = "Inflation inflation inflation. The market clears. Inflation persists.";
        let terms = extract_keyterms(text, 5);
        assert_eq!(terms[0], "inflation");
    }

    #[test]
    fn test_stopwords_are_excluded() {
        let terms = extract_keyterms("the the the and and market", 5);
        assert!(!terms.contains(&"the".to_string()));
        assert!(!terms.contains(&"and".to_string()));
        assert!(terms.contains(&"market".to_string()));
    }

    #[test]
    fn test_bigrams_survive_stopword_filter() {
        let text = "money supply drives prices; money supply matters; money supply again";
        let terms = extract_keyterms(text, 3);
        assert!(terms.contains(&"money supply".to_string()));
    }

    #[test]
    fn test_term_count_is_bounded() {
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        let terms = extract_keyterms(text, 3);
        assert_eq!(terms.len(), 3);
    }

    #[test]
    fn test_empty_text_yields_no_terms() {
        assert!(extract_keyterms("", 8).is_empty());
    }
}
