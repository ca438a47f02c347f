//! Lesson records built from video transcripts.
//!
//! A lesson record summarizes one video: full transcript text, extracted
//! keyterms, and timestamped highlights. Records are produced once per
//! video and never updated in place.

mod keyterms;
mod store;

pub use keyterms::extract_keyterms;
pub use store::LessonStore;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One segment of a video transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds.
    pub start: f64,
    /// Segment duration in seconds.
    #[serde(default)]
    pub duration: f64,
    /// Segment text.
    pub text: String,
}

/// A timestamped highlight picked from a transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Highlight text.
    pub text: String,
}

/// A per-video lesson record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonRecord {
    /// Video ID.
    pub video_id: String,
    /// Full transcript text.
    pub text: String,
    /// Extracted keyterms.
    pub keyterms: Vec<String>,
    /// Timestamped highlights.
    pub highlights: Vec<Highlight>,
    /// Multiple-choice questions, if supplied externally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcqs: Option<String>,
    /// Essay question, if supplied externally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essay: Option<String>,
}

impl LessonRecord {
    /// Build a lesson record from transcript segments.
    ///
    /// Returns `None` for an empty transcript.
    pub fn from_transcript(
        video_id: &str,
        segments: &[TranscriptSegment],
        max_keyterms: usize,
        max_highlights: usize,
    ) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let keyterms = extract_keyterms(&text, max_keyterms);
        let highlights = timestamped_highlights(segments, &keyterms, max_highlights);

        Some(Self {
            video_id: video_id.to_string(),
            text,
            keyterms,
            highlights,
            mcqs: None,
            essay: None,
        })
    }
}

/// Pick the segments that mention the most keyterms, at most one per
/// integer start second, ordered by descending keyterm hits.
fn timestamped_highlights(
    segments: &[TranscriptSegment],
    keyterms: &[String],
    top_n: usize,
) -> Vec<Highlight> {
    let mut scored: Vec<(&TranscriptSegment, usize)> = segments
        .iter()
        .map(|seg| {
            let lower = seg.text.to_lowercase();
            let score = keyterms
                .iter()
                .filter(|kw| lower.contains(&kw.to_lowercase()))
                .count();
            (seg, score)
        })
        .collect();

    // Stable sort keeps transcript order among equally-scored segments.
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let mut seen_starts = HashSet::new();
    let mut highlights = Vec::new();
    for (seg, _) in scored {
        let start_key = seg.start as i64;
        if !seen_starts.insert(start_key) {
            continue;
        }
        highlights.push(Highlight {
            start: seg.start,
            duration: seg.duration,
            text: seg.text.clone(),
        });
        if highlights.len() >= top_n {
            break;
        }
    }

    highlights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: f64, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            start,
            duration: 5.0,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_empty_transcript_yields_no_record() {
        assert!(LessonRecord::from_transcript("vid1", &[], 8, 8).is_none());
    }

    #[test]
    fn test_record_joins_segment_text() {
        let segments = vec![
            segment(0.0, "Inflation is a rise in prices."),
            segment(5.0, "It erodes purchasing power."),
        ];
        let record = LessonRecord::from_transcript("vid1", &segments, 8, 8).unwrap();

        assert_eq!(record.video_id, "vid1");
        assert!(record.text.contains("rise in prices. It erodes"));
        assert!(record.mcqs.is_none());
    }

    #[test]
    fn test_highlights_prefer_keyterm_dense_segments() {
        let keyterms = vec!["inflation".to_string(), "money supply".to_string()];
        let segments = vec![
            segment(0.0, "Welcome to the lecture."),
            segment(10.0, "Inflation tracks the money supply over time."),
            segment(20.0, "See you next week."),
        ];

        let highlights = timestamped_highlights(&segments, &keyterms, 2);
        assert_eq!(highlights[0].start, 10.0);
    }

    #[test]
    fn test_highlights_dedupe_by_integer_start() {
        let keyterms = vec!["inflation".to_string()];
        let segments = vec![
            segment(3.2, "inflation here"),
            segment(3.9, "inflation there"),
            segment(7.0, "inflation again"),
        ];

        let highlights = timestamped_highlights(&segments, &keyterms, 8);
        // 3.2 and 3.9 share integer start 3; only the first survives.
        assert_eq!(highlights.len(), 2);
    }

    #[test]
    fn test_highlight_count_is_bounded() {
        let keyterms = vec!["market".to_string()];
        let segments: Vec<TranscriptSegment> = (0..20)
            .map(|i| segment(i as f64 * 10.0, "the market moves"))
            .collect();

        let highlights = timestamped_highlights(&segments, &keyterms, 8);
        assert_eq!(highlights.len(), 8);
    }
}
