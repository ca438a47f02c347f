//! Lessons command implementation.

use crate::cli::{LessonAction, Output};
use crate::config::Settings;
use crate::lesson::{LessonRecord, LessonStore, TranscriptSegment};
use anyhow::Result;

/// Run the lessons command.
pub fn run_lessons(action: &LessonAction, settings: Settings) -> Result<()> {
    let store = LessonStore::new(settings.lesson_store_path());

    match action {
        LessonAction::Build { video_id, transcript } => {
            let content = std::fs::read_to_string(transcript)?;
            let segments: Vec<TranscriptSegment> = serde_json::from_str(&content)?;

            match LessonRecord::from_transcript(
                video_id,
                &segments,
                settings.lessons.max_keyterms,
                settings.lessons.max_highlights,
            ) {
                Some(record) => {
                    store.upsert(&record)?;
                    Output::success(&format!(
                        "Built lesson for {} ({} keyterms, {} highlights)",
                        video_id,
                        record.keyterms.len(),
                        record.highlights.len()
                    ));
                }
                None => {
                    Output::warning("Transcript is empty; no lesson record written.");
                }
            }
        }

        LessonAction::List => {
            let records = store.load()?;
            if records.is_empty() {
                Output::info("No lessons stored yet. Use 'pensum lessons build <id> <transcript>'.");
            } else {
                Output::header("Lessons");
                for record in &records {
                    Output::list_item(&format!(
                        "{} — {}",
                        record.video_id,
                        record.keyterms.iter().take(5).cloned().collect::<Vec<_>>().join(", ")
                    ));
                }
            }
        }

        LessonAction::Show { video_id } => match store.get(video_id)? {
            Some(record) => {
                Output::header(&format!("Lesson {}", record.video_id));
                Output::kv("Keyterms", &record.keyterms.join(", "));
                println!();
                Output::info("Highlights:");
                for h in &record.highlights {
                    Output::list_item(&format!("{}s: {}", h.start as u32, h.text));
                }
                if let Some(mcqs) = &record.mcqs {
                    println!();
                    Output::info("MCQs:");
                    println!("{}", mcqs);
                }
                if let Some(essay) = &record.essay {
                    println!();
                    Output::info("Essay question:");
                    println!("{}", essay);
                }
            }
            None => {
                Output::warning(&format!("No lesson found for video {}", video_id));
            }
        },
    }

    Ok(())
}
