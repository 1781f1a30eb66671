use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{ConsolidatedSegment, MergedTranscript, SpeakerStats};

/// Machine-readable output format
#[derive(Debug, Clone, Serialize)]
pub struct MachineTranscript<'a> {
    pub segments: &'a [ConsolidatedSegment],
    pub speakers: &'a BTreeMap<String, SpeakerStats>,
    pub full_transcript: &'a str,
    /// Metadata about the run
    pub metadata: TranscriptMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptMetadata {
    /// Unique identifier for this merge run
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    /// Audio duration reported by the transcription collaborator
    pub audio_duration: Option<f64>,
    pub segment_count: usize,
    pub speaker_count: usize,
    /// Whether labels came from diarization (false means fallback speaker)
    pub diarized: bool,
}

impl TranscriptMetadata {
    pub fn new(transcript: &MergedTranscript, audio_duration: Option<f64>, diarized: bool) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            audio_duration,
            segment_count: transcript.segments.len(),
            speaker_count: transcript.speaker_count(),
            diarized,
        }
    }
}

impl<'a> MachineTranscript<'a> {
    pub fn from_transcript(transcript: &'a MergedTranscript, metadata: TranscriptMetadata) -> Self {
        Self {
            segments: &transcript.segments,
            speakers: &transcript.speakers,
            full_transcript: &transcript.full_transcript,
            metadata,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable transcript format
pub struct HumanTranscript<'a> {
    transcript: &'a MergedTranscript,
    speaker_names: Option<&'a BTreeMap<String, String>>,
}

impl<'a> HumanTranscript<'a> {
    pub fn new(transcript: &'a MergedTranscript) -> Self {
        Self {
            transcript,
            speaker_names: None,
        }
    }

    /// Render with display names substituted for raw speaker labels
    pub fn with_speaker_names(
        transcript: &'a MergedTranscript,
        names: &'a BTreeMap<String, String>,
    ) -> Self {
        Self {
            transcript,
            speaker_names: Some(names),
        }
    }

    fn name_for<'b>(&'b self, speaker: &'b str) -> &'b str {
        self.speaker_names
            .and_then(|names| names.get(speaker))
            .map(String::as_str)
            .unwrap_or(speaker)
    }

    /// Format the transcript as human-readable text
    pub fn format(&self) -> String {
        let mut output = String::new();

        for segment in &self.transcript.segments {
            let start_time = format_timestamp(segment.start);
            output.push_str(&format!("[{}] {}:\n", start_time, self.name_for(&segment.speaker)));
            output.push_str(&wrap_text(&segment.text, 80));
            output.push_str("\n\n");
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Format seconds as MM:SS.mmm
fn format_timestamp(seconds: f64) -> String {
    let ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let secs = ms / 1000;
    format!("{:02}:{:02}.{:03}", secs / 60, secs % 60, ms % 1000)
}

/// Wrap text at approximately the given width
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        if line_len + word.len() + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word.len();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TranscriptSegment;

    fn transcript() -> MergedTranscript {
        let segments = vec![
            TranscriptSegment::new(0.0, 2.0, "hello").with_speaker("A"),
            TranscriptSegment::new(65.5, 70.0, "world").with_speaker("B"),
        ];
        let speakers = [("A", 1, 2.0), ("B", 1, 4.5)]
            .into_iter()
            .map(|(label, word_count, duration)| {
                (label.to_string(), SpeakerStats { word_count, duration })
            })
            .collect();
        MergedTranscript {
            segments,
            speakers,
            full_transcript: "hello world".to_string(),
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00.000");
        assert_eq!(format_timestamp(1.5), "00:01.500");
        assert_eq!(format_timestamp(65.0), "01:05.000");
        assert_eq!(format_timestamp(3661.5), "61:01.500");
    }

    #[test]
    fn test_wrap_text() {
        let text = "This is a test of the text wrapping function that should wrap at 20 chars";
        let wrapped = wrap_text(text, 20);
        for line in wrapped.lines() {
            assert!(line.len() <= 25);
        }
    }

    #[test]
    fn test_human_format() {
        let transcript = transcript();
        let text = HumanTranscript::new(&transcript).format();

        assert_eq!(text, "[00:00.000] A:\nhello\n\n[01:05.500] B:\nworld\n\n");
    }

    #[test]
    fn test_human_format_with_names() {
        let transcript = transcript();
        let names: BTreeMap<String, String> = [("A".to_string(), "Teacher".to_string())].into();
        let text = HumanTranscript::with_speaker_names(&transcript, &names).format();

        assert!(text.contains("] Teacher:\n"));
        // Unmapped labels fall through unchanged
        assert!(text.contains("] B:\n"));
    }

    #[test]
    fn test_write_machine_json() {
        let transcript = transcript();
        let metadata = TranscriptMetadata::new(&transcript, Some(70.0), true);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        MachineTranscript::from_transcript(&transcript, metadata)
            .write_json(&path)
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["full_transcript"], "hello world");
        assert_eq!(value["segments"][1]["speaker"], "B");
        assert_eq!(value["speakers"]["B"]["duration"], 4.5);
        assert_eq!(value["metadata"]["segment_count"], 2);
        assert_eq!(value["metadata"]["diarized"], true);
        assert_eq!(value["metadata"]["audio_duration"], 70.0);
    }

    #[test]
    fn test_write_human_file() {
        let transcript = transcript();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        HumanTranscript::new(&transcript).write_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[00:00.000] A:\nhello"));
    }
}
