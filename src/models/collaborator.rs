use serde::{Deserialize, Serialize};

use super::{SpeakerTurn, TranscriptSegment};

/// Payload printed by the transcription collaborator
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscriptionOutput {
    pub segments: Vec<TranscriptSegment>,
    /// Total audio duration in seconds (pass-through metadata)
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Payload printed by the diarization collaborator
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DiarizationOutput {
    pub turns: Vec<SpeakerTurn>,
}

impl DiarizationOutput {
    /// Distinct speaker labels in order of first appearance
    pub fn speakers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for turn in &self.turns {
            if !seen.contains(&turn.speaker.as_str()) {
                seen.push(&turn.speaker);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transcription_output() {
        let json = r#"{
            "segments": [
                {"start": 0.0, "end": 2.0, "text": "hello"},
                {"start": 2.0, "end": 4.0, "text": "world"}
            ],
            "duration": 4.5
        }"#;

        let output: TranscriptionOutput = serde_json::from_str(json).unwrap();

        assert_eq!(output.segments.len(), 2);
        assert_eq!(output.segments[1].text, "world");
        assert_eq!(output.duration, Some(4.5));
    }

    #[test]
    fn test_parse_diarization_output() {
        let json = r#"[
            {"start": 0.0, "end": 2.5, "speaker": "SPEAKER_00"},
            {"start": 2.5, "end": 5.0, "speaker": "SPEAKER_01"},
            {"start": 5.0, "end": 6.0, "speaker": "SPEAKER_00"}
        ]"#;

        let output: DiarizationOutput = serde_json::from_str(json).unwrap();

        assert_eq!(output.turns.len(), 3);
        assert_eq!(output.speakers(), vec!["SPEAKER_00", "SPEAKER_01"]);
    }
}
