use serde::{Deserialize, Serialize};

/// A piece of transcribed text with its position in the source audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
    /// The recognized text
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Duration of this segment in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Attach a speaker label, producing an attributed segment
    pub fn with_speaker(&self, speaker: impl Into<String>) -> AttributedSegment {
        AttributedSegment {
            start: self.start,
            end: self.end,
            text: self.text.clone(),
            speaker: speaker.into(),
        }
    }
}

/// A speaker turn reported by the diarization collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerTurn {
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
    /// Opaque speaker label (e.g. "SPEAKER_01")
    pub speaker: String,
}

impl SpeakerTurn {
    pub fn new(start: f64, end: f64, speaker: impl Into<String>) -> Self {
        Self {
            start,
            end,
            speaker: speaker.into(),
        }
    }

    /// Duration of this turn in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A transcript segment with exactly one speaker label assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributedSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub speaker: String,
}

/// A maximal run of consecutive same-speaker segments
///
/// `text` is the space-joined text of the run and `[start, end)` spans from
/// the first segment's start to the last segment's end.
pub type ConsolidatedSegment = AttributedSegment;

impl AttributedSegment {
    /// Duration of this segment in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Number of whitespace-delimited words in the text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Length of the intersection of two intervals, floored at zero
pub fn overlap(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> f64 {
    (a_end.min(b_end) - a_start.max(b_start)).max(0.0)
}
