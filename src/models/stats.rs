use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ConsolidatedSegment;

/// Per-speaker totals accumulated over consolidated segments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeakerStats {
    /// Whitespace-delimited words spoken
    pub word_count: usize,
    /// Total speaking time in seconds
    pub duration: f64,
}

/// The merged, speaker-attributed transcript handed back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedTranscript {
    /// Consolidated segments in start order
    pub segments: Vec<ConsolidatedSegment>,
    /// Speaker label -> totals
    pub speakers: BTreeMap<String, SpeakerStats>,
    /// All segment texts joined with a single space
    pub full_transcript: String,
}

impl MergedTranscript {
    /// Number of distinct speakers
    pub fn speaker_count(&self) -> usize {
        self.speakers.len()
    }

    /// Speaker labels ordered by word count (descending), ties broken by label
    pub fn ranked_speakers(&self) -> Vec<(&str, &SpeakerStats)> {
        let mut ranked: Vec<(&str, &SpeakerStats)> = self
            .speakers
            .iter()
            .map(|(label, stats)| (label.as_str(), stats))
            .collect();
        // Stable sort keeps label order among equal word counts
        ranked.sort_by(|a, b| b.1.word_count.cmp(&a.1.word_count));
        ranked
    }

    /// Map raw labels to "Speaker 1".."Speaker N" by rank
    pub fn display_labels(&self) -> BTreeMap<String, String> {
        self.ranked_speakers()
            .into_iter()
            .enumerate()
            .map(|(i, (label, _))| (label.to_string(), format!("Speaker {}", i + 1)))
            .collect()
    }
}
