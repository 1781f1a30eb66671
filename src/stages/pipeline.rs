use tracing::info;

use crate::config::MergeConfig;
use crate::models::{MergedTranscript, SpeakerTurn, TranscriptSegment};

use super::{
    aggregate_speakers, assign_fallback_speaker, attribute_speakers, consolidate_segments,
    full_transcript,
};

/// Where speaker labels come from for a merge
#[derive(Debug, Clone, Copy)]
pub enum SpeakerSource<'a> {
    /// Turns produced by the diarization collaborator
    Diarized(&'a [SpeakerTurn]),
    /// Diarization skipped or unavailable; use the fallback speaker
    Skipped,
}

impl<'a> From<Option<&'a [SpeakerTurn]>> for SpeakerSource<'a> {
    fn from(turns: Option<&'a [SpeakerTurn]>) -> Self {
        match turns {
            Some(turns) => SpeakerSource::Diarized(turns),
            None => SpeakerSource::Skipped,
        }
    }
}

impl SpeakerSource<'_> {
    pub fn is_diarized(&self) -> bool {
        matches!(self, SpeakerSource::Diarized(_))
    }
}

/// Run attribution, consolidation and aggregation over one recording
pub fn merge_transcript(
    segments: &[TranscriptSegment],
    source: SpeakerSource<'_>,
    config: &MergeConfig,
) -> MergedTranscript {
    let attributed = match source {
        SpeakerSource::Diarized(turns) => {
            attribute_speakers(segments, turns, &config.unknown_label)
        }
        SpeakerSource::Skipped => assign_fallback_speaker(segments, &config.fallback_speaker),
    };

    let consolidated = consolidate_segments(&attributed);
    let aggregated = aggregate_speakers(consolidated, config.precision);
    let full_transcript = full_transcript(&aggregated.segments);

    info!(
        "Merged transcript: {} segments, {} speakers, {} chars",
        aggregated.segments.len(),
        aggregated.speakers.len(),
        full_transcript.chars().count()
    );

    MergedTranscript {
        segments: aggregated.segments,
        speakers: aggregated.speakers,
        full_transcript,
    }
}
