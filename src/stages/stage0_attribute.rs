use tracing::{debug, info, warn};

use crate::models::{overlap, AttributedSegment, SpeakerTurn, TranscriptSegment};

/// Execute Stage 0: Speaker attribution
///
/// Each segment takes the label of the turn it overlaps the most. Ties go to
/// the first turn in scan order (strict `>`), which may be an artifact of
/// iteration order rather than a deliberate policy. Segments that overlap no
/// turn by more than zero get `unknown_label`.
pub fn attribute_speakers(
    segments: &[TranscriptSegment],
    turns: &[SpeakerTurn],
    unknown_label: &str,
) -> Vec<AttributedSegment> {
    let malformed_turns = turns.iter().filter(|t| t.end < t.start).count();
    let malformed_segments = segments.iter().filter(|s| s.end < s.start).count();
    if malformed_turns + malformed_segments > 0 {
        warn!(
            "{} speaker turns and {} segments have end < start; treated as zero-width",
            malformed_turns, malformed_segments
        );
    }

    let attributed: Vec<AttributedSegment> = segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let speaker = best_turn(segment, turns)
                .map(|turn| turn.speaker.as_str())
                .unwrap_or(unknown_label);
            debug!(
                "segment {} [{:.2}, {:.2}] -> {}",
                i, segment.start, segment.end, speaker
            );
            segment.with_speaker(speaker)
        })
        .collect();

    let unknown = attributed.iter().filter(|s| s.speaker == unknown_label).count();
    info!(
        "Attributed {} segments against {} turns ({} unmatched)",
        attributed.len(),
        turns.len(),
        unknown
    );

    attributed
}

/// Bypass attribution: label every segment with a single fallback speaker
pub fn assign_fallback_speaker(
    segments: &[TranscriptSegment],
    fallback_speaker: &str,
) -> Vec<AttributedSegment> {
    info!(
        "Diarization skipped; assigning {} to {} segments",
        fallback_speaker,
        segments.len()
    );
    segments
        .iter()
        .map(|segment| segment.with_speaker(fallback_speaker))
        .collect()
}

/// Find the turn with the strictly largest positive overlap
fn best_turn<'a>(segment: &TranscriptSegment, turns: &'a [SpeakerTurn]) -> Option<&'a SpeakerTurn> {
    let mut best = None;
    let mut best_overlap = 0.0;

    for turn in turns {
        let amount = overlap(segment.start, segment.end, turn.start, turn.end);
        if amount > best_overlap {
            best_overlap = amount;
            best = Some(turn);
        }
    }

    best
}
