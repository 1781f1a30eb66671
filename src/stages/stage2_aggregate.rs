use std::collections::BTreeMap;

use tracing::info;

use crate::models::{ConsolidatedSegment, SpeakerStats};

/// Result of Stage 2 aggregation
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// Segments with start/end rounded to the configured precision
    pub segments: Vec<ConsolidatedSegment>,
    /// Speaker label -> totals (durations rounded)
    pub speakers: BTreeMap<String, SpeakerStats>,
}

/// Execute Stage 2: Per-speaker aggregation
///
/// Word counts and durations are accumulated from the unrounded timestamps;
/// rounding is applied afterwards to both the segments and the durations.
pub fn aggregate_speakers(
    mut segments: Vec<ConsolidatedSegment>,
    precision: u32,
) -> AggregationResult {
    let mut speakers: BTreeMap<String, SpeakerStats> = BTreeMap::new();

    for segment in &segments {
        let stats = speakers.entry(segment.speaker.clone()).or_default();
        stats.word_count += segment.word_count();
        stats.duration += segment.duration();
    }

    for segment in &mut segments {
        segment.start = round_to(segment.start, precision);
        segment.end = round_to(segment.end, precision);
    }

    for stats in speakers.values_mut() {
        stats.duration = round_to(stats.duration, precision);
    }

    info!(
        "Aggregated {} segments across {} speakers",
        segments.len(),
        speakers.len()
    );

    AggregationResult { segments, speakers }
}

/// Space-joined text of all segments, in order
pub fn full_transcript(segments: &[ConsolidatedSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Round to the given number of decimal places
///
/// Rounds the exact stored binary value, so 0.015 (stored just below) gives
/// 0.01, and exact halves such as 0.125 go to the even digit.
pub fn round_to(value: f64, precision: u32) -> f64 {
    format!("{:.*}", precision as usize, value)
        .parse()
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TranscriptSegment;

    fn seg(start: f64, end: f64, text: &str, speaker: &str) -> ConsolidatedSegment {
        TranscriptSegment::new(start, end, text).with_speaker(speaker)
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234, 2), 1.23);
        assert_eq!(round_to(1.236, 2), 1.24);
        assert_eq!(round_to(2.0, 2), 2.0);
        assert_eq!(round_to(1.5, 0), 2.0);
        assert_eq!(round_to(0.12345, 3), 0.123);
    }

    #[test]
    fn test_round_to_uses_stored_value() {
        // 0.015 and 1.005 are stored slightly below the written decimal
        assert_eq!(round_to(0.015, 2), 0.01);
        assert_eq!(round_to(1.005, 2), 1.0);
        // 0.125 is an exact tie and goes to the even digit
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
    }

    #[test]
    fn test_aggregate_speakers() {
        let segments = vec![
            seg(0.0, 2.0, "hello there", "A"),
            seg(2.0, 4.0, "world", "B"),
            seg(4.0, 5.5, "again and again", "A"),
        ];

        let result = aggregate_speakers(segments, 2);

        assert_eq!(result.speakers.len(), 2);
        assert_eq!(result.speakers["A"].word_count, 5);
        assert_eq!(result.speakers["A"].duration, 3.5);
        assert_eq!(result.speakers["B"].word_count, 1);
        assert_eq!(result.speakers["B"].duration, 2.0);
    }

    #[test]
    fn test_aggregate_rounds_after_summing() {
        // Each segment rounds to 0.00 duration on its own, but the sum does not
        let segments = vec![
            seg(0.001, 0.005, "a", "A"),
            seg(1.001, 1.005, "b", "B"),
            seg(2.001, 2.005, "c", "A"),
        ];

        let result = aggregate_speakers(segments, 2);

        assert_eq!(result.speakers["A"].duration, 0.01);
        assert_eq!(result.segments[0].start, 0.0);
        assert_eq!(result.segments[0].end, 0.01);
        assert_eq!(result.segments[1].start, 1.0);
    }

    #[test]
    fn test_aggregate_duration_total_matches_segments() {
        let segments = vec![
            seg(0.0, 1.333, "x", "A"),
            seg(1.333, 2.667, "y z", "B"),
            seg(2.667, 4.111, "w", "C"),
        ];
        let total: f64 = segments.iter().map(|s| s.duration()).sum();

        let result = aggregate_speakers(segments, 2);
        let stats_total: f64 = result.speakers.values().map(|s| s.duration).sum();

        assert!((stats_total - total).abs() <= 0.005 * result.speakers.len() as f64);
    }

    #[test]
    fn test_aggregate_empty_text() {
        let result = aggregate_speakers(vec![seg(0.0, 1.0, "", "A")], 2);

        assert_eq!(result.speakers["A"].word_count, 0);
        assert_eq!(result.speakers["A"].duration, 1.0);
    }

    #[test]
    fn test_aggregate_empty_input() {
        let result = aggregate_speakers(vec![], 2);

        assert!(result.segments.is_empty());
        assert!(result.speakers.is_empty());
    }

    #[test]
    fn test_full_transcript() {
        let segments = vec![seg(0.0, 1.0, "hello", "A"), seg(1.0, 2.0, "world", "B")];
        assert_eq!(full_transcript(&segments), "hello world");
        assert_eq!(full_transcript(&[]), "");
    }
}
