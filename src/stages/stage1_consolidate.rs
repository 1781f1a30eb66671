use tracing::info;

use crate::models::{AttributedSegment, ConsolidatedSegment};

/// Execute Stage 1: Run-length consolidation
///
/// Merges each maximal run of consecutive same-speaker segments into one.
/// The merged segment starts at the run's first start, ends at its last end,
/// and carries the run's texts joined with a single space.
pub fn consolidate_segments(segments: &[AttributedSegment]) -> Vec<ConsolidatedSegment> {
    let mut consolidated: Vec<ConsolidatedSegment> = Vec::new();
    let mut current: Option<ConsolidatedSegment> = None;

    for segment in segments {
        if let Some(open) = current.as_mut() {
            if open.speaker == segment.speaker {
                open.end = segment.end;
                open.text.push(' ');
                open.text.push_str(&segment.text);
                continue;
            }
        }

        // Speaker changed (or first segment): close the open run
        if let Some(closed) = current.replace(segment.clone()) {
            consolidated.push(closed);
        }
    }

    // Close the final run
    if let Some(closed) = current {
        consolidated.push(closed);
    }

    info!(
        "Consolidated {} segments into {} speaker runs",
        segments.len(),
        consolidated.len()
    );

    consolidated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TranscriptSegment;

    fn seg(start: f64, end: f64, text: &str, speaker: &str) -> AttributedSegment {
        TranscriptSegment::new(start, end, text).with_speaker(speaker)
    }

    fn joined(segments: &[AttributedSegment]) -> String {
        segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_consolidate_empty() {
        assert!(consolidate_segments(&[]).is_empty());
    }

    #[test]
    fn test_consolidate_touching_same_speaker() {
        let input = vec![seg(0.0, 2.0, "hello", "A"), seg(2.0, 4.0, "world", "A")];

        let output = consolidate_segments(&input);

        assert_eq!(output, vec![seg(0.0, 4.0, "hello world", "A")]);
    }

    #[test]
    fn test_consolidate_alternating_speakers() {
        let input = vec![
            seg(0.0, 1.0, "one", "A"),
            seg(1.0, 2.0, "two", "A"),
            seg(2.0, 3.0, "three", "B"),
            seg(3.5, 4.0, "four", "A"),
            seg(4.0, 5.0, "five", "A"),
        ];

        let output = consolidate_segments(&input);

        assert_eq!(
            output,
            vec![
                seg(0.0, 2.0, "one two", "A"),
                seg(2.0, 3.0, "three", "B"),
                seg(3.5, 5.0, "four five", "A"),
            ]
        );
        assert_eq!(joined(&output), joined(&input));
    }

    #[test]
    fn test_consolidate_no_adjacent_duplicates_keeps_length() {
        let input = vec![
            seg(0.0, 1.0, "a", "A"),
            seg(1.0, 2.0, "b", "B"),
            seg(2.0, 3.0, "c", "UNKNOWN"),
        ];

        let output = consolidate_segments(&input);

        assert_eq!(output, input);
    }

    #[test]
    fn test_consolidate_is_idempotent() {
        let input = vec![
            seg(0.0, 1.0, "a", "A"),
            seg(1.0, 2.0, "b", "A"),
            seg(2.0, 3.0, "c", "B"),
            seg(3.0, 3.0, "", "B"),
        ];

        let once = consolidate_segments(&input);
        let twice = consolidate_segments(&once);

        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_consolidate_preserves_text_across_gaps() {
        // Gaps between runs never block a merge; only the label matters
        let input = vec![seg(0.0, 1.0, "before", "A"), seg(10.0, 11.0, "after", "A")];

        let output = consolidate_segments(&input);

        assert_eq!(output, vec![seg(0.0, 11.0, "before after", "A")]);
    }
}
