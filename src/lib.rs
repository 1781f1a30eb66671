pub mod config;
pub mod io;
pub mod models;
pub mod stages;

pub use config::{ConfigError, MergeConfig, FALLBACK_SPEAKER, UNKNOWN_SPEAKER};
pub use io::{
    parse_diarization_file, parse_diarization_json, parse_transcription_file,
    parse_transcription_json, HumanTranscript, MachineTranscript, TranscriptMetadata,
};
pub use models::{
    AttributedSegment, ConsolidatedSegment, DiarizationOutput, MergedTranscript, SpeakerStats,
    SpeakerTurn, TranscriptSegment, TranscriptionOutput,
};
pub use stages::{
    aggregate_speakers, assign_fallback_speaker, attribute_speakers, consolidate_segments,
    dominant_speaker_view, execute_stage3, labeled_transcript, merge_transcript, SpeakerSource,
    Stage3Config,
};
