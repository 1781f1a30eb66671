use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::io::{HumanTranscript, MachineTranscript, TranscriptMetadata};
use crate::models::MergedTranscript;

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct Stage3Config {
    /// Whether to generate machine-readable output
    pub generate_machine: bool,
    /// Whether to generate human-readable output
    pub generate_human: bool,
    /// Replace raw labels with ranked "Speaker N" names in human output
    pub ranked_names: bool,
}

impl Default for Stage3Config {
    fn default() -> Self {
        Self {
            generate_machine: true,
            generate_human: true,
            ranked_names: false,
        }
    }
}

/// Result of Stage 3 rendering
#[derive(Debug)]
pub struct Stage3Result {
    /// Path to machine transcript (if generated)
    pub machine_path: Option<PathBuf>,
    /// Path to human transcript (if generated)
    pub human_path: Option<PathBuf>,
}

/// Execute Stage 3: Rendering
///
/// Produces up to two output views:
/// 1. Machine transcript: JSON with segments, speaker stats and run metadata
/// 2. Human transcript: timestamped text with one block per speaker run
pub fn execute_stage3(
    transcript: &MergedTranscript,
    metadata: TranscriptMetadata,
    machine_output: Option<&Path>,
    human_output: Option<&Path>,
    config: &Stage3Config,
) -> Result<Stage3Result> {
    let mut result = Stage3Result {
        machine_path: None,
        human_path: None,
    };

    if config.generate_machine {
        if let Some(path) = machine_output {
            info!("Writing machine transcript to {:?}", path);
            MachineTranscript::from_transcript(transcript, metadata).write_json(path)?;
            result.machine_path = Some(path.to_path_buf());
        }
    }

    if config.generate_human {
        if let Some(path) = human_output {
            info!("Writing human transcript to {:?}", path);
            let names = transcript.display_labels();
            let human = if config.ranked_names {
                HumanTranscript::with_speaker_names(transcript, &names)
            } else {
                HumanTranscript::new(transcript)
            };
            human.write_file(path)?;
            result.human_path = Some(path.to_path_buf());
        }
    }

    Ok(result)
}

/// One `[label] text` line per segment, optionally with display names
pub fn labeled_transcript(
    transcript: &MergedTranscript,
    names: Option<&BTreeMap<String, String>>,
) -> String {
    transcript
        .segments
        .iter()
        .map(|s| {
            let label = names
                .and_then(|n| n.get(&s.speaker))
                .unwrap_or(&s.speaker);
            format!("[{}] {}", label, s.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain text for single-speaker recordings, ranked labeled lines otherwise
pub fn dominant_speaker_view(transcript: &MergedTranscript) -> String {
    if transcript.speaker_count() <= 1 {
        return transcript.full_transcript.clone();
    }

    let names = transcript.display_labels();
    labeled_transcript(transcript, Some(&names))
}
