use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{DiarizationOutput, TranscriptionOutput};

/// Parse a transcription collaborator output file
pub fn parse_transcription_file(path: &Path) -> Result<TranscriptionOutput> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_transcription_json(&content)
}

/// Parse transcription output, skipping any non-JSON lines printed around it
pub fn parse_transcription_json(content: &str) -> Result<TranscriptionOutput> {
    parse_payload(content, '{').context("Failed to parse transcription JSON")
}

/// Parse a diarization collaborator output file
pub fn parse_diarization_file(path: &Path) -> Result<DiarizationOutput> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_diarization_json(&content)
}

/// Parse diarization output, skipping any non-JSON lines printed around it
pub fn parse_diarization_json(content: &str) -> Result<DiarizationOutput> {
    parse_payload(content, '[').context("Failed to parse diarization JSON")
}

/// Decode the first JSON value in collaborator stdout
///
/// Each line starting with `opener` is tried in order. The value may span
/// several lines, and anything printed after it is ignored.
fn parse_payload<T: DeserializeOwned>(content: &str, opener: char) -> Result<T> {
    let mut last_error = None;

    for offset in payload_offsets(content, opener) {
        match serde_json::Deserializer::from_str(&content[offset..])
            .into_iter::<T>()
            .next()
        {
            Some(Ok(value)) => return Ok(value),
            Some(Err(e)) => {
                debug!("Candidate payload at byte {} rejected: {}", offset, e);
                last_error = Some(e);
            }
            None => {}
        }
    }

    match last_error {
        Some(e) => Err(e.into()),
        None => bail!("No JSON payload starting with '{}' found", opener),
    }
}

/// Byte offsets of every line whose first non-blank character is `opener`
fn payload_offsets(content: &str, opener: char) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut line_start = 0;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with(opener) {
            offsets.push(line_start + (line.len() - trimmed.len()));
        }
        line_start += line.len();
    }

    offsets
}
