use thiserror::Error;

/// Label for segments that overlap no speaker turn
pub const UNKNOWN_SPEAKER: &str = "UNKNOWN";

/// Label applied to every segment when diarization is skipped
pub const FALLBACK_SPEAKER: &str = "SPEAKER_00";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A label was configured as an empty string
    #[error("{0} must not be empty")]
    EmptyLabel(&'static str),

    /// Precision beyond what an f64 can represent meaningfully
    #[error("precision {0} exceeds the maximum of {max} decimal places", max = MAX_PRECISION)]
    PrecisionTooLarge(u32),
}

/// Largest supported number of decimal places
pub const MAX_PRECISION: u32 = 12;

/// Configuration for the merge pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct MergeConfig {
    /// Sentinel for segments with no overlapping turn
    pub unknown_label: String,
    /// Label used for all segments when diarization is unavailable
    pub fallback_speaker: String,
    /// Decimal places kept on timestamps and durations
    pub precision: u32,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            unknown_label: UNKNOWN_SPEAKER.to_string(),
            fallback_speaker: FALLBACK_SPEAKER.to_string(),
            precision: 2,
        }
    }
}

impl MergeConfig {
    /// Create config from defaults overridden by environment variables
    ///
    /// Reads `TURNMERGE_UNKNOWN_LABEL`, `TURNMERGE_FALLBACK_SPEAKER` and
    /// `TURNMERGE_PRECISION`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(label) = lookup("TURNMERGE_UNKNOWN_LABEL") {
            config.unknown_label = label;
        }
        if let Some(label) = lookup("TURNMERGE_FALLBACK_SPEAKER") {
            config.fallback_speaker = label;
        }
        if let Some(value) = lookup("TURNMERGE_PRECISION") {
            config.precision = value.trim().parse::<u32>().map_err(|e| ConfigError::InvalidEnv {
                name: "TURNMERGE_PRECISION",
                value: value.clone(),
                reason: e.to_string(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would produce unlabeled segments
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unknown_label.is_empty() {
            return Err(ConfigError::EmptyLabel("unknown_label"));
        }
        if self.fallback_speaker.is_empty() {
            return Err(ConfigError::EmptyLabel("fallback_speaker"));
        }
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::PrecisionTooLarge(self.precision));
        }
        Ok(())
    }
}
