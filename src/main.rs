use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use turnmerge::{
    dominant_speaker_view, execute_stage3, merge_transcript, parse_diarization_file,
    parse_transcription_file, DiarizationOutput, MergeConfig, SpeakerSource, Stage3Config,
    TranscriptMetadata,
};

#[derive(Parser)]
#[command(name = "turnmerge")]
#[command(author, version, about = "Merge transcript segments with speaker diarization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Attribute speakers, consolidate runs and write the merged transcript
    Merge {
        /// Transcription output ({"segments": [...], "duration": ...})
        #[arg(short, long)]
        transcript: PathBuf,

        /// Diarization output ([{"start", "end", "speaker"}, ...])
        #[arg(short, long)]
        diarization: Option<PathBuf>,

        /// Skip diarization and label everything with the fallback speaker
        #[arg(long, conflicts_with = "diarization")]
        no_diarize: bool,

        /// Output file for machine-readable transcript (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for human-readable transcript (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Use ranked "Speaker N" names in the human-readable output
        #[arg(long)]
        ranked_names: bool,

        /// Label used when diarization is skipped
        #[arg(long)]
        fallback_speaker: Option<String>,

        /// Decimal places for timestamps and durations
        #[arg(long)]
        precision: Option<u32>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print speaker statistics without writing any files
    Analyze {
        /// Transcription output ({"segments": [...], "duration": ...})
        #[arg(short, long)]
        transcript: PathBuf,

        /// Diarization output ([{"start", "end", "speaker"}, ...])
        #[arg(short, long)]
        diarization: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            transcript,
            diarization,
            no_diarize,
            output,
            human_readable,
            ranked_names,
            fallback_speaker,
            precision,
            verbose,
        } => {
            setup_logging(verbose);
            let mut config = MergeConfig::from_env().context("Invalid configuration")?;
            if let Some(label) = fallback_speaker {
                config.fallback_speaker = label;
            }
            if let Some(precision) = precision {
                config.precision = precision;
            }
            config.validate().context("Invalid configuration")?;

            merge_command(
                transcript,
                diarization,
                no_diarize,
                output,
                human_readable,
                ranked_names,
                &config,
            )
        }
        Commands::Analyze {
            transcript,
            diarization,
            verbose,
        } => {
            setup_logging(verbose);
            let config = MergeConfig::from_env().context("Invalid configuration")?;
            analyze_command(transcript, diarization, &config)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_diarization(path: Option<&PathBuf>, no_diarize: bool) -> Result<Option<DiarizationOutput>> {
    match path {
        Some(path) => {
            info!("Loading diarization from {:?}", path);
            let output =
                parse_diarization_file(path).context("Failed to parse diarization output")?;
            info!(
                "Loaded {} turns, {} speakers",
                output.turns.len(),
                output.speakers().len()
            );
            Ok(Some(output))
        }
        None => {
            if !no_diarize {
                warn!("No diarization output provided. Running without diarization.");
            }
            Ok(None)
        }
    }
}

fn merge_command(
    transcript: PathBuf,
    diarization: Option<PathBuf>,
    no_diarize: bool,
    output: PathBuf,
    human_readable: Option<PathBuf>,
    ranked_names: bool,
    config: &MergeConfig,
) -> Result<()> {
    info!("Loading transcript from {:?}", transcript);
    let transcription =
        parse_transcription_file(&transcript).context("Failed to parse transcription output")?;
    info!("Loaded {} transcript segments", transcription.segments.len());

    let diarization = load_diarization(diarization.as_ref(), no_diarize)?;
    let source = SpeakerSource::from(diarization.as_ref().map(|d| d.turns.as_slice()));

    let merged = merge_transcript(&transcription.segments, source, config);

    let metadata = TranscriptMetadata::new(&merged, transcription.duration, source.is_diarized());
    let stage3_config = Stage3Config {
        ranked_names,
        ..Default::default()
    };
    let result = execute_stage3(
        &merged,
        metadata,
        Some(output.as_path()),
        human_readable.as_deref(),
        &stage3_config,
    )?;

    if let Some(machine_path) = result.machine_path {
        info!("Output written to {:?}", machine_path);
    }
    if let Some(human_path) = result.human_path {
        info!("Human-readable output written to {:?}", human_path);
    }

    info!(
        "Complete: {} segments, {} speakers",
        merged.segments.len(),
        merged.speaker_count()
    );

    Ok(())
}

fn analyze_command(
    transcript: PathBuf,
    diarization: Option<PathBuf>,
    config: &MergeConfig,
) -> Result<()> {
    info!("Analyzing transcript from {:?}", transcript);
    let transcription =
        parse_transcription_file(&transcript).context("Failed to parse transcription output")?;
    let diarization = load_diarization(diarization.as_ref(), false)?;
    let source = SpeakerSource::from(diarization.as_ref().map(|d| d.turns.as_slice()));

    let merged = merge_transcript(&transcription.segments, source, config);

    println!("Transcript Analysis");
    println!("===================");
    println!("Input segments: {}", transcription.segments.len());
    println!("Speaker runs: {}", merged.segments.len());
    println!("Speakers: {}", merged.speaker_count());
    if let Some(duration) = transcription.duration {
        println!("Audio duration: {:.1}s", duration);
    }
    println!();

    println!("Speaker Statistics");
    println!("------------------");
    let names = merged.display_labels();
    for (label, stats) in merged.ranked_speakers() {
        let runs = merged.segments.iter().filter(|s| s.speaker == label).count();
        println!(
            "{} ({}): {} words, {:.2}s, {} runs",
            names.get(label).map(String::as_str).unwrap_or(label),
            label,
            stats.word_count,
            stats.duration,
            runs
        );
    }
    println!();

    println!("Transcript");
    println!("----------");
    println!("{}", dominant_speaker_view(&merged));

    Ok(())
}
