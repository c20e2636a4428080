//! CLI Module
//!
//! Command-line interface for editing practice recordings.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::codec::WavFormat;
use crate::timeline::TimeRange;

/// Practice Edit - trim and align recorded practice sessions
#[derive(Parser, Debug)]
#[command(name = "practice-edit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON config file with editing defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Sample encoding for written WAV files (overrides config)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<WavFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show channel count, sample rate and duration of a WAV file
    #[command(name = "info")]
    Info {
        /// Input audio file
        input: PathBuf,
    },

    /// Keep only the audio between start and end
    #[command(name = "cut")]
    Cut {
        input: PathBuf,
        output: PathBuf,
        #[arg(short, long)]
        start: f64,
        #[arg(short, long)]
        end: f64,
    },

    /// Insert silence between start and end, shifting later audio
    #[command(name = "insert-silence")]
    InsertSilence {
        input: PathBuf,
        output: PathBuf,
        #[arg(short, long)]
        start: f64,
        #[arg(short, long)]
        end: f64,
    },

    /// Remove the audio between start and end
    #[command(name = "remove")]
    Remove {
        input: PathBuf,
        output: PathBuf,
        #[arg(short, long)]
        start: f64,
        #[arg(short, long)]
        end: f64,
    },

    /// Remove several ranges at once
    #[command(name = "remove-slices")]
    RemoveSlices {
        input: PathBuf,
        output: PathBuf,
        /// Range as START:END in seconds (repeatable, ascending)
        #[arg(short, long = "range", value_parser = parse_range, required = true)]
        ranges: Vec<TimeRange>,
    },

    /// Print breaks between note onsets as JSON
    #[command(name = "detect-breaks")]
    DetectBreaks {
        /// Notes JSON file
        notes: PathBuf,
        /// Minimum onset gap in seconds (overrides config)
        #[arg(short, long)]
        min_gap: Option<f64>,
    },

    /// Print regions of continuous playing as JSON
    #[command(name = "regions")]
    Regions {
        /// Notes JSON file
        notes: PathBuf,
        /// Longest tolerated silence inside a region (overrides config)
        #[arg(long)]
        max_silence: Option<f64>,
        /// Shortest region to report (overrides config)
        #[arg(long)]
        min_duration: Option<f64>,
    },

    /// Cut seconds from the start of notes and audio
    #[command(name = "cut-start")]
    CutStart {
        notes: PathBuf,
        audio: PathBuf,
        #[arg(short, long)]
        seconds: f64,
        /// Where to write the shifted notes
        #[arg(long)]
        out_notes: PathBuf,
        /// Where to write the trimmed audio
        #[arg(long)]
        out_audio: PathBuf,
    },

    /// Remove breaks from notes and audio
    #[command(name = "cut-breaks")]
    CutBreaks {
        notes: PathBuf,
        audio: PathBuf,
        /// JSON file with [[start, end], ...] breaks; detected from notes when omitted
        #[arg(short, long)]
        breaks: Option<PathBuf>,
        /// Minimum onset gap when detecting breaks (overrides config)
        #[arg(short, long)]
        min_gap: Option<f64>,
        #[arg(long)]
        out_notes: PathBuf,
        #[arg(long)]
        out_audio: PathBuf,
    },

    /// Estimate tempo from note onsets
    #[command(name = "tempo")]
    Tempo {
        notes: PathBuf,
        /// Tempo the player was asked to play at (overrides config)
        #[arg(short, long)]
        target_bpm: Option<f64>,
    },

    /// Trim breaks from every <name>.wav + <name>.json pair in a directory
    #[command(name = "batch")]
    Batch {
        input_dir: PathBuf,
        output_dir: PathBuf,
        #[arg(short, long)]
        min_gap: Option<f64>,
    },
}

/// Parse `START:END` (seconds) into a range
pub fn parse_range(value: &str) -> std::result::Result<TimeRange, String> {
    let (start, end) = value
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{}'", value))?;
    let start: f64 = start
        .trim()
        .parse()
        .map_err(|e| format!("invalid start '{}': {}", start, e))?;
    let end: f64 = end
        .trim()
        .parse()
        .map_err(|e| format!("invalid end '{}': {}", end, e))?;
    Ok(TimeRange::new(start, end))
}
