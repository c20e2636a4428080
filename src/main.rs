//! Practice Edit CLI
//!
//! Command-line interface for trimming and aligning practice recordings.

use anyhow::Context;
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use practice_edit::cli::commands::{self, RangeEdit};
use practice_edit::cli::{Cli, Commands};
use practice_edit::config::EditConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Practice Edit v{}", env!("CARGO_PKG_VERSION"));

    let mut config = EditConfig::load_or_default(cli.config.as_deref())
        .context("failed to load config")?;
    if let Some(format) = cli.format {
        config.output_format = format;
    }

    handle_command(&config, cli.command)
}

fn handle_command(config: &EditConfig, cmd: Commands) -> anyhow::Result<()> {
    let result = match cmd {
        Commands::Info { input } => commands::info(&input),
        Commands::Cut {
            input,
            output,
            start,
            end,
        } => commands::edit_range(config, RangeEdit::Cut, &input, &output, start, end),
        Commands::InsertSilence {
            input,
            output,
            start,
            end,
        } => commands::edit_range(config, RangeEdit::InsertSilence, &input, &output, start, end),
        Commands::Remove {
            input,
            output,
            start,
            end,
        } => commands::edit_range(config, RangeEdit::Remove, &input, &output, start, end),
        Commands::RemoveSlices {
            input,
            output,
            ranges,
        } => commands::remove_slices(config, &input, &output, &ranges),
        Commands::DetectBreaks { notes, min_gap } => {
            commands::detect_breaks_cmd(config, &notes, min_gap)
        }
        Commands::Regions {
            notes,
            max_silence,
            min_duration,
        } => commands::regions(config, &notes, max_silence, min_duration),
        Commands::CutStart {
            notes,
            audio,
            seconds,
            out_notes,
            out_audio,
        } => commands::cut_start(config, &notes, &audio, seconds, &out_notes, &out_audio),
        Commands::CutBreaks {
            notes,
            audio,
            breaks,
            min_gap,
            out_notes,
            out_audio,
        } => commands::cut_breaks(
            config,
            &notes,
            &audio,
            breaks.as_deref(),
            min_gap,
            &out_notes,
            &out_audio,
        ),
        Commands::Tempo { notes, target_bpm } => commands::tempo(config, &notes, target_bpm),
        Commands::Batch {
            input_dir,
            output_dir,
            min_gap,
        } => commands::batch(config, &input_dir, &output_dir, min_gap),
    };

    result.map_err(|e| {
        let hints = e.recovery_suggestions();
        let err = anyhow::Error::new(e);
        if hints.is_empty() {
            err
        } else {
            err.context(format!("hint: {}", hints.join("; ")))
        }
    })
}
