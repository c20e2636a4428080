//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use walkdir::WalkDir;

use crate::alignment::{detect_breaks, detect_regions, load_notes, save_notes, Aligner};
use crate::codec::{AudioDecoder, WavDecoder};
use crate::config::EditConfig;
use crate::engine::io::{read_audio_bytes, write_wav_file};
use crate::error::{EditError, Result};
use crate::tempo::estimate_bpm;
use crate::timeline::{TimeRange, TimelineEditor};

/// Which single-range edit to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEdit {
    Cut,
    InsertSilence,
    Remove,
}

fn editor(config: &EditConfig) -> TimelineEditor {
    TimelineEditor::new(WavDecoder::new()).with_format(config.output_format)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print basic facts about an audio file.
pub fn info(input: &Path) -> Result<()> {
    let audio = WavDecoder::new().decode(&read_audio_bytes(input)?)?;

    println!("File: {}", input.display());
    println!("Channels: {}", audio.channels());
    println!("Sample rate: {} Hz", audio.sample_rate());
    println!("Frames: {}", audio.len());
    println!("Duration: {:.3}s", audio.duration_secs());

    Ok(())
}

/// Apply a single-range edit to a file.
pub fn edit_range(
    config: &EditConfig,
    edit: RangeEdit,
    input: &Path,
    output: &Path,
    start: f64,
    end: f64,
) -> Result<()> {
    info!("{:?} {:.3}s..{:.3}s: {}", edit, start, end, input.display());

    let editor = editor(config);
    let bytes = read_audio_bytes(input)?;
    let edited = match edit {
        RangeEdit::Cut => editor.cut(&bytes, start, end)?,
        RangeEdit::InsertSilence => editor.insert_silence(&bytes, start, end)?,
        RangeEdit::Remove => editor.remove_slice(&bytes, start, end)?,
    };
    write_wav_file(output, &edited)?;

    println!("Written: {}", output.display());
    Ok(())
}

/// Remove several ranges from a file.
pub fn remove_slices(
    config: &EditConfig,
    input: &Path,
    output: &Path,
    ranges: &[TimeRange],
) -> Result<()> {
    info!("Removing {} ranges from: {}", ranges.len(), input.display());

    let edited = editor(config).remove_slices(&read_audio_bytes(input)?, ranges)?;
    write_wav_file(output, &edited)?;

    println!("Written: {}", output.display());
    Ok(())
}

/// Print detected breaks as JSON.
pub fn detect_breaks_cmd(config: &EditConfig, notes: &Path, min_gap: Option<f64>) -> Result<()> {
    let min_gap = min_gap.unwrap_or(config.min_break_secs);
    let breaks = detect_breaks(&load_notes(notes)?, min_gap);
    info!("Found {} breaks of at least {:.2}s", breaks.len(), min_gap);
    print_json(&breaks)
}

/// Print regions of continuous playing as JSON.
pub fn regions(
    config: &EditConfig,
    notes: &Path,
    max_silence: Option<f64>,
    min_duration: Option<f64>,
) -> Result<()> {
    let regions = detect_regions(
        &load_notes(notes)?,
        max_silence.unwrap_or(config.region_max_silence_secs),
        min_duration.unwrap_or(config.region_min_duration_secs),
    );
    info!("Found {} playing regions", regions.len());
    print_json(&regions)
}

/// Cut time from the start of notes and audio.
pub fn cut_start(
    config: &EditConfig,
    notes: &Path,
    audio: &Path,
    seconds: f64,
    out_notes: &Path,
    out_audio: &Path,
) -> Result<()> {
    info!("Cutting {:.3}s from start of: {}", seconds, audio.display());

    let aligner = Aligner::new(editor(config));
    let result = aligner.cut_start(&load_notes(notes)?, &read_audio_bytes(audio)?, seconds)?;

    save_notes(out_notes, &result.notes)?;
    write_wav_file(out_audio, &result.audio)?;

    println!("Written: {} and {}", out_notes.display(), out_audio.display());
    Ok(())
}

/// Remove breaks from notes and audio.
pub fn cut_breaks(
    config: &EditConfig,
    notes: &Path,
    audio: &Path,
    breaks: Option<&Path>,
    min_gap: Option<f64>,
    out_notes: &Path,
    out_audio: &Path,
) -> Result<()> {
    let notes = load_notes(notes)?;
    let breaks: Vec<TimeRange> = match breaks {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => detect_breaks(&notes, min_gap.unwrap_or(config.min_break_secs)),
    };
    info!("Removing {} breaks from: {}", breaks.len(), audio.display());

    let aligner = Aligner::new(editor(config));
    let result = aligner.cut_breaks(&notes, &read_audio_bytes(audio)?, &breaks)?;

    save_notes(out_notes, &result.notes)?;
    write_wav_file(out_audio, &result.audio)?;

    println!("Written: {} and {}", out_notes.display(), out_audio.display());
    Ok(())
}

/// Print a tempo estimate as JSON.
pub fn tempo(config: &EditConfig, notes: &Path, target_bpm: Option<f64>) -> Result<()> {
    let estimate = estimate_bpm(&load_notes(notes)?, target_bpm.or(config.target_bpm));
    match estimate.median {
        Some(bpm) => info!("Estimated tempo: {:.1} BPM", bpm),
        None => warn!("Not enough accented notes to estimate a tempo"),
    }
    print_json(&estimate)
}

/// Outcome of a batch run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Recordings trimmed and written
    pub processed: Vec<PathBuf>,
    /// Recordings without a notes file next to them
    pub skipped: Vec<PathBuf>,
    /// Recordings that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

/// Trim breaks from every `<name>.wav` with a `<name>.json` beside it
///
/// Outputs keep their path relative to `input_dir` under `output_dir`. An
/// `output_dir` nested inside `input_dir` is not walked. A failing recording
/// is reported and does not stop the run.
///
/// # Errors
/// * `FileNotFound` - If `input_dir` is not a directory
/// * `ProcessingError` - If both directories are the same
pub fn batch_trim<D: AudioDecoder>(
    aligner: &Aligner<D>,
    input_dir: &Path,
    output_dir: &Path,
    min_gap: f64,
) -> Result<BatchReport> {
    if !input_dir.is_dir() {
        return Err(EditError::FileNotFound {
            path: input_dir.display().to_string(),
            source: None,
        });
    }
    fs::create_dir_all(output_dir)?;
    let input_dir = input_dir.canonicalize()?;
    let output_dir = output_dir.canonicalize()?;
    if input_dir == output_dir {
        return Err(EditError::ProcessingError {
            reason: format!(
                "output directory {} must differ from the input directory",
                output_dir.display()
            ),
        });
    }

    let mut report = BatchReport::default();
    let walker = WalkDir::new(&input_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.path().starts_with(&output_dir));

    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        let wav = entry.path();
        if !entry.file_type().is_file() || wav.extension().map_or(true, |ext| ext != "wav") {
            continue;
        }

        let notes_path = wav.with_extension("json");
        if !notes_path.exists() {
            warn!("No notes for {}, skipping", wav.display());
            report.skipped.push(wav.to_path_buf());
            continue;
        }

        let relative = wav.strip_prefix(&input_dir).unwrap_or(wav);
        let out_wav = output_dir.join(relative);
        let out_notes = out_wav.with_extension("json");

        let outcome = load_notes(&notes_path).and_then(|notes| {
            let result = aligner.trim_breaks(&notes, &read_audio_bytes(wav)?, min_gap)?;
            write_wav_file(&out_wav, &result.audio)?;
            save_notes(&out_notes, &result.notes)
        });

        match outcome {
            Ok(()) => {
                info!("Trimmed {}", wav.display());
                report.processed.push(wav.to_path_buf());
            }
            Err(e) => {
                warn!("Failed to trim {}: {}", wav.display(), e);
                report.failed.push((wav.to_path_buf(), e.to_string()));
            }
        }
    }

    Ok(report)
}

/// Run a batch trim and print a summary.
pub fn batch(
    config: &EditConfig,
    input_dir: &Path,
    output_dir: &Path,
    min_gap: Option<f64>,
) -> Result<()> {
    info!("Batch trimming: {}", input_dir.display());

    let aligner = Aligner::new(editor(config));
    let report = batch_trim(
        &aligner,
        input_dir,
        output_dir,
        min_gap.unwrap_or(config.min_break_secs),
    )?;

    println!(
        "Processed: {} | Skipped: {} | Failed: {}",
        report.processed.len(),
        report.skipped.len(),
        report.failed.len()
    );
    for (path, reason) in &report.failed {
        println!("  {}: {}", path.display(), reason);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::Note;
    use crate::codec::{encode, WavFormat};
    use crate::engine::io::generate_ramp;
    use tempfile::tempdir;

    fn write_recording(dir: &Path, name: &str, notes: &[Note]) {
        let audio = generate_ramp(1, 1000, 100);
        write_wav_file(
            &dir.join(format!("{}.wav", name)),
            &encode(&audio, WavFormat::Float32).unwrap(),
        )
        .unwrap();
        save_notes(&dir.join(format!("{}.json", name)), notes).unwrap();
    }

    #[test]
    fn test_batch_trim_processes_pairs() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();

        write_recording(
            input.path(),
            "take1",
            &[Note::new(0.0, 0.5), Note::new(1.0, 1.5), Note::new(6.0, 6.5)],
        );
        // No notes beside this one
        write_wav_file(
            &input.path().join("lonely.wav"),
            &encode(&generate_ramp(1, 10, 10), WavFormat::Float32).unwrap(),
        )
        .unwrap();

        let aligner: Aligner = Aligner::default();
        let report = batch_trim(&aligner, input.path(), output.path(), 2.0).unwrap();

        assert_eq!(report.processed.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.failed.is_empty());

        let notes = load_notes(&output.path().join("take1.json")).unwrap();
        let starts: Vec<f64> = notes.iter().map(|n| n.start).collect();
        assert_eq!(starts, vec![0.0, 1.0, 1.0]);

        let audio = WavDecoder::new()
            .decode(&read_audio_bytes(&output.path().join("take1.wav")).unwrap())
            .unwrap();
        assert_eq!(audio.len(), 500);
    }

    #[test]
    fn test_batch_trim_reports_failures() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();

        fs::write(input.path().join("broken.wav"), b"not a wav").unwrap();
        save_notes(&input.path().join("broken.json"), &[Note::new(0.0, 1.0)]).unwrap();

        let aligner: Aligner = Aligner::default();
        let report = batch_trim(&aligner, input.path(), output.path(), 2.0).unwrap();

        assert!(report.processed.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].1.contains("decode"));
    }

    #[test]
    fn test_batch_trim_skips_nested_output_dir() {
        let input = tempdir().unwrap();
        let output = input.path().join("trimmed");

        write_recording(
            input.path(),
            "take1",
            &[Note::new(0.0, 0.5), Note::new(1.0, 1.5), Note::new(6.0, 6.5)],
        );

        let aligner: Aligner = Aligner::default();
        let report = batch_trim(&aligner, input.path(), &output, 2.0).unwrap();
        assert_eq!(report.processed.len(), 1);
        assert!(output.join("take1.wav").exists());
        assert!(!output.join("trimmed").exists());

        // Running again must not pick up the previous run's outputs
        let again = batch_trim(&aligner, input.path(), &output, 2.0).unwrap();
        assert_eq!(again.processed.len(), 1);
        assert!(again.skipped.is_empty());
    }

    #[test]
    fn test_batch_trim_rejects_same_dirs() {
        let dir = tempdir().unwrap();
        let aligner: Aligner = Aligner::default();
        let err = batch_trim(&aligner, dir.path(), dir.path(), 2.0).unwrap_err();
        assert_eq!(err.error_code(), "PROCESSING_ERROR");

        let missing = dir.path().join("missing");
        let err = batch_trim(&aligner, &missing, &dir.path().join("out"), 2.0).unwrap_err();
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    }

    #[test]
    fn test_edit_range_writes_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out").join("cut.wav");
        write_wav_file(
            &input,
            &encode(&generate_ramp(2, 100, 10), WavFormat::Float32).unwrap(),
        )
        .unwrap();

        let config = EditConfig {
            output_format: WavFormat::Int16,
            ..EditConfig::default()
        };
        edit_range(&config, RangeEdit::Cut, &input, &output, 1.0, 2.0).unwrap();

        let bytes = read_audio_bytes(&output).unwrap();
        assert_eq!(bytes.len(), 44 + 10 * 2 * 2);
    }
}
