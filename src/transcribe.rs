//! Single-shot transcription: audio file in, transcript file out.
//!
//! This is the core of the `dictate` binary. The flow is strictly linear:
//!
//! validate input → ensure output dir → load model → transcribe → write output
//!
//! Any failure stops the run; there is no retry and no partial-result
//! recovery. The output file is only opened after transcription fully
//! completes, so an aborted run leaves no partial transcript behind.
//!
//! All diagnostics go through `tracing` (stderr); stdout is left untouched so
//! a spawning backend can reserve it for structured output later.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext};

use crate::ctx::get_context;
use crate::error::Error;
use crate::models;
use crate::opts::TranscribeOpts;
use crate::wav::samples_from_wav_file;

/// Transcribe `audio_path` and write the transcript text to `output_path`.
///
/// The transcript is written verbatim (UTF-8, no added formatting),
/// overwriting any existing file. Missing parent directories of
/// `output_path` are created.
pub fn transcribe_file(audio_path: &Path, output_path: &Path, opts: &TranscribeOpts) -> Result<()> {
    // Validate the input before touching anything else: a missing audio file
    // must not leave partial output or freshly created directories behind.
    if !audio_path.is_file() {
        return Err(Error::AudioNotFound {
            path: audio_path.to_owned(),
        }
        .into());
    }

    let metadata = fs::metadata(audio_path)
        .with_context(|| format!("failed to stat audio file: {}", audio_path.display()))?;
    info!("audio file verified: {}", audio_path.display());
    info!("file size: {} bytes", metadata.len());

    ensure_output_dir(output_path)?;

    let model_dir = match &opts.model_dir {
        Some(dir) => dir.clone(),
        None => models::model_dir(),
    };
    let model_path = models::resolve_in(&model_dir, &opts.model)?;

    info!("loading whisper model '{}'", opts.model);
    let ctx = get_context(&model_path, opts.precision)?;

    info!("transcribing {}...", audio_path.display());
    let (samples, _spec) = samples_from_wav_file(audio_path)?;
    let text = transcribe_samples(&ctx, &samples, opts)?;

    fs::write(output_path, text.as_bytes())
        .with_context(|| format!("failed to write transcript: {}", output_path.display()))?;

    info!("transcription completed: {}", output_path.display());
    info!("transcript length: {} characters", text.chars().count());
    Ok(())
}

/// Run Whisper over decoded samples and return the joined transcript text.
///
/// Segment texts are concatenated exactly as Whisper produces them (including
/// the leading space each segment carries), matching the whole-result text a
/// caller would expect.
pub fn transcribe_samples(
    ctx: &WhisperContext,
    samples: &[f32],
    opts: &TranscribeOpts,
) -> Result<String> {
    let mut state = ctx
        .create_state()
        .context("failed to create whisper state")?;

    state
        .full(full_params(opts), samples)
        .context("whisper inference failed")?;

    let mut text = String::new();
    for segment in state.as_iter() {
        let piece = segment
            .to_str()
            .context("failed to read segment text")?
            .to_owned();

        if opts.verbose {
            info!(
                "[{:>7.2}s -> {:>7.2}s]{piece}",
                segment.start_timestamp() as f32 / 1000.0,
                segment.end_timestamp() as f32 / 1000.0,
            );
        } else {
            debug!("segment: {piece}");
        }

        text.push_str(&piece);
    }

    Ok(text)
}

fn full_params<'a>(opts: &'a TranscribeOpts) -> FullParams<'a, 'a> {
    let mut params = FullParams::new(SamplingStrategy::BeamSearch {
        beam_size: 5,
        patience: 1.0,
    });

    params.set_n_threads(num_cpus::get() as i32);
    params.set_translate(false);
    params.set_language(Some(opts.language.as_str()));
    params.set_no_context(true);
    params.set_single_segment(false);
    params.set_print_progress(false);
    params.set_print_special(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    if opts.verbose {
        // whisper.cpp reports progress as a whole percentage.
        params.set_progress_callback_safe(|progress: i32| {
            info!("progress: {progress}%");
        });
    }

    params
}

fn ensure_output_dir(output_path: &Path) -> Result<()> {
    let Some(parent) = output_path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }

    fs::create_dir_all(parent)
        .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
    info!("created output directory: {}", parent.display());
    Ok(())
}
