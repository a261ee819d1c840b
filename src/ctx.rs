use std::path::Path;

use anyhow::{Context, Result};
use whisper_rs::{WhisperContext, WhisperContextParameters};

use crate::logging::init_whisper_logging;
use crate::opts::Precision;

/// Load a Whisper model file and return an initialized `WhisperContext`.
///
/// Why this exists:
/// - We centralize model loading in one place so error handling and the
///   precision policy stay consistent between the runner and the verifier.
pub fn get_context(model_path: &Path, precision: Precision) -> Result<WhisperContext> {
    // whisper.cpp logs a lot during model load; keep it quiet so our own
    // diagnostics remain readable. Idempotent, safe to call multiple times.
    init_whisper_logging();

    let mut ctx_params = WhisperContextParameters::default();
    if precision == Precision::Full {
        // The GPU paths run reduced precision; CPU inference stays full
        // precision, which is what callers asking for `Full` want.
        ctx_params.use_gpu(false);
    }

    let path = model_path
        .to_str()
        .with_context(|| format!("model path is not valid UTF-8: {}", model_path.display()))?;

    let ctx = WhisperContext::new_with_params(path, ctx_params)
        .with_context(|| format!("failed to load model from path: {path}"))?;

    Ok(ctx)
}
