use std::path::PathBuf;

use crate::models;

/// Numeric precision used during inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Force the full-precision CPU path.
    ///
    /// whisper.cpp falls back to reduced precision on accelerators; running on
    /// the CPU keeps inference in full precision, which matters on processors
    /// without the specialized support the reduced path assumes.
    Full,

    /// Let whisper.cpp pick (GPU when a GPU feature is compiled in).
    Auto,
}

/// Options that control how a transcription is performed.
///
/// This struct represents *library-level configuration*, not CLI flags
/// directly. The runner binary uses `Default`, which is the fixed
/// configuration the spawning backend relies on; tests and other frontends
/// can construct variations programmatically.
#[derive(Debug, Clone)]
pub struct TranscribeOpts {
    /// Registry name of the model to load.
    pub model: String,

    /// Directory model files are resolved from.
    ///
    /// `None` uses [`models::model_dir`] (env override or `./models`).
    pub model_dir: Option<PathBuf>,

    /// Language hint passed to Whisper (e.g. `"en"`).
    pub language: String,

    /// Numeric precision during inference.
    pub precision: Precision,

    /// Whether to emit per-segment and progress diagnostics while transcribing.
    pub verbose: bool,
}

impl Default for TranscribeOpts {
    fn default() -> Self {
        Self {
            model: models::TRANSCRIPTION_MODEL.to_owned(),
            model_dir: None,
            language: "en".to_owned(),
            precision: Precision::Full,
            verbose: true,
        }
    }
}
