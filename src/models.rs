//! Registry of the GGML model files the crate knows how to use.
//!
//! whisper.cpp loads models from local files, so "load a model by name" means
//! resolving a friendly name (e.g. `base`) to a file inside the models
//! directory. The registry is an allowlist of known-good artifacts from
//! whisper.cpp's standard Hugging Face repo; `dictate-models` downloads them.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::Error;

/// Model loaded by the verifier's smoke test (smallest, fastest to load).
pub const SMOKE_TEST_MODEL: &str = "tiny";

/// Model used for real transcriptions (balance of speed and accuracy).
///
/// The asymmetry with [`SMOKE_TEST_MODEL`] is deliberate: the verifier only
/// needs to prove model loading works, the runner needs usable output.
pub const TRANSCRIPTION_MODEL: &str = "base";

/// Environment variable overriding the models directory.
pub const MODEL_DIR_ENV: &str = "DICTATE_MODEL_DIR";

const DEFAULT_MODEL_DIR: &str = "./models";

/// A known model artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    /// Friendly name users type (e.g. "base.en").
    pub name: &'static str,

    /// Filename on disk (e.g. "ggml-base.en.bin").
    pub filename: &'static str,

    /// Full download URL.
    pub url: &'static str,
}

/// Allowlist of supported models.
///
/// Deliberately small: the runner only ever loads `base`, the verifier `tiny`.
/// The remaining entries exist so deployments can trade speed for accuracy
/// without code changes.
pub static MODELS: &[ModelSpec] = &[
    ModelSpec {
        name: "tiny",
        filename: "ggml-tiny.bin",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.bin",
    },
    ModelSpec {
        name: "tiny.en",
        filename: "ggml-tiny.en.bin",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.en.bin",
    },
    ModelSpec {
        name: "base",
        filename: "ggml-base.bin",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin",
    },
    ModelSpec {
        name: "base.en",
        filename: "ggml-base.en.bin",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.en.bin",
    },
    ModelSpec {
        name: "small",
        filename: "ggml-small.bin",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.bin",
    },
    ModelSpec {
        name: "small.en",
        filename: "ggml-small.en.bin",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.en.bin",
    },
];

/// Look up a model by its friendly name.
pub fn lookup(name: &str) -> Option<&'static ModelSpec> {
    MODELS.iter().find(|m| m.name == name)
}

/// The directory model files are resolved from.
///
/// `DICTATE_MODEL_DIR` wins when set and non-empty, otherwise `./models`
/// relative to the working directory of the spawning process.
pub fn model_dir() -> PathBuf {
    dir_from_env(env::var_os(MODEL_DIR_ENV))
}

fn dir_from_env(value: Option<OsString>) -> PathBuf {
    match value {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_MODEL_DIR),
    }
}

/// Resolve a model name to an existing file under the default models directory.
pub fn resolve(name: &str) -> Result<PathBuf> {
    resolve_in(&model_dir(), name)
}

/// Resolve a model name to an existing file under `dir`.
///
/// Fails with [`Error::UnknownModel`] for names outside the allowlist and
/// [`Error::ModelNotFound`] when the file has not been downloaded yet; both
/// messages carry the remediation the user needs.
pub fn resolve_in(dir: &Path, name: &str) -> Result<PathBuf> {
    let spec = lookup(name).ok_or_else(|| Error::UnknownModel {
        name: name.to_owned(),
    })?;

    let path = dir.join(spec.filename);
    if !path.is_file() {
        return Err(Error::ModelNotFound {
            name: name.to_owned(),
            path,
        }
        .into());
    }

    Ok(path)
}
