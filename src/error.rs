use std::path::PathBuf;

use thiserror::Error;

/// Typed errors for the failure cases callers are expected to distinguish.
///
/// Most of the crate propagates `anyhow::Result`; these variants exist so the
/// taxonomy the binaries report on (missing input, unknown model, missing
/// model file) stays inspectable instead of stringly-typed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("audio file not found: {}", path.display())]
    AudioNotFound { path: PathBuf },

    #[error("unknown model '{name}' (run `dictate-models --list` for supported names)")]
    UnknownModel { name: String },

    #[error(
        "model file not found: {} (run `dictate-models --name {name}` to download it)",
        path.display()
    )]
    ModelNotFound { name: String, path: PathBuf },
}
