// Filesystem-contract tests for the transcription runner, driven through the
// public library API. These cover the parts of the runner that do not need a
// model file on disk; end-to-end transcription requires a downloaded GGML
// model and real audio, and is exercised manually.

use dictate::error::Error;
use dictate::opts::TranscribeOpts;
use dictate::transcribe::transcribe_file;

#[test]
fn missing_audio_fails_without_touching_the_output_path() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let audio = dir.path().join("no-such-recording.wav");
    let out = dir.path().join("transcripts/lesson.txt");

    let opts = TranscribeOpts {
        model_dir: Some(dir.path().to_path_buf()),
        ..TranscribeOpts::default()
    };
    let err = transcribe_file(&audio, &out, &opts).unwrap_err();

    assert!(err.to_string().contains("no-such-recording.wav"));
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::AudioNotFound { .. })
    ));
    assert!(!out.exists());
    assert!(!dir.path().join("transcripts").exists());
    Ok(())
}

#[test]
fn nested_output_directories_exist_by_the_time_the_model_loads() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let audio = dir.path().join("recording.wav");
    std::fs::write(&audio, b"placeholder")?;
    let out = dir.path().join("a/b/c/lesson.txt");

    // No models in this directory, so the run stops at model resolution —
    // which happens after the output directory is ensured.
    let opts = TranscribeOpts {
        model_dir: Some(dir.path().join("models")),
        ..TranscribeOpts::default()
    };
    let err = transcribe_file(&audio, &out, &opts).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::ModelNotFound { .. })
    ));
    assert!(dir.path().join("a/b/c").is_dir());
    assert!(!out.exists());
    Ok(())
}
