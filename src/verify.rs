//! Installation checks for the local Whisper setup.
//!
//! Each check is an independent, named function; one failing (or panicking)
//! check never prevents the remaining checks from running. The orchestrator
//! runs them in a fixed order, prints a PASSED/FAILED line per check, a
//! passed/total summary, and either next-step guidance (all passed) or
//! remediation hints (any failed).

use std::env;
use std::io::{Cursor, Write};
use std::panic::{self, AssertUnwindSafe};

use anyhow::{Context, Result, ensure};
use whisper_rs::WhisperContextParameters;

use crate::ctx::get_context;
use crate::logging::init_whisper_logging;
use crate::models;
use crate::opts::Precision;
use crate::wav::{WHISPER_SAMPLE_RATE, samples_from_wav_reader};

/// A single named installation check.
///
/// `run` returns a human-readable detail string on success (a discovered
/// value worth showing, e.g. a resolved path) and an error describing the
/// failure otherwise.
pub struct Check {
    pub name: &'static str,
    pub run: fn() -> Result<String>,
}

/// The outcome of one executed check.
pub struct CheckOutcome {
    pub name: &'static str,
    pub result: Result<String, String>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// The four checks, in their fixed execution order.
pub fn default_checks() -> Vec<Check> {
    vec![
        Check {
            name: "whisper runtime",
            run: check_whisper_runtime,
        },
        Check {
            name: "audio pipeline",
            run: check_audio_pipeline,
        },
        Check {
            name: "model load",
            run: check_model_load,
        },
        Check {
            name: "companion runner",
            run: check_companion_runner,
        },
    ]
}

/// Run a single check, converting panics into that check's failure.
pub fn run_check(check: &Check) -> CheckOutcome {
    let result = match panic::catch_unwind(AssertUnwindSafe(check.run)) {
        Ok(Ok(detail)) => Ok(detail),
        Ok(Err(err)) => Err(format!("{err:#}")),
        Err(_) => Err("unexpected panic inside check".to_owned()),
    };

    CheckOutcome {
        name: check.name,
        result,
    }
}

/// Run every check and render the full report to `out`.
///
/// Returns `true` only if all checks passed, which the binary maps to its
/// exit code.
pub fn run_report<W: Write>(checks: &[Check], out: &mut W) -> Result<bool> {
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "dictate installation check")?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out)?;

    let mut passed = 0;
    for check in checks {
        let outcome = run_check(check);
        match &outcome.result {
            Ok(detail) => {
                passed += 1;
                writeln!(out, "\u{2713} PASSED: {}: {detail}", outcome.name)?;
            }
            Err(err) => writeln!(out, "\u{2717} FAILED: {}: {err}", outcome.name)?,
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "Results: {passed}/{} checks passed", checks.len())?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out)?;

    let all_passed = passed == checks.len();
    if all_passed {
        writeln!(out, "All checks passed. Local transcription is ready to use.")?;
        writeln!(out)?;
        writeln!(out, "Next steps:")?;
        writeln!(
            out,
            "1. Set TRANSCRIPTION_METHOD=whisper-local in your backend's environment"
        )?;
        writeln!(out, "2. Run: dictate <audio.wav> <transcript.txt>")?;
    } else {
        writeln!(out, "Some checks failed. Review the errors above.")?;
        writeln!(out)?;
        writeln!(out, "Common fixes:")?;
        writeln!(
            out,
            "- Download the smoke-test model: dictate-models --name {}",
            models::SMOKE_TEST_MODEL
        )?;
        writeln!(
            out,
            "- Point {} at your models directory",
            models::MODEL_DIR_ENV
        )?;
    }

    Ok(all_passed)
}

/// Check 1: the whisper.cpp bindings are linked and callable.
///
/// Installing the log hook calls through the FFI boundary, so success here
/// proves the native library is present, not just that the crate compiled.
fn check_whisper_runtime() -> Result<String> {
    init_whisper_logging();
    let _params = WhisperContextParameters::default();
    Ok("whisper.cpp bindings linked and callable".to_owned())
}

/// Check 2: the audio decode path produces normalized samples.
fn check_audio_pipeline() -> Result<String> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: WHISPER_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).context("failed to build probe WAV")?;
        for i in 0..160i16 {
            writer
                .write_sample(i.wrapping_mul(64))
                .context("failed to write probe sample")?;
        }
        writer.finalize().context("failed to finalize probe WAV")?;
    }

    cursor.set_position(0);
    let (samples, _spec) = samples_from_wav_reader(cursor)?;
    ensure!(
        samples.len() == 160,
        "probe WAV decoded to {} samples, expected 160",
        samples.len()
    );

    Ok(format!(
        "decoded {} PCM samples, {} inference threads available",
        samples.len(),
        num_cpus::get()
    ))
}

/// Check 3: a real model loads from the models directory.
///
/// Uses the smallest model on purpose; this is a smoke test, not the model
/// the runner transcribes with. The loaded context is dropped immediately.
fn check_model_load() -> Result<String> {
    let path = models::resolve(models::SMOKE_TEST_MODEL)?;
    let _ctx = get_context(&path, Precision::Full)?;
    Ok(format!(
        "loaded '{}' from {}",
        models::SMOKE_TEST_MODEL,
        path.display()
    ))
}

/// Check 4: the transcription runner binary is installed next to us.
fn check_companion_runner() -> Result<String> {
    let exe = env::current_exe().context("failed to resolve current executable path")?;
    let dir = exe
        .parent()
        .context("current executable has no parent directory")?;

    let runner = dir.join(format!("dictate{}", env::consts::EXE_SUFFIX));
    ensure!(
        runner.is_file(),
        "transcription runner not found at {} (build with `cargo build --features bin-dictate`)",
        runner.display()
    );

    Ok(format!("transcription runner present at {}", runner.display()))
}
