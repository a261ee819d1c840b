use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use anyhow::{Context, Result};
use hound::{WavReader, WavSpec};

/// The sample rate whisper.cpp expects.
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Load WAV audio from a reader and return normalized audio samples.
///
/// What we return:
/// - A `Vec<f32>` containing mono audio samples normalized to `[-1.0, 1.0]`
/// - The associated `WavSpec` so callers still have access to metadata
///
/// Format requirements:
/// - Mono (1 channel), 16 kHz, 16-bit PCM
///
/// We do not resample or downmix: format conversion is the caller's job
/// (`ffmpeg -ar 16000 -ac 1` before invoking us), so the errors here spell
/// that out instead of silently degrading audio quality.
pub fn samples_from_wav_reader<R>(reader: R) -> Result<(Vec<f32>, WavSpec)>
where
    R: Read + Seek,
{
    let mut reader = WavReader::new(reader).context("failed to read WAV data from reader")?;
    let spec = reader.spec();

    if spec.channels != 1 {
        anyhow::bail!(
            "expected mono WAV (1 channel), got {} channels (convert with `ffmpeg -ac 1`)",
            spec.channels
        );
    }

    if spec.sample_rate != WHISPER_SAMPLE_RATE {
        anyhow::bail!(
            "expected {} Hz sample rate, got {} Hz (convert with `ffmpeg -ar {}`)",
            WHISPER_SAMPLE_RATE,
            spec.sample_rate,
            WHISPER_SAMPLE_RATE
        );
    }

    // Read samples and normalize from i16 PCM to f32 in [-1.0, 1.0].
    let mut samples = Vec::new();
    for sample in reader.samples::<i16>() {
        let pcm = sample.context("failed to decode PCM sample")?;
        samples.push(pcm as f32 / i16::MAX as f32);
    }

    Ok((samples, spec))
}

/// Load WAV audio from a file path. See [`samples_from_wav_reader`].
pub fn samples_from_wav_file(path: &Path) -> Result<(Vec<f32>, WavSpec)> {
    let file = File::open(path)
        .with_context(|| format!("failed to open audio file: {}", path.display()))?;
    samples_from_wav_reader(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn wav_bytes(channels: u16, sample_rate: u32, samples: &[i16]) -> Vec<u8> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("create wav writer");
        for &s in samples {
            writer.write_sample(s).expect("write sample");
        }
        writer.finalize().expect("finalize wav");
        cursor.into_inner()
    }

    #[test]
    fn decodes_and_normalizes_mono_16k() -> Result<()> {
        let bytes = wav_bytes(1, WHISPER_SAMPLE_RATE, &[0, i16::MAX, i16::MIN + 1]);
        let (samples, spec) = samples_from_wav_reader(Cursor::new(bytes))?;

        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, WHISPER_SAMPLE_RATE);
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[1], 1.0);
        assert_eq!(samples[2], -1.0);
        Ok(())
    }

    #[test]
    fn rejects_stereo_with_conversion_hint() {
        let bytes = wav_bytes(2, WHISPER_SAMPLE_RATE, &[0, 0]);
        let err = samples_from_wav_reader(Cursor::new(bytes)).unwrap_err();
        assert!(err.to_string().contains("2 channels"));
        assert!(err.to_string().contains("ffmpeg"));
    }

    #[test]
    fn rejects_wrong_sample_rate() {
        let bytes = wav_bytes(1, 44_100, &[0]);
        let err = samples_from_wav_reader(Cursor::new(bytes)).unwrap_err();
        assert!(err.to_string().contains("44100 Hz"));
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let err = samples_from_wav_file(Path::new("/no/such/audio.wav")).unwrap_err();
        assert!(err.to_string().contains("/no/such/audio.wav"));
    }
}
