// Transcription runner: invoked as a subprocess by a backend service with
// exactly two positional arguments. Diagnostics go to stderr; the transcript
// is written to the output path; the exit code is the whole interface.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use dictate::logging;
use dictate::opts::TranscribeOpts;
use dictate::transcribe::transcribe_file;

#[derive(Parser, Debug)]
#[command(name = "dictate")]
#[command(about = "Transcribe a single audio file to a text file")]
struct Args {
    /// Input audio file (16 kHz mono WAV).
    audio_path: PathBuf,

    /// Output path the transcript text is written to.
    output_path: PathBuf,
}

fn main() -> ExitCode {
    logging::init();

    // clap's `Error::exit` uses status 2 for usage errors; the backend that
    // spawns us treats anything non-zero as failure but we keep the
    // documented contract of exiting 1.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                // --help / --version land here and are not failures.
                ExitCode::SUCCESS
            };
        }
    };

    match transcribe_file(&args.audio_path, &args.output_path, &TranscribeOpts::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // `{err:?}` prints the full context chain (and a backtrace when
            // RUST_BACKTRACE is set), which is what operators debug from.
            eprintln!("error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_exactly_two_positional_args() {
        assert!(Args::try_parse_from(["dictate"]).is_err());
        assert!(Args::try_parse_from(["dictate", "in.wav"]).is_err());
        assert!(Args::try_parse_from(["dictate", "in.wav", "out.txt", "extra"]).is_err());

        let args = Args::try_parse_from(["dictate", "in.wav", "out.txt"]).expect("two args parse");
        assert_eq!(args.audio_path, PathBuf::from("in.wav"));
        assert_eq!(args.output_path, PathBuf::from("out.txt"));
    }

    #[test]
    fn usage_errors_go_to_stderr() {
        let err = Args::try_parse_from(["dictate"]).expect_err("missing args");
        assert!(err.use_stderr());

        let help = Args::try_parse_from(["dictate", "--help"]).expect_err("help exits early");
        assert!(!help.use_stderr());
    }
}
