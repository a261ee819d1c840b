// Installation verifier: runs the fixed check suite and prints the report to
// stdout. Exit code 0 only when every check passed.

use std::io;
use std::process::ExitCode;

use dictate::logging;
use dictate::verify::{default_checks, run_report};

fn main() -> ExitCode {
    logging::init();

    let checks = default_checks();
    let mut stdout = io::stdout().lock();

    match run_report(&checks, &mut stdout) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
