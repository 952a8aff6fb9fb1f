//! Track project metrics across builds and report what changed.

use buildstat_lib::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};
use std::process::ExitCode;

/// Default host that runs real OS commands.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

fn main() -> ExitCode {
    // Errors have already been reported on stderr by `run`.
    match run(&mut RealHost, std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
