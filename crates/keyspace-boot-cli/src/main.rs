//! CLI entrypoint for the keyspace bootstrapper.
//!
//! The binary delegates to [`keyspace_boot_cli::run`], which loads
//! configuration, installs telemetry, and runs the requested subcommand.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    keyspace_boot_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
