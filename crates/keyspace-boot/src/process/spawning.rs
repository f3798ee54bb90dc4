//! Launching the data-store process.

use std::process::{Command, Stdio};

use camino::Utf8Path;
use tracing::info;

use super::PROCESS_TARGET;
use super::errors::ProcessError;

/// Runs `<binary> -p <pid_file>` with all standard streams on the null device.
///
/// Only the launcher is awaited; it is expected to background the data store
/// and return. Readiness is not checked here.
pub(super) fn launch(binary: &Utf8Path, pid_file: &Utf8Path) -> Result<(), ProcessError> {
    let status = Command::new(binary.as_std_path())
        .arg("-p")
        .arg(pid_file.as_std_path())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|source| ProcessError::Launch {
            binary: binary.to_path_buf(),
            source,
        })?;
    if !status.success() {
        return Err(ProcessError::LaunchExited {
            binary: binary.to_path_buf(),
            status,
        });
    }
    info!(
        target: PROCESS_TARGET,
        binary = %binary,
        pid_file = %pid_file,
        "launcher returned"
    );
    Ok(())
}
