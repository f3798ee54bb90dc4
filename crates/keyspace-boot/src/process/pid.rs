use std::fs;
use std::io;

use camino::Utf8Path;
use nix::unistd::Pid;

use super::errors::ProcessError;

/// Reads the PID recorded in `path`.
///
/// A missing or blank file means no process is recorded.
pub(super) fn read_pid(path: &Utf8Path) -> Result<Option<u32>, ProcessError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<u32>()
                .map(Some)
                .map_err(|source| ProcessError::ParsePid {
                    path: path.to_path_buf(),
                    source,
                })
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ProcessError::ReadPid {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Converts a recorded PID into a signal target.
///
/// PID 0 would address the caller's process group and values beyond `i32::MAX`
/// wrap to negative group identifiers, so both are rejected.
pub(super) fn signal_target(pid: u32) -> Result<Pid, ProcessError> {
    if pid == 0 {
        return Err(ProcessError::InvalidPid {
            pid,
            reason: "pid 0 addresses the whole process group",
        });
    }
    let raw = i32::try_from(pid).map_err(|_| ProcessError::InvalidPid {
        pid,
        reason: "pid exceeds the platform pid range",
    })?;
    Ok(Pid::from_raw(raw))
}
