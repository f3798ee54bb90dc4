//! Forceful termination of the data-store process.

use std::fs;
use std::thread;
use std::time::{Duration, Instant};

use camino::Utf8Path;
use nix::errno::Errno;
use nix::sys::signal::{Signal, kill};
use tracing::{debug, info};

use super::PROCESS_TARGET;
use super::StopOutcome;
use super::errors::ProcessError;
use super::pid::{read_pid, signal_target};

/// Kills the process recorded in `pid_file` and waits for it to disappear.
///
/// Stop completes as soon as the PID file can no longer be read or the
/// process no longer answers a signal-0 probe. A timeout too large to
/// represent as a deadline waits without bound.
pub(super) fn stop_recorded_process(
    pid_file: &Utf8Path,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<StopOutcome, ProcessError> {
    let Some(pid) = read_pid(pid_file)? else {
        info!(
            target: PROCESS_TARGET,
            file = %pid_file,
            "no pid recorded; nothing to stop"
        );
        return Ok(StopOutcome::NotRunning);
    };
    let target = signal_target(pid)?;
    match kill(target, Signal::SIGKILL) {
        Ok(()) => {
            info!(target: PROCESS_TARGET, pid, "sent SIGKILL");
        }
        Err(Errno::ESRCH) => {
            info!(
                target: PROCESS_TARGET,
                pid,
                "recorded process already gone"
            );
            return Ok(StopOutcome::NotRunning);
        }
        Err(source) => return Err(ProcessError::Signal { pid, source }),
    }

    let deadline = Instant::now().checked_add(timeout);
    loop {
        if fs::read_to_string(pid_file).is_err() {
            debug!(target: PROCESS_TARGET, pid, "pid file no longer readable");
            return Ok(StopOutcome::Terminated { pid });
        }
        match kill(target, None) {
            Ok(()) | Err(Errno::EPERM) => {}
            Err(Errno::ESRCH) => {
                debug!(target: PROCESS_TARGET, pid, "process no longer present");
                return Ok(StopOutcome::Terminated { pid });
            }
            Err(source) => return Err(ProcessError::Probe { pid, source }),
        }
        if deadline.is_some_and(|limit| Instant::now() >= limit) {
            return Err(ProcessError::StopTimeout { pid, timeout });
        }
        thread::sleep(poll_interval);
    }
}
