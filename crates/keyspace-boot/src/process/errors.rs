//! Error surface for data-store process control.

use std::io;
use std::num::ParseIntError;
use std::process::ExitStatus;
use std::time::Duration;

use camino::Utf8PathBuf;
use nix::errno::Errno;
use thiserror::Error;

/// Errors raised while starting or stopping the data-store process.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The PID file exists but could not be read.
    #[error("failed to read pid file '{path}': {source}")]
    ReadPid {
        /// PID file path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The PID file does not contain a decimal PID.
    #[error("failed to parse pid file '{path}': {source}")]
    ParsePid {
        /// PID file path.
        path: Utf8PathBuf,
        /// Underlying parse error.
        #[source]
        source: ParseIntError,
    },
    /// The recorded PID cannot address a single process.
    #[error("refusing to signal pid {pid}: {reason}")]
    InvalidPid {
        /// Recorded PID.
        pid: u32,
        /// Why the PID was rejected.
        reason: &'static str,
    },
    /// Sending the kill signal failed.
    #[error("failed to kill pid {pid}: {source}")]
    Signal {
        /// Target PID.
        pid: u32,
        /// OS error.
        #[source]
        source: Errno,
    },
    /// Probing the killed process failed for a reason other than its absence.
    #[error("failed to probe pid {pid}: {source}")]
    Probe {
        /// Target PID.
        pid: u32,
        /// OS error.
        #[source]
        source: Errno,
    },
    /// The killed process was still present when the stop timeout expired.
    #[error("process {pid} did not terminate within {timeout:?}")]
    StopTimeout {
        /// Target PID.
        pid: u32,
        /// Time spent waiting.
        timeout: Duration,
    },
    /// The launcher could not be spawned.
    #[error("failed to launch '{binary}': {source}")]
    Launch {
        /// Launcher path.
        binary: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The launcher returned a failure status.
    #[error("launcher '{binary}' exited with {status}")]
    LaunchExited {
        /// Launcher path.
        binary: Utf8PathBuf,
        /// Exit status reported by the launcher.
        status: ExitStatus,
    },
}
