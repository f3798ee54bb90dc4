//! Control of the external data-store process through its PID file.
//!
//! - [`spawning`] runs the launcher.
//! - [`shutdown`] kills the recorded PID and waits for it to go away.
//! - [`restart`] sequences the two with the fixed pauses.

mod errors;
mod pid;
mod restart;
mod shutdown;
mod spawning;

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use keyspace_boot_config::BootSettings;

pub use errors::ProcessError;
pub use restart::{RestartOutcome, RestartTiming, restart};

pub(crate) const PROCESS_TARGET: &str = "keyspace_boot::process";

/// Interval between liveness probes while waiting for a killed process.
pub const STOP_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Outcome of a successful stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// No process was recorded, or the recorded one was already gone.
    NotRunning,
    /// The recorded process was killed and has exited.
    Terminated {
        /// PID that was killed.
        pid: u32,
    },
}

/// Starts and stops the data-store process.
pub trait ProcessControl: Send + Sync {
    /// Launches the process without waiting for readiness.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessError`] when the launcher fails.
    fn start(&self) -> Result<(), ProcessError>;

    /// Kills the recorded process and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessError`] when the PID cannot be read or signalled,
    /// or the process outlives the stop timeout.
    fn stop(&self) -> Result<StopOutcome, ProcessError>;
}

/// Process control driven by a launcher binary and the PID file it writes.
#[derive(Debug, Clone)]
pub struct PidFileProcess {
    binary: Utf8PathBuf,
    pid_file: Utf8PathBuf,
    stop_timeout: Duration,
    poll_interval: Duration,
}

impl PidFileProcess {
    /// Builds process control for `binary`, which records its PID in `pid_file`.
    #[must_use]
    pub fn new(binary: impl Into<Utf8PathBuf>, pid_file: impl Into<Utf8PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            pid_file: pid_file.into(),
            stop_timeout: Duration::from_millis(keyspace_boot_config::DEFAULT_STOP_TIMEOUT_MS),
            poll_interval: STOP_POLL_INTERVAL,
        }
    }

    /// Builds process control from validated settings.
    #[must_use]
    pub fn from_settings(settings: &BootSettings) -> Self {
        Self::new(settings.process_binary(), settings.pid_file())
            .with_stop_timeout(settings.stop_timeout())
    }

    /// Overrides how long stop waits for the process to exit.
    #[must_use]
    pub const fn with_stop_timeout(mut self, timeout: Duration) -> Self {
        self.stop_timeout = timeout;
        self
    }

    /// Overrides the interval between liveness probes.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// PID file path.
    #[must_use]
    pub fn pid_file(&self) -> &Utf8Path {
        &self.pid_file
    }
}

impl ProcessControl for PidFileProcess {
    fn start(&self) -> Result<(), ProcessError> {
        spawning::launch(&self.binary, &self.pid_file)
    }

    fn stop(&self) -> Result<StopOutcome, ProcessError> {
        shutdown::stop_recorded_process(&self.pid_file, self.stop_timeout, self.poll_interval)
    }
}
