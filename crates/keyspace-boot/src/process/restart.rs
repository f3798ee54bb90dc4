use std::time::Duration;

use tracing::warn;

use super::errors::ProcessError;
use super::{PROCESS_TARGET, ProcessControl, StopOutcome};
use crate::pause::Pause;

/// Waits around the start step of a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartTiming {
    /// Pause between stop and start.
    pub settle: Duration,
    /// Grace period after start before anything talks to the process.
    pub warm_up: Duration,
}

impl Default for RestartTiming {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(200),
            warm_up: Duration::from_secs(3),
        }
    }
}

/// Result of a restart whose start step succeeded.
#[derive(Debug)]
pub struct RestartOutcome {
    /// What the stop step did. A failed stop does not prevent the start.
    pub stop: Result<StopOutcome, ProcessError>,
}

/// Stops the process, pauses, starts it again, and pauses for warm-up.
///
/// # Errors
///
/// Returns the start failure. Stop failures are handed back in
/// [`RestartOutcome::stop`] for the caller to report.
pub fn restart(
    process: &dyn ProcessControl,
    pause: &dyn Pause,
    timing: RestartTiming,
) -> Result<RestartOutcome, ProcessError> {
    let stop = process.stop();
    if let Err(error) = &stop {
        warn!(
            target: PROCESS_TARGET,
            error = %error,
            "stop failed; starting anyway"
        );
    }
    pause.pause(timing.settle);
    process.start()?;
    pause.pause(timing.warm_up);
    Ok(RestartOutcome { stop })
}
