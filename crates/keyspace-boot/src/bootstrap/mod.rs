//! Verify-or-repair boot sequence.
//!
//! A boot probes the keyspace once. When the probe fails with a retryable
//! error the bootstrapper renders the keyspace fragment into the active
//! configuration, restarts the data store, and probes again on a linear
//! backoff schedule. The configuration is rewritten and the process restarted
//! at most once per boot.

mod controller;
mod retry;

use std::fmt;
use std::sync::Arc;

use keyspace_boot_config::BootSettings;
use thiserror::Error;

use crate::pause::{Pause, ThreadPause};
use crate::process::{ProcessControl, ProcessError, RestartTiming, restart};
use crate::report::BootReporter;
use crate::schema::{Keyspace, KeyspaceRegistry, RegistryError, VerificationError, default_keyspace};
use crate::template::{ConfigTemplate, TemplateError, render_keyspace};

pub use controller::{Admission, BootController, SkipReason};
pub use retry::{DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_STEP, RetryPolicy};

/// Result of a boot call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootOutcome {
    /// Nothing was done.
    Skipped(SkipReason),
    /// The first probe succeeded.
    Verified,
    /// A repair ran and retry number `attempts` succeeded.
    Repaired {
        /// 1-based number of the successful retry.
        attempts: usize,
    },
}

impl fmt::Display for BootOutcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped(reason) => write!(formatter, "skipped ({reason})"),
            Self::Verified => formatter.write_str("verified"),
            Self::Repaired { attempts } => write!(formatter, "repaired after {attempts} retries"),
        }
    }
}

/// Errors surfaced by [`Bootstrapper::boot`].
#[derive(Debug, Error)]
pub enum BootError {
    /// No keyspace was supplied and none could be resolved.
    #[error("failed to resolve default keyspace: {source}")]
    Registry {
        /// Underlying registry error.
        #[from]
        source: RegistryError,
    },
    /// Verification still failed when the boot gave up.
    #[error("keyspace verification failed after {attempts} retries: {source}")]
    Verification {
        /// Retries performed before giving up.
        attempts: usize,
        /// Last verification error.
        #[source]
        source: VerificationError,
    },
    /// The configuration could not be regenerated.
    #[error("failed to regenerate configuration: {source}")]
    Template {
        /// Underlying templating error.
        #[from]
        source: TemplateError,
    },
    /// The data store could not be started again.
    #[error("failed to restart data store: {source}")]
    Process {
        /// Underlying process error.
        #[from]
        source: ProcessError,
    },
}

/// Runs the verify-or-repair sequence at most once.
pub struct Bootstrapper<P> {
    controller: BootController,
    template: ConfigTemplate,
    process: P,
    reporter: Arc<dyn BootReporter>,
    pause: Arc<dyn Pause>,
    retry: RetryPolicy,
    restart_timing: RestartTiming,
}

impl<P> Bootstrapper<P>
where
    P: ProcessControl,
{
    /// Builds a bootstrapper with the default retry and restart timing.
    #[must_use]
    pub fn new(
        controller: BootController,
        template: ConfigTemplate,
        process: P,
        reporter: Arc<dyn BootReporter>,
    ) -> Self {
        Self {
            controller,
            template,
            process,
            reporter,
            pause: Arc::new(ThreadPause),
            retry: RetryPolicy::default(),
            restart_timing: RestartTiming::default(),
        }
    }

    /// Builds a bootstrapper from validated settings.
    #[must_use]
    pub fn from_settings(settings: &BootSettings, process: P, reporter: Arc<dyn BootReporter>) -> Self {
        Self::new(
            BootController::new(settings.want_boot()),
            ConfigTemplate::new(settings.template_path(), settings.target_path()),
            process,
            reporter,
        )
    }

    /// Replaces the pause used between steps.
    #[must_use]
    pub fn with_pause(mut self, pause: Arc<dyn Pause>) -> Self {
        self.pause = pause;
        self
    }

    /// Replaces the retry schedule.
    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replaces the restart pauses.
    #[must_use]
    pub const fn with_restart_timing(mut self, timing: RestartTiming) -> Self {
        self.restart_timing = timing;
        self
    }

    /// The one-shot guard.
    #[must_use]
    pub const fn controller(&self) -> &BootController {
        &self.controller
    }

    /// Process control in use.
    #[must_use]
    pub const fn process(&self) -> &P {
        &self.process
    }

    /// Verifies `keyspace`, repairing the data store when needed.
    ///
    /// Without a keyspace the first entry registered under
    /// [`crate::schema::KEYSPACES_KEY`] is used. Only the first admitted call
    /// does anything; later calls and calls on a disabled controller return
    /// [`BootOutcome::Skipped`].
    ///
    /// # Errors
    ///
    /// Returns [`BootError::Verification`] with the last probe error once
    /// retries are exhausted or a probe fails in a way a restart cannot fix.
    /// Registry, templating, and start failures abort immediately.
    pub fn boot(
        &self,
        keyspace: Option<&dyn Keyspace>,
        registry: &dyn KeyspaceRegistry,
    ) -> Result<BootOutcome, BootError> {
        if let Admission::Skip(reason) = self.controller.try_begin() {
            self.reporter.boot_skipped(reason);
            return Ok(BootOutcome::Skipped(reason));
        }

        let resolved;
        let keyspace = match keyspace {
            Some(keyspace) => keyspace,
            None => {
                resolved = default_keyspace(registry).map_err(|source| self.fail(source.into()))?;
                resolved.as_ref()
            }
        };

        self.reporter.boot_starting(keyspace.name());
        match self.verify_or_repair(keyspace) {
            Ok(outcome) => {
                self.reporter.boot_succeeded(&outcome);
                Ok(outcome)
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    fn verify_or_repair(&self, keyspace: &dyn Keyspace) -> Result<BootOutcome, BootError> {
        let first = match keyspace.verify_datamodel() {
            Ok(()) => return Ok(BootOutcome::Verified),
            Err(error) => error,
        };
        self.reporter.verification_failed(None, &first);
        if !first.is_retryable() {
            return Err(BootError::Verification {
                attempts: 0,
                source: first,
            });
        }

        self.repair(keyspace)?;

        let mut last = first;
        for (index, delay) in self.retry.delays().enumerate() {
            let attempt = index + 1;
            self.reporter.retry_scheduled(attempt, delay);
            self.pause.pause(delay);
            match keyspace.verify_datamodel() {
                Ok(()) => return Ok(BootOutcome::Repaired { attempts: attempt }),
                Err(error) => {
                    self.reporter.verification_failed(Some(attempt), &error);
                    if !error.is_retryable() {
                        return Err(BootError::Verification {
                            attempts: attempt,
                            source: error,
                        });
                    }
                    last = error;
                }
            }
        }
        Err(BootError::Verification {
            attempts: self.retry.attempts(),
            source: last,
        })
    }

    fn repair(&self, keyspace: &dyn Keyspace) -> Result<(), BootError> {
        self.reporter.repair_starting(keyspace.name());
        let fragment = render_keyspace(keyspace);
        self.template.apply(&fragment)?;
        self.reporter.config_written(&self.template);
        let outcome = restart(&self.process, self.pause.as_ref(), self.restart_timing)?;
        if let Err(error) = &outcome.stop {
            self.reporter.stop_failed(error);
        }
        Ok(())
    }

    fn fail(&self, error: BootError) -> BootError {
        self.reporter.boot_failed(&error);
        error
    }
}
