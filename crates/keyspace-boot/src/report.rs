//! Structured reporting of boot progress and recovered failures.

use std::sync::Arc;
use std::time::Duration;

use crate::bootstrap::{BootError, BootOutcome, SkipReason};
use crate::process::ProcessError;
use crate::schema::VerificationError;
use crate::template::ConfigTemplate;

const BOOT_TARGET: &str = "keyspace_boot::boot";

/// Observer notified at each step of a boot.
///
/// Failures the bootstrapper recovers from (a failed probe, a failed stop)
/// are only visible through this trait.
pub trait BootReporter: Send + Sync {
    /// The boot call was a no-op.
    fn boot_skipped(&self, reason: SkipReason);

    /// The boot was admitted and the keyspace resolved.
    fn boot_starting(&self, keyspace: &str);

    /// A verification probe failed. `attempt` is `None` for the initial
    /// probe and the 1-based retry number afterwards.
    fn verification_failed(&self, attempt: Option<usize>, error: &VerificationError);

    /// Config regeneration and restart are about to run.
    fn repair_starting(&self, keyspace: &str);

    /// The active configuration was rewritten.
    fn config_written(&self, template: &ConfigTemplate);

    /// Stopping the process failed; the restart carried on.
    fn stop_failed(&self, error: &ProcessError);

    /// A retry probe will run after `delay`.
    fn retry_scheduled(&self, attempt: usize, delay: Duration);

    /// The boot completed.
    fn boot_succeeded(&self, outcome: &BootOutcome);

    /// The boot failed.
    fn boot_failed(&self, error: &BootError);
}

impl<T> BootReporter for Arc<T>
where
    T: BootReporter + ?Sized,
{
    fn boot_skipped(&self, reason: SkipReason) {
        (**self).boot_skipped(reason);
    }

    fn boot_starting(&self, keyspace: &str) {
        (**self).boot_starting(keyspace);
    }

    fn verification_failed(&self, attempt: Option<usize>, error: &VerificationError) {
        (**self).verification_failed(attempt, error);
    }

    fn repair_starting(&self, keyspace: &str) {
        (**self).repair_starting(keyspace);
    }

    fn config_written(&self, template: &ConfigTemplate) {
        (**self).config_written(template);
    }

    fn stop_failed(&self, error: &ProcessError) {
        (**self).stop_failed(error);
    }

    fn retry_scheduled(&self, attempt: usize, delay: Duration) {
        (**self).retry_scheduled(attempt, delay);
    }

    fn boot_succeeded(&self, outcome: &BootOutcome) {
        (**self).boot_succeeded(outcome);
    }

    fn boot_failed(&self, error: &BootError) {
        (**self).boot_failed(error);
    }
}

/// Reporter that records boot events with `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredBootReporter;

impl StructuredBootReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BootReporter for StructuredBootReporter {
    fn boot_skipped(&self, reason: SkipReason) {
        tracing::debug!(
            target: BOOT_TARGET,
            event = "boot_skipped",
            reason = %reason,
            "boot skipped"
        );
    }

    fn boot_starting(&self, keyspace: &str) {
        tracing::info!(
            target: BOOT_TARGET,
            event = "boot_starting",
            keyspace,
            "verifying keyspace"
        );
    }

    fn verification_failed(&self, attempt: Option<usize>, error: &VerificationError) {
        tracing::warn!(
            target: BOOT_TARGET,
            event = "verification_failed",
            keyspace = error.keyspace(),
            attempt,
            retryable = error.is_retryable(),
            error = %error,
            "keyspace verification failed"
        );
    }

    fn repair_starting(&self, keyspace: &str) {
        tracing::info!(
            target: BOOT_TARGET,
            event = "repair_starting",
            keyspace,
            "regenerating configuration and restarting data store"
        );
    }

    fn config_written(&self, template: &ConfigTemplate) {
        tracing::info!(
            target: BOOT_TARGET,
            event = "config_written",
            template = %template.template_path(),
            target_file = %template.target_path(),
            "configuration regenerated"
        );
    }

    fn stop_failed(&self, error: &ProcessError) {
        tracing::error!(
            target: BOOT_TARGET,
            event = "stop_failed",
            error = %error,
            "failed to stop data store"
        );
    }

    fn retry_scheduled(&self, attempt: usize, delay: Duration) {
        tracing::debug!(
            target: BOOT_TARGET,
            event = "retry_scheduled",
            attempt,
            delay_ms = delay.as_millis(),
            "retrying verification"
        );
    }

    fn boot_succeeded(&self, outcome: &BootOutcome) {
        tracing::info!(
            target: BOOT_TARGET,
            event = "boot_succeeded",
            outcome = %outcome,
            "keyspace verified"
        );
    }

    fn boot_failed(&self, error: &BootError) {
        tracing::error!(
            target: BOOT_TARGET,
            event = "boot_failed",
            error = %error,
            "boot failed"
        );
    }
}
