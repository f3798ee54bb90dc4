//! Test double for [`BootReporter`] that records events for assertions.

use std::sync::Mutex;
use std::time::Duration;

use crate::bootstrap::{BootError, BootOutcome, SkipReason};
use crate::process::ProcessError;
use crate::report::BootReporter;
use crate::schema::VerificationError;
use crate::template::ConfigTemplate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootEvent {
    Skipped(SkipReason),
    Starting(String),
    VerificationFailed { attempt: Option<usize>, retryable: bool },
    RepairStarting(String),
    ConfigWritten,
    StopFailed(String),
    RetryScheduled { attempt: usize, delay: Duration },
    Succeeded(BootOutcome),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct RecordingBootReporter {
    events: Mutex<Vec<BootEvent>>,
}

impl RecordingBootReporter {
    pub fn events(&self) -> Vec<BootEvent> {
        self.events
            .lock()
            .expect("reporter mutex poisoned")
            .clone()
    }

    pub fn count(&self, matcher: impl Fn(&BootEvent) -> bool) -> usize {
        self.events().iter().filter(|event| matcher(event)).count()
    }

    fn record(&self, event: BootEvent) {
        self.events
            .lock()
            .expect("reporter mutex poisoned")
            .push(event);
    }
}

impl BootReporter for RecordingBootReporter {
    fn boot_skipped(&self, reason: SkipReason) {
        self.record(BootEvent::Skipped(reason));
    }

    fn boot_starting(&self, keyspace: &str) {
        self.record(BootEvent::Starting(keyspace.to_owned()));
    }

    fn verification_failed(&self, attempt: Option<usize>, error: &VerificationError) {
        self.record(BootEvent::VerificationFailed {
            attempt,
            retryable: error.is_retryable(),
        });
    }

    fn repair_starting(&self, keyspace: &str) {
        self.record(BootEvent::RepairStarting(keyspace.to_owned()));
    }

    fn config_written(&self, _template: &ConfigTemplate) {
        self.record(BootEvent::ConfigWritten);
    }

    fn stop_failed(&self, error: &ProcessError) {
        self.record(BootEvent::StopFailed(error.to_string()));
    }

    fn retry_scheduled(&self, attempt: usize, delay: Duration) {
        self.record(BootEvent::RetryScheduled { attempt, delay });
    }

    fn boot_succeeded(&self, outcome: &BootOutcome) {
        self.record(BootEvent::Succeeded(*outcome));
    }

    fn boot_failed(&self, error: &BootError) {
        self.record(BootEvent::Failed(error.to_string()));
    }
}
