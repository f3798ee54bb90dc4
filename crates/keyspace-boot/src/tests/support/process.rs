//! Process control double recording start and stop calls.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use camino::Utf8PathBuf;

use crate::process::{ProcessControl, ProcessError, StopOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessCall {
    Start,
    Stop,
}

#[derive(Debug, Default)]
struct State {
    calls: Mutex<Vec<ProcessCall>>,
    fail_start: AtomicBool,
    fail_stop: AtomicBool,
}

/// Clones share recorded calls and configured failures.
#[derive(Debug, Clone, Default)]
pub struct RecordingProcess {
    state: Arc<State>,
}

impl RecordingProcess {
    pub fn calls(&self) -> Vec<ProcessCall> {
        self.state.calls.lock().expect("process mutex poisoned").clone()
    }

    pub fn count(&self, call: ProcessCall) -> usize {
        self.calls().into_iter().filter(|recorded| *recorded == call).count()
    }

    pub fn fail_start(&self) {
        self.state.fail_start.store(true, Ordering::SeqCst);
    }

    pub fn fail_stop(&self) {
        self.state.fail_stop.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: ProcessCall) {
        self.state
            .calls
            .lock()
            .expect("process mutex poisoned")
            .push(call);
    }
}

impl ProcessControl for RecordingProcess {
    fn start(&self) -> Result<(), ProcessError> {
        self.record(ProcessCall::Start);
        if self.state.fail_start.load(Ordering::SeqCst) {
            return Err(ProcessError::Launch {
                binary: Utf8PathBuf::from("/missing/cassandra"),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        Ok(())
    }

    fn stop(&self) -> Result<StopOutcome, ProcessError> {
        self.record(ProcessCall::Stop);
        if self.state.fail_stop.load(Ordering::SeqCst) {
            return Err(ProcessError::ReadPid {
                path: Utf8PathBuf::from("/run/cassandra.pid"),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        Ok(StopOutcome::Terminated { pid: 4242 })
    }
}
