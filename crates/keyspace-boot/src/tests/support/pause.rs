use std::sync::Mutex;
use std::time::Duration;

use crate::pause::Pause;

/// Records requested pauses instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingPause {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingPause {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().expect("pause mutex poisoned").clone()
    }
}

impl Pause for RecordingPause {
    fn pause(&self, duration: Duration) {
        self.pauses
            .lock()
            .expect("pause mutex poisoned")
            .push(duration);
    }
}
